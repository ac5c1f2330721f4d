//! Channel-voice MIDI events and raw byte parsing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Centred on 0, range -8192..=8191.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Parse one channel-voice message.
    ///
    /// Returns `None` for system messages, unsupported status bytes, short
    /// input, or data bytes with the high bit set. Running status is not
    /// tracked. Note-on with velocity 0 is reported as note-off.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status & 0x80 == 0 || data.iter().take(2).any(|b| b & 0x80 != 0) {
            return None;
        }

        let channel = status & 0x0F;
        let byte = |i: usize| data.get(i).copied();

        match status & 0xF0 {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                key: byte(0)?,
                velocity: byte(1)?,
            }),
            0x90 => {
                let key = byte(0)?;
                let velocity = byte(1)?;
                if velocity == 0 {
                    Some(MidiEvent::NoteOff {
                        channel,
                        key,
                        velocity: 0,
                    })
                } else {
                    Some(MidiEvent::NoteOn {
                        channel,
                        key,
                        velocity,
                    })
                }
            }
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                controller: byte(0)?,
                value: byte(1)?,
            }),
            0xC0 => Some(MidiEvent::ProgramChange {
                channel,
                program: byte(0)?,
            }),
            0xE0 => {
                let lsb = byte(0)? as i16;
                let msb = byte(1)? as i16;
                Some(MidiEvent::PitchBend {
                    channel,
                    value: ((msb << 7) | lsb) - 8192,
                })
            }
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => channel,
        }
    }
}
