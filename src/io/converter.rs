use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

/// Turn a MIDI note-on on `channel_filter` into a note-on message.
///
/// Everything else, note-off included, maps to `None`: voices only end by
/// decaying.
pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOn {
            freq: midi_note_to_freq(key),
            vel: midi_velocity_to_gain(velocity),
        }),
        _ => None,
    }
}

pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// 0..=127 → 0.0..=1.0 (raw, before the velocity curve).
pub fn midi_velocity_to_gain(velocity: u8) -> f32 {
    velocity.min(127) as f32 / 127.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_is_440() {
        assert_eq!(midi_note_to_freq(69), 440.0);
        assert!((midi_note_to_freq(81) - 880.0).abs() < 1e-3);
        assert!((midi_note_to_freq(60) - 261.626).abs() < 1e-2);
    }

    #[test]
    fn test_note_on_converts_to_hz_and_gain() {
        let msg = midi_to_synth(
            MidiEvent::NoteOn {
                channel: 0,
                key: 69,
                velocity: 127,
            },
            0,
        );
        assert_eq!(msg, Some(SynthMessage::NoteOn { freq: 440.0, vel: 1.0 }));
    }

    #[test]
    fn test_other_channels_and_note_off_are_ignored() {
        let on = MidiEvent::NoteOn {
            channel: 2,
            key: 60,
            velocity: 90,
        };
        let off = MidiEvent::NoteOff {
            channel: 0,
            key: 60,
            velocity: 0,
        };
        assert_eq!(midi_to_synth(on, 0), None);
        assert_eq!(midi_to_synth(off, 0), None);
    }
}
