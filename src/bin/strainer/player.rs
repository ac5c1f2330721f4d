//! Device setup and the control-side note loop.

use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{debug, info, warn};

use strainer_dsp::{
    engine::{channel, ControlHandle},
    io::midi::MidiEvent,
    synth::StatusMessage,
    AudioOutput, BlockParams, EngineConfig, ParamId, MAX_CHANNELS,
};

/// C minor arpeggio, MIDI note numbers.
const ARPEGGIO: [u8; 8] = [48, 55, 60, 63, 67, 72, 67, 63];
const STEP: Duration = Duration::from_millis(180);
const BARS: usize = 4;
const TAIL: Duration = Duration::from_millis(2_500);

pub fn run(mut config: EngineConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let device_channels = stream_config.channels() as usize;
    config.sample_rate = stream_config.sample_rate().0 as f32;
    config.channels = device_channels.clamp(1, MAX_CHANNELS);

    info!(
        sample_rate = config.sample_rate,
        channels = device_channels,
        voices = config.voices,
        "opening output stream"
    );

    let (mut handle, mut engine) = channel(config)?;
    let block = config.max_block_size;
    let mut output = AudioOutput::new(config.channels, block);

    let stream = device.build_output_stream(
        &stream_config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / device_channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(block);
                let Ok(params) = BlockParams::new(frames) else {
                    break;
                };
                engine.process(&params, &mut output);

                let offset = frames_written * device_channels;
                let dest = &mut data[offset..offset + frames * device_channels];
                if device_channels == config.channels {
                    output.interleave_into(dest, frames);
                } else {
                    // more device channels than the engine renders: repeat the last one
                    for (i, frame) in dest.chunks_mut(device_channels).enumerate() {
                        for (ch, sample) in frame.iter_mut().enumerate() {
                            *sample = output.buffers[ch.min(config.channels - 1)][i];
                        }
                    }
                }

                frames_written += frames;
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;

    stream.play()?;

    handle.set_param(ParamId::Highpass, 120.0)?;
    handle.set_param(ParamId::Lowpass, 6_000.0)?;
    handle.set_param(ParamId::PhaseDrop, 2.0)?;

    play_arpeggio(&mut handle)?;

    ring_out(&mut handle);
    Ok(())
}

fn play_arpeggio(handle: &mut ControlHandle) -> EyreResult<()> {
    let mut next = Instant::now();
    for (step, &note) in ARPEGGIO.iter().cycle().take(ARPEGGIO.len() * BARS).enumerate() {
        // morph saw → pulse over the run
        let sweep = step as f32 / (ARPEGGIO.len() * BARS) as f32;
        handle.set_param(ParamId::Shape, sweep * 2.0)?;

        let velocity = if step % 4 == 0 { 120 } else { 80 };
        if let Err(err) = handle.midi(MidiEvent::NoteOn {
            channel: 0,
            key: note,
            velocity,
        }) {
            warn!(%err, note, "note dropped");
        }

        report_status(handle);
        next += STEP;
        std::thread::sleep(next.saturating_duration_since(Instant::now()));
    }
    Ok(())
}

/// Keep the stream open while the last notes decay.
fn ring_out(handle: &mut ControlHandle) {
    let deadline = Instant::now() + TAIL;
    while Instant::now() < deadline && handle.is_render_alive() {
        report_status(handle);
        std::thread::sleep(Duration::from_millis(50));
    }
}

fn report_status(handle: &mut ControlHandle) {
    while let Some(status) = handle.poll_status() {
        match status {
            StatusMessage::Ready { sample_rate, voices } => info!(sample_rate, voices, "engine ready"),
            StatusMessage::VoiceTriggered { slot, freq } => debug!(slot, freq, "voice triggered"),
            StatusMessage::ReverbPrimed => info!("reverb primed"),
            StatusMessage::Idle => info!("engine idle"),
        }
    }
}
