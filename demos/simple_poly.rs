/// Simple polyphony example: control handle in, stereo blocks out
use strainer_dsp::{
    channel,
    io::{converter::midi_note_to_freq, midi::MidiEvent},
    synth::StatusMessage,
    AudioOutput, BlockParams, EngineConfig, ParamId,
};

fn main() {
    println!("=== Simple Polyphony Example ===\n");

    // Step 1: Build a connected control handle and render engine
    let config = EngineConfig::default();
    let Ok((mut handle, mut engine)) = channel(config) else {
        eprintln!("invalid engine config");
        return;
    };
    println!(
        "Created engine: {} voices, {} Hz, reverb kernel {} frames\n",
        config.voices, config.sample_rate, config.kernel_size
    );

    // Step 2: Shape the patch
    let _ = handle.set_param(ParamId::Highpass, 80.0);
    let _ = handle.set_param(ParamId::Lowpass, 4_000.0);
    let _ = handle.set_param_by_name("decay", 0.6);

    // Step 3: Play some notes
    println!("Playing C major chord:");
    for note in [60u8, 64, 67] {
        println!("  Note On: {} ({:.2} Hz)", note, midi_note_to_freq(note));
        let _ = handle.midi(MidiEvent::NoteOn {
            channel: 0,
            key: note,
            velocity: 100,
        });
    }

    // Step 4: Render audio
    let Ok(params) = BlockParams::new(config.max_block_size) else {
        return;
    };
    let mut output = AudioOutput::new(config.channels, config.max_block_size);
    let mut peak = 0.0f32;
    let blocks = 32;
    for _ in 0..blocks {
        engine.process(&params, &mut output);
        peak = output.buffers[0].iter().fold(peak, |acc, &x| acc.max(x.abs()));
    }

    println!("\nRendered {} samples per channel", blocks * config.max_block_size);
    println!("Peak amplitude: {:.3}", peak);

    // Step 5: Read back what the render side reported
    println!("\nStatus messages:");
    while let Some(status) = handle.poll_status() {
        match status {
            StatusMessage::Ready { sample_rate, voices } => {
                println!("  ready at {} Hz with {} voices", sample_rate, voices)
            }
            StatusMessage::VoiceTriggered { slot, freq } => println!("  slot {} ← {:.2} Hz", slot, freq),
            StatusMessage::ReverbPrimed => println!("  reverb primed"),
            StatusMessage::Idle => println!("  idle"),
        }
    }
}
