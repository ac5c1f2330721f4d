/// Demonstrates voice allocation without real-time audio
/// Shows retriggering, round-robin stealing and decay to silence

use strainer_dsp::{
    dsp::mix::peak,
    params::ResolvedParam,
    synth::{VoiceBank, VoiceParams},
};

fn main() {
    println!("=== Polyphony Demo (Offline) ===\n");

    let sample_rate = 48_000.0;
    let voice_count = 4;
    let block_size = 256;

    let mut bank = VoiceBank::new(voice_count, sample_rate);
    let params = VoiceParams {
        decay: ResolvedParam::Constant(0.3),
        ..VoiceParams::default()
    };
    let mut buffer = vec![0.0f32; block_size];

    println!("Created VoiceBank with {} voices\n", voice_count);

    // Play a C major chord (C4, E4, G4)
    println!("Playing C major chord:");
    for (name, freq) in [("C4", 261.63), ("E4", 329.63), ("G4", 392.0)] {
        if let Some(slot) = bank.trigger(freq, 0.9) {
            println!("  {} ({:.2} Hz) → slot {}", name, freq, slot);
        }
    }
    bank.render(&mut buffer, &params);
    println!("  peak after first block: {:.3}\n", peak(&buffer));

    // Same pitch again: reuses its slot instead of stacking
    if let Some(slot) = bank.trigger(329.63, 1.0) {
        println!("Retrigger E4 → slot {} (cursor now {})", slot, bank.cursor());
    }

    // Two new pitches: the cursor wraps and steals slot 0
    for (name, freq) in [("B4", 493.88), ("D5", 587.33)] {
        if let Some(slot) = bank.trigger(freq, 0.8) {
            println!("Add {} → slot {}", name, slot);
        }
    }

    println!("\nSlots:");
    for (i, voice) in bank.voices().iter().enumerate() {
        println!(
            "  [{}] {:>7.2} Hz  velocity {:.2}  {:?}",
            i,
            voice.frequency(),
            voice.velocity(),
            voice.state()
        );
    }

    // Let everything ring out
    let mut blocks = 0;
    while bank.is_audible() {
        bank.render(&mut buffer, &params);
        blocks += 1;
    }
    println!(
        "\nAll voices silent after {} blocks ({:.2} s)",
        blocks,
        (blocks * block_size) as f32 / sample_rate
    );
}
