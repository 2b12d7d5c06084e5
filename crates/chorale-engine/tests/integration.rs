//! End-to-end scenarios driven only through the public API.

use chorale_core::Effect;
use chorale_engine::{DimensionChorus, ModeConfig, ModeError, ModeTable, blend};

const SR: f32 = 48000.0;

/// Run enough silence through the chorus for all smoothers to settle.
fn settle(chorus: &mut DimensionChorus) {
    for _ in 0..(SR * 0.2) as usize {
        chorus.process(0.0);
    }
}

#[test]
fn startup_to_layered_modes_scenario() {
    let mut chorus = DimensionChorus::new(SR);
    assert_eq!(chorus.active_modes(), &[1]);

    // Layer mode 2 on top of the startup mode.
    chorus.toggle_mode(2).unwrap();
    assert_eq!(chorus.active_modes(), &[1, 2]);

    let target = chorus.config_target();
    assert!((target.wet - 0.35).abs() < 1e-6);
    assert!((target.dry - 0.825).abs() < 1e-6);
    assert!((target.depths[0] - 0.00125).abs() < 1e-7);
    assert!((target.depths[1] - 0.0006).abs() < 1e-7);

    // The smoothers actually arrive at those targets.
    settle(&mut chorus);
    assert!(chorus.is_settled());
}

#[test]
fn deselecting_one_of_a_pair_leaves_the_survivor_verbatim() {
    let mut chorus = DimensionChorus::new(SR);
    chorus.toggle_mode(2).unwrap();
    chorus.toggle_mode(1).unwrap();

    assert_eq!(chorus.active_modes(), &[2]);
    assert_eq!(
        chorus.config_target(),
        chorus.table().get(2).unwrap(),
        "a single surviving mode applies unblended"
    );
}

#[test]
fn layering_from_empty_averages_without_eviction() {
    let mut chorus = DimensionChorus::new(SR);
    chorus.toggle_mode(0).unwrap();
    chorus.toggle_mode(3).unwrap();
    chorus.toggle_mode(4).unwrap();
    assert_eq!(chorus.active_modes(), &[3, 4]);

    let target = chorus.config_target();
    assert!((target.wet - 0.55).abs() < 1e-6);
    assert!((target.dry - 0.725).abs() < 1e-6);
    assert!((target.depths[0] - 0.00225).abs() < 1e-7);
    assert!((target.depths[1] - 0.0019).abs() < 1e-7);
    assert!((target.depths[2] - 0.00165).abs() < 1e-7);
    assert!((target.depths[3] - 0.00075).abs() < 1e-7);
}

#[test]
fn fifo_eviction_chain() {
    let mut chorus = DimensionChorus::new(SR);

    chorus.toggle_mode(2).unwrap();
    assert_eq!(chorus.active_modes(), &[1, 2]);

    chorus.toggle_mode(3).unwrap();
    assert_eq!(chorus.active_modes(), &[2, 3]);

    chorus.toggle_mode(4).unwrap();
    assert_eq!(chorus.active_modes(), &[3, 4]);

    // Deselecting then reselecting changes the eviction order.
    chorus.toggle_mode(3).unwrap();
    chorus.toggle_mode(3).unwrap();
    assert_eq!(chorus.active_modes(), &[4, 3]);
}

#[test]
fn clearing_all_modes_restores_unity_passthrough() {
    let mut chorus = DimensionChorus::new(SR);
    chorus.toggle_mode(4).unwrap();
    chorus.toggle_mode(0).unwrap();
    assert!(chorus.active_modes().is_empty());
    assert_eq!(chorus.config_target(), ModeConfig::OFF);

    settle(&mut chorus);
    for n in 0..2000 {
        let input = ((n as f32) * 0.013).sin() * 0.4;
        let out = chorus.process(input);
        assert!((out - input).abs() < 1e-4);
    }
}

#[test]
fn invalid_toggle_fails_synchronously_and_audio_continues() {
    let mut chorus = DimensionChorus::new(SR);
    settle(&mut chorus);

    assert_eq!(chorus.toggle_mode(42), Err(ModeError::InvalidMode(42)));

    // Processing afterwards behaves exactly like an untouched instance.
    let mut reference = DimensionChorus::new(SR);
    settle(&mut reference);
    for n in 0..1000 {
        let input = ((n as f32) * 0.007).sin();
        assert_eq!(chorus.process(input), reference.process(input));
    }
}

#[test]
fn block_processing_matches_per_sample() {
    let mut per_sample = DimensionChorus::new(SR);
    let mut blocked = per_sample.clone();
    per_sample.toggle_mode(3).unwrap();
    blocked.toggle_mode(3).unwrap();

    let input: Vec<f32> = (0..512).map(|n| ((n as f32) * 0.02).sin()).collect();

    let expected: Vec<f32> = input.iter().map(|&x| per_sample.process(x)).collect();
    let mut output = vec![0.0; input.len()];
    blocked.process_block(&input, &mut output);

    assert_eq!(expected, output);
}

#[test]
fn deeper_modes_produce_more_pitch_movement() {
    // Feed a sine and measure output deviation from a pure delayed copy.
    // Mode 4 modulates four voices deeply, mode 1 just one voice lightly,
    // so the heavier mode must wobble the wet path more.
    fn wet_variation(mode: u8) -> f32 {
        let mut chorus = DimensionChorus::new(SR);
        chorus.toggle_mode(1).unwrap(); // deselect the startup mode
        chorus.toggle_mode(mode).unwrap();
        for _ in 0..(SR * 0.5) as usize {
            chorus.process(0.0);
        }

        let mut min: f32 = f32::MAX;
        let mut max: f32 = f32::MIN;
        for n in 0..(SR * 2.0) as usize {
            let input = ((n as f32) * 440.0 * core::f32::consts::TAU / SR).sin() * 0.25;
            let out = chorus.process(input);
            min = min.min(out);
            max = max.max(out);
        }
        max - min
    }

    assert!(wet_variation(4) > wet_variation(1));
}

#[test]
fn custom_table_round_trips_through_the_blend() {
    let presets = [
        ModeConfig {
            wet: 0.1,
            dry: 0.95,
            depths: [0.0005, 0.0, 0.0, 0.0],
        },
        ModeConfig {
            wet: 0.2,
            dry: 0.9,
            depths: [0.001, 0.0005, 0.0, 0.0],
        },
        ModeConfig {
            wet: 0.3,
            dry: 0.85,
            depths: [0.001, 0.001, 0.0005, 0.0],
        },
        ModeConfig {
            wet: 0.4,
            dry: 0.8,
            depths: [0.001, 0.001, 0.001, 0.0005],
        },
    ];
    let table = ModeTable::custom(presets).unwrap();

    let pair = blend(&table, &[1, 4]).unwrap();
    assert!((pair.wet - 0.25).abs() < 1e-6);
    assert!((pair.dry - 0.875).abs() < 1e-6);

    let mut chorus = DimensionChorus::with_table(table, SR);
    chorus.toggle_mode(4).unwrap();
    assert_eq!(chorus.config_target(), pair);
}
