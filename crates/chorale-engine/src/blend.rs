//! Blending of simultaneously active modes.
//!
//! With two modes active the engine targets the arithmetic mean of their
//! configurations, field by field. With one active mode the blend is that
//! mode's configuration unchanged, and with none it is the off
//! configuration. The result feeds the parameter smoothers as targets; the
//! blend itself is pure and allocation free.

use crate::mode::{ModeConfig, ModeError, ModeTable, NUM_VOICES};

/// Compute the effective configuration for a set of active mode ids.
///
/// `active` holds at most two ids; every field of the result is the mean of
/// the corresponding fields across the listed modes. An empty set yields
/// [`ModeConfig::OFF`]. The blend is order independent, so callers may pass
/// the ids in insertion order directly.
///
/// # Errors
///
/// Returns [`ModeError::InvalidMode`] if any id is not in the table.
pub fn blend(table: &ModeTable, active: &[u8]) -> Result<ModeConfig, ModeError> {
    if active.is_empty() {
        return Ok(ModeConfig::OFF);
    }

    let mut wet = 0.0;
    let mut dry = 0.0;
    let mut depths = [0.0; NUM_VOICES];

    for &id in active {
        let config = table.get(id)?;
        wet += config.wet;
        dry += config.dry;
        for (sum, depth) in depths.iter_mut().zip(config.depths) {
            *sum += depth;
        }
    }

    let scale = 1.0 / active.len() as f32;
    for depth in &mut depths {
        *depth *= scale;
    }

    Ok(ModeConfig {
        wet: wet * scale,
        dry: dry * scale,
        depths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_blends_to_off() {
        let table = ModeTable::reference();
        assert_eq!(blend(&table, &[]).unwrap(), ModeConfig::OFF);
    }

    #[test]
    fn single_mode_passes_through() {
        let table = ModeTable::reference();
        assert_eq!(blend(&table, &[3]).unwrap(), table.get(3).unwrap());
    }

    #[test]
    fn two_modes_average_every_field() {
        let table = ModeTable::reference();
        let config = blend(&table, &[1, 2]).unwrap();

        assert!((config.wet - 0.35).abs() < 1e-6);
        assert!((config.dry - 0.825).abs() < 1e-6);
        assert!((config.depths[0] - 0.00125).abs() < 1e-7);
        assert!((config.depths[1] - 0.0006).abs() < 1e-7);
        assert_eq!(config.depths[2], 0.0);
        assert_eq!(config.depths[3], 0.0);
    }

    #[test]
    fn blend_is_order_independent() {
        let table = ModeTable::reference();
        assert_eq!(
            blend(&table, &[2, 4]).unwrap(),
            blend(&table, &[4, 2]).unwrap()
        );
    }

    #[test]
    fn mode_zero_pulls_the_blend_down() {
        let table = ModeTable::reference();
        let solo = blend(&table, &[4]).unwrap();
        let with_off = blend(&table, &[4, 0]).unwrap();
        assert!(with_off.wet < solo.wet);
        assert!(with_off.dry > solo.dry);
    }

    #[test]
    fn invalid_id_propagates() {
        let table = ModeTable::reference();
        assert_eq!(blend(&table, &[1, 9]), Err(ModeError::InvalidMode(9)));
    }
}
