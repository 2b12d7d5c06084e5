//! Preset file format for custom mode tables.
//!
//! A preset is a TOML file with exactly four `[[mode]]` blocks, one per
//! selectable intensity (mode 0 is always the built-in off entry):
//!
//! ```toml
//! name = "subtle"
//! description = "Light single-voice shimmer"
//!
//! [[mode]]
//! wet = 0.2
//! dry = 0.9
//! depths = [0.0008, 0.0, 0.0, 0.0]
//! ```

use anyhow::Context;
use chorale_engine::{ModeConfig, ModeTable, NUM_VOICES};
use serde::Deserialize;
use std::path::Path;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,
    /// Mode entries, in order of mode id 1..=4
    #[serde(rename = "mode")]
    pub modes: Vec<ModeEntry>,
}

/// One `[[mode]]` block of a preset.
#[derive(Debug, Deserialize)]
pub struct ModeEntry {
    /// Wet-path gain in [0, 1]
    pub wet: f32,
    /// Dry-path gain in [0, 1]
    pub dry: f32,
    /// Per-voice modulation depth in seconds
    pub depths: Vec<f32>,
}

impl Preset {
    /// Load and parse a preset file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        let preset: Self = toml::from_str(&content)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        Ok(preset)
    }

    /// Convert the preset into a validated mode table.
    pub fn into_table(self) -> anyhow::Result<ModeTable> {
        anyhow::ensure!(
            self.modes.len() == 4,
            "preset '{}' must define exactly 4 [[mode]] blocks, found {}",
            self.name,
            self.modes.len()
        );

        let mut presets = [ModeConfig::OFF; 4];
        for (i, entry) in self.modes.into_iter().enumerate() {
            anyhow::ensure!(
                entry.depths.len() == NUM_VOICES,
                "mode {} must list {} depths, found {}",
                i + 1,
                NUM_VOICES,
                entry.depths.len()
            );

            let mut depths = [0.0; NUM_VOICES];
            depths.copy_from_slice(&entry.depths);
            presets[i] = ModeConfig {
                wet: entry.wet,
                dry: entry.dry,
                depths,
            };
        }

        ModeTable::custom(presets).map_err(Into::into)
    }
}
