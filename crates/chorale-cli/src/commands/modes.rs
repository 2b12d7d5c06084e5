//! Show the mode table and the fixed voice layout.

use std::path::PathBuf;

use chorale_engine::{MAX_MODE, ModeTable, NUM_VOICES, Voice};
use clap::Args;

use crate::preset::Preset;

#[derive(Args)]
pub struct ModesArgs {
    /// Preset file with a custom mode table (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,
}

pub fn run(args: ModesArgs) -> anyhow::Result<()> {
    let table = match &args.preset {
        Some(path) => {
            let preset = Preset::load(path)?;
            println!("Preset: {}\n", preset.name);
            preset.into_table()?
        }
        None => ModeTable::reference(),
    };

    println!("Modes");
    println!("=====\n");
    println!("  id   wet    dry    depths (ms per voice)");
    for id in 0..=MAX_MODE {
        let config = table.get(id)?;
        let depths: Vec<String> = config
            .depths
            .iter()
            .map(|d| format!("{:.2}", d * 1000.0))
            .collect();
        let label = if id == 0 { " (off)" } else { "" };
        println!(
            "  {}    {:.2}   {:.2}   [{}]{}",
            id,
            config.wet,
            config.dry,
            depths.join(", "),
            label
        );
    }

    println!("\nVoices");
    println!("======\n");
    println!("  voice   base delay   rate");
    for index in 0..NUM_VOICES {
        let voice = Voice::new(index, 48000.0);
        println!(
            "  {}       {:.1} ms       {:.2} Hz",
            index,
            voice.base_delay_seconds() * 1000.0,
            voice.rate_hz()
        );
    }

    println!("\nUp to two modes are active at once; a third selection evicts");
    println!("the oldest. All parameter changes ramp over 10 ms.");
    Ok(())
}
