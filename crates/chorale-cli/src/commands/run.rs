//! Live chorus processing command.
//!
//! Streams audio from the input device through the chorus to the output
//! device while a keyboard loop on a second thread toggles modes. Toggles
//! travel to the audio callback over a channel and are applied at block
//! boundaries; the keyboard thread keeps a mirror of the selection state so
//! it can display the active set without touching the audio thread.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use chorale_core::Effect;
use chorale_engine::{DimensionChorus, ModeSelector, ModeTable, blend};
use chorale_io::{AudioStream, StopHandle, StreamConfig, default_device};
use clap::Args;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

use crate::preset::Preset;

#[derive(Args)]
pub struct RunArgs {
    /// Preset file with a custom mode table (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Input device name or index
    #[arg(long)]
    input_device: Option<String>,

    /// Output device name or index
    #[arg(long)]
    output_device: Option<String>,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Buffer size
    #[arg(long, default_value = "256")]
    buffer_size: u32,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let table = match &args.preset {
        Some(path) => {
            let preset = Preset::load(path)?;
            println!("Loading preset: {}", preset.name);
            preset.into_table()?
        }
        None => ModeTable::reference(),
    };

    // Show device info
    let (default_input, default_output) = default_device()?;
    let input_name = args
        .input_device
        .as_ref()
        .or(default_input.as_ref().map(|d| &d.name))
        .cloned()
        .unwrap_or_else(|| "none".to_string());
    let output_name = args
        .output_device
        .as_ref()
        .or(default_output.as_ref().map(|d| &d.name))
        .cloned()
        .unwrap_or_else(|| "none".to_string());

    println!("Live chorus");
    println!("  Input:  {}", input_name);
    println!("  Output: {}", output_name);
    println!("  Sample rate: {} Hz", args.sample_rate);
    println!("  Buffer size: {} samples", args.buffer_size);
    println!();
    println!("Keys 1-4 toggle modes, 0 clears, q quits.");
    println!();

    let config = StreamConfig {
        sample_rate: args.sample_rate,
        buffer_size: args.buffer_size,
        input_device: args.input_device,
        output_device: args.output_device,
    };
    let mut stream = AudioStream::new(config)?;
    let mut chorus = DimensionChorus::with_table(table.clone(), args.sample_rate as f32);

    let stop = stream.stop_handle();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.stop())?;
    }

    // Toggles flow keyboard thread -> audio callback over a bounded channel;
    // both ends use the non-blocking calls. The keys only produce valid ids,
    // so the callback can ignore the toggle result.
    let (tx, rx) = mpsc::sync_channel::<u8>(16);
    let keyboard = std::thread::spawn({
        let stop = stop.clone();
        move || keyboard_loop(&table, &tx, &stop)
    });

    // Run the audio stream on the main thread
    let stream_result = stream.run(move |input, output| {
        while let Ok(id) = rx.try_recv() {
            let _ = chorus.toggle_mode(id);
        }
        chorus.process_block(input, output);
    });

    // Unblock the keyboard thread before propagating a stream error, so
    // the terminal always leaves raw mode.
    stop.stop();
    keyboard
        .join()
        .map_err(|_| anyhow::anyhow!("keyboard thread panicked"))??;
    stream_result?;

    println!("Done!");
    Ok(())
}

/// Restores the terminal even if the loop errors out.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn keyboard_loop(
    table: &ModeTable,
    tx: &mpsc::SyncSender<u8>,
    stop: &StopHandle,
) -> anyhow::Result<()> {
    let _guard = RawModeGuard::enable()?;
    let mut mirror = ModeSelector::new();
    print_state(table, &mirror);

    while !stop.is_stopped() {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                stop.stop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                stop.stop();
            }
            KeyCode::Char(c @ '0'..='4') => {
                let id = c as u8 - b'0';
                debug!(id, "toggling mode");
                match tx.try_send(id) {
                    Ok(()) => {
                        // Keys only produce valid ids, so the mirror stays
                        // in lockstep with the audio-side selector.
                        let _ = mirror.toggle(id);
                        print_state(table, &mirror);
                    }
                    // Dropped toggles are re-issued by the user
                    Err(mpsc::TrySendError::Full(_)) => {}
                    Err(mpsc::TrySendError::Disconnected(_)) => break,
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Print the active set and its blended targets on one line.
///
/// The terminal is in raw mode here, so lines end with an explicit CRLF.
fn print_state(table: &ModeTable, selector: &ModeSelector) {
    let active = selector.active();
    let label = if active.is_empty() {
        "none".to_string()
    } else {
        let ids: Vec<String> = active.iter().map(u8::to_string).collect();
        ids.join("+")
    };

    match blend(table, active) {
        Ok(config) => print!(
            "modes: {:<8} wet {:.2}  dry {:.2}\r\n",
            label, config.wet, config.dry
        ),
        Err(_) => print!("modes: {label}\r\n"),
    }
}
