//! Real-time mono streaming via cpal.
//!
//! The chorus engine is mono end to end, so the stream layer presents a
//! mono interface no matter what the hardware offers: input frames are
//! downmixed by channel averaging, and the processed mono signal is copied
//! to every output channel.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Which direction a device lookup is searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceKind {
    Input,
    Output,
}

impl DeviceKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

/// Audio device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device supports audio input.
    pub is_input: bool,
    /// Whether the device supports audio output.
    pub is_output: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Stream configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Buffer size in frames.
    pub buffer_size: u32,
    /// Input device name or index (uses default if `None`).
    pub input_device: Option<String>,
    /// Output device name or index (uses default if `None`).
    pub output_device: Option<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 256,
            input_device: None,
            output_device: None,
        }
    }
}

/// List all available audio devices.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device_name(&device) {
                let sample_rate = device
                    .default_input_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);
                let is_output = device.default_output_config().is_ok();

                devices.push(AudioDevice {
                    name,
                    is_input: true,
                    is_output,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    // Output-only devices not already listed above
    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Ok(name) = device_name(&device) {
                if devices.iter().any(|d| d.name == name) {
                    continue;
                }

                let sample_rate = device
                    .default_output_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);

                devices.push(AudioDevice {
                    name,
                    is_input: false,
                    is_output: true,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// Get the default input and output device info.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();

    let input = host.default_input_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: true,
            is_output: false,
            default_sample_rate: d
                .default_input_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
        })
    });

    let output = host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| AudioDevice {
            name,
            is_input: false,
            is_output: true,
            default_sample_rate: d
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
        })
    });

    Ok((input, output))
}

/// Cloneable handle that stops a running [`AudioStream`] from another thread.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Signal the stream to stop. [`AudioStream::run`] returns shortly after.
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Whether the stream has been asked to stop (or never started).
    pub fn is_stopped(&self) -> bool {
        !self.0.load(Ordering::SeqCst)
    }
}

/// Real-time mono audio stream between an input and an output device.
pub struct AudioStream {
    #[allow(dead_code)]
    host: Host,
    input_device: Device,
    output_device: Device,
    config: StreamConfig,
    running: Arc<AtomicBool>,
    _input_stream: Option<Stream>,
    _output_stream: Option<Stream>,
}

impl AudioStream {
    /// Create a new audio stream with the given configuration.
    ///
    /// Both devices are resolved here, so device errors surface before any
    /// stream is started.
    pub fn new(config: StreamConfig) -> Result<Self> {
        let host = cpal::default_host();

        let input_device = match &config.input_device {
            Some(name) => find_device(&host, name, DeviceKind::Input)?,
            None => host.default_input_device().ok_or(Error::NoDevice)?,
        };

        let output_device = match &config.output_device {
            Some(name) => find_device(&host, name, DeviceKind::Output)?,
            None => host.default_output_device().ok_or(Error::NoDevice)?,
        };

        if let (Ok(input), Ok(output)) = (device_name(&input_device), device_name(&output_device)) {
            debug!(input = %input, output = %output, "resolved audio devices");
        }

        Ok(Self {
            host,
            input_device,
            output_device,
            config,
            // Armed at construction so a stop handle taken before run() can
            // already observe and control the stream's lifetime.
            running: Arc::new(AtomicBool::new(true)),
            _input_stream: None,
            _output_stream: None,
        })
    }

    /// Get the configured sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Get a handle that can stop this stream from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    /// Run the stream with a mono processing callback.
    ///
    /// The callback receives downmixed mono input frames and must fill the
    /// mono output buffer of the same length; the result is copied to every
    /// hardware output channel. Blocks until the stream is stopped via
    /// [`StopHandle::stop`].
    pub fn run<F>(&mut self, mut process: F) -> Result<()>
    where
        F: FnMut(&[f32], &mut [f32]) + Send + 'static,
    {
        use std::sync::mpsc;

        let input_config = self
            .input_device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_config = self
            .output_device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let input_channels = input_config.channels() as usize;
        let output_channels = output_config.channels() as usize;

        // Mono frames travel from the input callback to the output callback
        // over a bounded channel; both sides use the non-blocking calls so
        // neither audio thread can stall the other.
        let (tx, rx) = mpsc::sync_channel::<Vec<f32>>(4);

        let running = Arc::clone(&self.running);

        let input_running = Arc::clone(&running);
        let input_stream = self
            .input_device
            .build_input_stream(
                &input_config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if input_running.load(Ordering::SeqCst) {
                        let _ = tx.try_send(downmix(data, input_channels));
                    }
                },
                |err| warn!(%err, "input stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        let output_running = Arc::clone(&running);
        let mut pending_input: Vec<f32> = Vec::new();
        let mut mono_out: Vec<f32> = Vec::new();
        let output_stream = self
            .output_device
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !output_running.load(Ordering::SeqCst) {
                        data.fill(0.0);
                        return;
                    }

                    while let Ok(frames) = rx.try_recv() {
                        pending_input.extend(frames);
                    }

                    let frames_needed = data.len() / output_channels;
                    if pending_input.len() >= frames_needed {
                        let input: Vec<f32> = pending_input.drain(..frames_needed).collect();
                        mono_out.clear();
                        mono_out.resize(frames_needed, 0.0);
                        process(&input, &mut mono_out);
                        upmix_into(&mono_out, data, output_channels);
                    } else {
                        // Input has not caught up yet
                        data.fill(0.0);
                    }
                },
                |err| warn!(%err, "output stream error"),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        input_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;
        output_stream
            .play()
            .map_err(|e| Error::Stream(e.to_string()))?;

        self._input_stream = Some(input_stream);
        self._output_stream = Some(output_stream);

        // Block until stopped
        while self.running.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        Ok(())
    }

    /// Stop the audio stream.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the stream is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Downmix interleaved frames to mono by averaging channels.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    let scale = 1.0 / channels as f32;
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Copy a mono signal to every channel of an interleaved output buffer.
fn upmix_into(mono: &[f32], output: &mut [f32], channels: usize) {
    for (frame, &sample) in output.chunks_mut(channels).zip(mono) {
        frame.fill(sample);
    }
}

/// Find a device from a host by index, exact name, or fuzzy match.
///
/// The `name_or_index` can be:
/// - A numeric index (e.g., "0", "1")
/// - An exact device name
/// - A partial device name (case-insensitive fuzzy match)
fn find_device(host: &Host, name_or_index: &str, kind: DeviceKind) -> Result<Device> {
    let devices: Vec<_> = match kind {
        DeviceKind::Input => host
            .input_devices()
            .map_err(|e| Error::Stream(e.to_string()))?
            .collect(),
        DeviceKind::Output => host
            .output_devices()
            .map_err(|e| Error::Stream(e.to_string()))?
            .collect(),
    };

    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "{} device index {} (only {} devices available)",
                kind.as_str(),
                index,
                devices.len()
            ))
        });
    }

    for device in &devices {
        if device_name(device).is_ok_and(|n| n == name_or_index) {
            return Ok(device.clone());
        }
    }

    let search_lower = name_or_index.to_lowercase();
    let mut matches: Vec<_> = devices
        .iter()
        .filter_map(|d| {
            device_name(d).ok().and_then(|name| {
                name.to_lowercase()
                    .contains(&search_lower)
                    .then(|| (d.clone(), name))
            })
        })
        .collect();

    match matches.len() {
        0 => Err(Error::DeviceNotFound(format!(
            "no {} device matching '{}'",
            kind.as_str(),
            name_or_index
        ))),
        1 => Ok(matches.remove(0).0),
        _ => {
            let names: Vec<_> = matches.iter().map(|(_, n)| n.as_str()).collect();
            warn!(
                search = name_or_index,
                ?names,
                "multiple device matches, using the first"
            );
            Ok(matches.remove(0).0)
        }
    }
}

/// Find a device by partial name match (case-insensitive).
///
/// Returns the first device whose name contains the search string.
pub fn find_device_fuzzy(search: &str, is_input: bool) -> Result<AudioDevice> {
    let devices = list_devices()?;
    let search_lower = search.to_lowercase();

    let filtered: Vec<_> = devices
        .iter()
        .filter(|d| {
            let matches_type = if is_input { d.is_input } else { d.is_output };
            matches_type && d.name.to_lowercase().contains(&search_lower)
        })
        .collect();

    match filtered.len() {
        0 => Err(Error::DeviceNotFound(format!(
            "no {} device matching '{}'",
            if is_input { "input" } else { "output" },
            search
        ))),
        _ => Ok(filtered[0].clone()),
    }
}

/// Find a device by zero-based index among devices of one direction.
pub fn find_device_by_index(index: usize, is_input: bool) -> Result<AudioDevice> {
    let devices = list_devices()?;

    let filtered: Vec<_> = devices
        .iter()
        .filter(|d| if is_input { d.is_input } else { d.is_output })
        .collect();

    filtered.get(index).cloned().cloned().ok_or_else(|| {
        Error::DeviceNotFound(format!(
            "{} device index {} (only {} devices available)",
            if is_input { "input" } else { "output" },
            index,
            filtered.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channels() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix(&stereo, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn downmix_passes_mono_through() {
        let mono = [0.1, 0.2, 0.3];
        assert_eq!(downmix(&mono, 1), mono.to_vec());
    }

    #[test]
    fn upmix_copies_to_every_channel() {
        let mono = [0.25, -0.5];
        let mut out = [0.0; 4];
        upmix_into(&mono, &mut out, 2);
        assert_eq!(out, [0.25, 0.25, -0.5, -0.5]);
    }

    #[test]
    fn list_devices_does_not_panic() {
        // Device availability depends on the system; only check for Ok.
        assert!(list_devices().is_ok());
    }

    #[test]
    fn default_device_does_not_panic() {
        assert!(default_device().is_ok());
    }
}
