use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

use super::wav;

/// Fixed capture format: mono 16-bit PCM at 16kHz (what Whisper expects).
pub const SAMPLE_RATE: u32 = 16_000;
pub const CHANNELS: u16 = 1;
pub const CHUNK_SIZE: usize = 1024;

/// How long `stop_recording` waits for the capture thread to hand back its
/// buffer before giving up.
const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// How long `start_recording` waits for the capture thread to confirm the
/// stream is open and playing.
const SETUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Stop-flag poll interval inside the capture loop.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Live state of an active capture session.
///
/// The sample buffer is owned exclusively by the capture thread while it
/// runs; the controller only flips the stop flag and waits on the completion
/// channel, over which ownership of the buffer transfers back on exit.
struct CaptureHandle {
    stop_flag: Arc<AtomicBool>,
    samples_captured: Arc<AtomicUsize>,
    done_rx: mpsc::Receiver<Vec<i16>>,
    join_handle: thread::JoinHandle<()>,
}

/// Single live microphone recording session.
///
/// The cpal stream is not Send, so it lives on a dedicated thread for the
/// whole session; `AudioRecorder` itself only holds the control handle and
/// can sit behind a mutex in shared state. Exactly one session may exist at
/// a time; a second start while one is active fails cleanly.
pub struct AudioRecorder {
    handle: Option<CaptureHandle>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Start a recording session.
    ///
    /// Returns false if a session is already active, no input device is
    /// available, or the stream cannot be opened. Acquisition is
    /// all-or-nothing: any setup failure leaves no thread and no open stream
    /// behind.
    pub fn start_recording(&mut self) -> bool {
        if self.handle.is_some() {
            warn!("Recording already in progress");
            return false;
        }

        let stop_flag = Arc::new(AtomicBool::new(false));
        let samples_captured = Arc::new(AtomicUsize::new(0));
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(), String>>();
        let (done_tx, done_rx) = mpsc::channel::<Vec<i16>>();

        let thread_stop = Arc::clone(&stop_flag);
        let thread_samples = Arc::clone(&samples_captured);

        let join_handle = match thread::Builder::new()
            .name("audio-capture".to_string())
            .spawn(move || capture_thread(thread_stop, thread_samples, ready_tx, done_tx))
        {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to spawn capture thread: {}", e);
                return false;
            }
        };

        match ready_rx.recv_timeout(SETUP_TIMEOUT) {
            Ok(Ok(())) => {
                self.handle = Some(CaptureHandle {
                    stop_flag,
                    samples_captured,
                    done_rx,
                    join_handle,
                });
                info!("Recording started ({}Hz mono)", SAMPLE_RATE);
                true
            }
            Ok(Err(msg)) => {
                error!("Failed to start recording: {}", msg);
                let _ = join_handle.join();
                false
            }
            Err(_) => {
                error!("Audio capture setup timed out");
                stop_flag.store(true, Ordering::SeqCst);
                let _ = join_handle.join();
                false
            }
        }
    }

    /// Stop the active session and encode the captured audio to a WAV file.
    ///
    /// Returns None when idle, when nothing was captured, or when encoding
    /// fails. The device and stream are released on every path.
    pub fn stop_recording(&mut self) -> Option<PathBuf> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => {
                warn!("No recording in progress");
                return None;
            }
        };

        handle.stop_flag.store(true, Ordering::SeqCst);

        let samples = match handle.done_rx.recv_timeout(STOP_TIMEOUT) {
            Ok(samples) => {
                let _ = handle.join_handle.join();
                samples
            }
            Err(_) => {
                // Known race: a blocking device read can outlive the timeout.
                // The buffer never reached us, so there is nothing safe to
                // encode; the thread is abandoned and drops the stream when
                // its read finally returns.
                warn!(
                    "Capture thread did not stop within {:?}, abandoning session",
                    STOP_TIMEOUT
                );
                return None;
            }
        };

        if samples.is_empty() {
            warn!("Recording stopped with no captured audio");
            return None;
        }

        match write_recording(&samples) {
            Ok(path) => {
                info!(
                    "Recording saved: {} ({:.1}s)",
                    path.display(),
                    samples.len() as f64 / SAMPLE_RATE as f64
                );
                Some(path)
            }
            Err(e) => {
                error!("Failed to save recording: {:#}", e);
                None
            }
        }
    }

    pub fn is_recording(&self) -> bool {
        self.handle.is_some()
    }

    /// Seconds of audio captured so far; 0 when idle.
    pub fn recording_duration_secs(&self) -> f64 {
        match &self.handle {
            Some(handle) => {
                handle.samples_captured.load(Ordering::SeqCst) as f64 / SAMPLE_RATE as f64
            }
            None => 0.0,
        }
    }
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AudioRecorder {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop_flag.store(true, Ordering::SeqCst);
            let _ = handle.done_rx.recv_timeout(STOP_TIMEOUT);
        }
    }
}

/// Body of the dedicated capture thread.
///
/// Owns the cpal stream and the sample buffer for the whole session. The
/// stream callback forwards fixed-size chunks over a channel; the loop drains
/// them into the buffer until the stop flag flips or the stream reports an
/// error, then drops the stream and hands the buffer back.
fn capture_thread(
    stop_flag: Arc<AtomicBool>,
    samples_captured: Arc<AtomicUsize>,
    ready_tx: mpsc::Sender<std::result::Result<(), String>>,
    done_tx: mpsc::Sender<Vec<i16>>,
) {
    let host = cpal::default_host();
    let device = match host.default_input_device() {
        Some(device) => device,
        None => {
            let _ = ready_tx.send(Err("no audio input device available".to_string()));
            return;
        }
    };

    let stream_config = cpal::StreamConfig {
        channels: CHANNELS,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Fixed(CHUNK_SIZE as u32),
    };

    let (frame_tx, frame_rx) = mpsc::channel::<Vec<i16>>();
    let failed = Arc::new(AtomicBool::new(false));
    let stream_failed = Arc::clone(&failed);

    let stream = match device.build_input_stream(
        &stream_config,
        move |data: &[i16], _: &cpal::InputCallbackInfo| {
            let _ = frame_tx.send(data.to_vec());
        },
        move |err| {
            warn!("Audio stream error: {}", err);
            stream_failed.store(true, Ordering::SeqCst);
        },
        None,
    ) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("failed to open input stream: {}", e)));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(format!("failed to start input stream: {}", e)));
        return;
    }

    let _ = ready_tx.send(Ok(()));

    let mut buffer: Vec<i16> = Vec::new();
    while !stop_flag.load(Ordering::SeqCst) && !failed.load(Ordering::SeqCst) {
        match frame_rx.recv_timeout(POLL_INTERVAL) {
            Ok(frame) => {
                samples_captured.fetch_add(frame.len(), Ordering::SeqCst);
                buffer.extend_from_slice(&frame);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    // Release the device before handing the buffer back.
    drop(stream);
    let _ = done_tx.send(buffer);
}

/// Encode captured samples to a fresh temporary WAV file and keep it on disk.
fn write_recording(samples: &[i16]) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("recording_")
        .suffix(".wav")
        .tempfile()
        .context("Failed to create temporary recording file")?;

    let path = file
        .into_temp_path()
        .keep()
        .context("Failed to persist recording file")?;

    wav::write_wav(&path, samples, SAMPLE_RATE, CHANNELS)?;

    Ok(path)
}
