// Real-time playback sink - CPAL output callback
//
// The output stream is built once, generically over the device's preferred
// sample format (f32 internally, converted on write via cpal's FromSample).
// The callback reads the scheduled source through a shared handle and counts
// frames into an atomic; `elapsed_secs` divides that counter by the device
// rate, which is the audio clock the controller samples.
//
// When the device rate differs from the buffer rate the callback steps
// through the buffer at `buffer_rate / device_rate` frames per output frame
// (nearest-neighbor), so material always plays at its real speed.
//
// Note: on some platforms (CoreAudio) the Stream is not Send, so the sink
// must stay on the thread that created it. The editor is single-threaded by
// design, which makes this a non-issue.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::Producer;

use crate::buffer::SampleBuffer;
use crate::error::PlaybackError;
use crate::messaging::channels::NotificationProducer;
use crate::messaging::notification::{Notification, NotificationCategory};
use crate::playback::sink::PlaybackSink;

struct SourceState {
    buffer: Arc<SampleBuffer>,
    /// Fractional read position in buffer frames.
    cursor: f64,
    /// Buffer frames consumed per device frame.
    step: f64,
    end_frame: usize,
}

struct SinkShared {
    source: Mutex<Option<SourceState>>,
    frames_played: AtomicU64,
    finished: AtomicBool,
}

/// CPAL-backed playback sink on the default output device.
pub struct CpalSink {
    _device: Device,
    stream: Stream,
    device_rate: f64,
    shared: Arc<SinkShared>,
}

impl CpalSink {
    /// Open the default output device and build a silent running stream.
    /// Stream errors are logged and forwarded as playback notifications.
    pub fn new(notification_tx: Arc<Mutex<NotificationProducer>>) -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| PlaybackError::Subsystem("no audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| PlaybackError::Subsystem(format!("output config: {e}")))?;
        let sample_format = supported_config.sample_format();
        let device_rate = supported_config.sample_rate().0 as f64;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        log::info!(
            "audio output: {} ({device_rate} Hz, {channels} ch, {sample_format:?})",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let shared = Arc::new(SinkShared {
            source: Mutex::new(None),
            frames_played: AtomicU64::new(0),
            finished: AtomicBool::new(false),
        });

        let stream = match sample_format {
            SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &config, channels, &shared, notification_tx)
            }
            SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &config, channels, &shared, notification_tx)
            }
            SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &config, channels, &shared, notification_tx)
            }
            other => Err(PlaybackError::Subsystem(format!(
                "unsupported device sample format: {other:?}"
            ))),
        }?;

        Ok(Self {
            _device: device,
            stream,
            device_rate,
            shared,
        })
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        shared: &Arc<SinkShared>,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Stream, PlaybackError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let shared = Arc::clone(shared);
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    fill_output(data, channels, &shared);
                },
                move |err| {
                    log::error!("audio stream error: {err}");
                    if let Ok(mut tx) = notification_tx.lock() {
                        let _ = tx.try_push(Notification::error(
                            NotificationCategory::Playback,
                            format!("Audio output error: {err}"),
                        ));
                    }
                },
                None,
            )
            .map_err(|e| PlaybackError::Subsystem(e.to_string()))
    }
}

/// Real-time callback body. No allocations, no blocking locks.
fn fill_output<T>(data: &mut [T], channels: usize, shared: &Arc<SinkShared>)
where
    T: SizedSample + FromSample<f32>,
{
    let mut guard = match shared.source.try_lock() {
        Ok(guard) => guard,
        // Contended with a control-thread start/stop: one buffer of silence.
        Err(_) => {
            data.fill(T::EQUILIBRIUM);
            return;
        }
    };

    for frame in data.chunks_mut(channels) {
        let mut region_done = false;
        match guard.as_mut() {
            Some(src) => {
                let idx = src.cursor.floor() as usize;
                if idx >= src.end_frame {
                    frame.fill(T::EQUILIBRIUM);
                    region_done = true;
                } else {
                    for (ch, out) in frame.iter_mut().enumerate() {
                        *out = T::from_sample(src.buffer.sample_wrapped(ch, idx));
                    }
                    src.cursor += src.step;
                    shared.frames_played.fetch_add(1, Ordering::Relaxed);
                    if src.cursor.floor() as usize >= src.end_frame {
                        region_done = true;
                    }
                }
            }
            None => frame.fill(T::EQUILIBRIUM),
        }
        if region_done {
            *guard = None;
            shared.finished.store(true, Ordering::Release);
        }
    }
}

impl PlaybackSink for CpalSink {
    fn ensure_ready(&mut self) -> Result<(), PlaybackError> {
        // Streams start suspended on some hosts; resume, retry once.
        if self.stream.play().is_ok() {
            return Ok(());
        }
        self.stream
            .play()
            .map_err(|e| PlaybackError::Subsystem(format!("failed to resume output: {e}")))
    }

    fn start(
        &mut self,
        buffer: Arc<SampleBuffer>,
        start_frame: usize,
        end_frame: usize,
    ) -> Result<(), PlaybackError> {
        let step = buffer.sample_rate() as f64 / self.device_rate;
        let mut guard = self
            .shared
            .source
            .lock()
            .map_err(|_| PlaybackError::Subsystem("playback state poisoned".to_string()))?;
        self.shared.frames_played.store(0, Ordering::Relaxed);
        self.shared.finished.store(false, Ordering::Release);
        *guard = Some(SourceState {
            buffer,
            cursor: start_frame as f64,
            step,
            end_frame,
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Ok(mut guard) = self.shared.source.lock() {
            *guard = None;
        }
        self.shared.finished.store(false, Ordering::Release);
    }

    fn elapsed_secs(&self) -> f64 {
        self.shared.frames_played.load(Ordering::Relaxed) as f64 / self.device_rate
    }

    fn is_finished(&self) -> bool {
        self.shared.finished.load(Ordering::Acquire)
    }
}
