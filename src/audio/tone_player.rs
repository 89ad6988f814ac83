use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use log::{error, info};
use tokio::sync::oneshot;
use tokio::task::spawn_blocking;

use super::{PlayRequest, PlaybackError, Ringtone, ToneSequence};

/// Plays a [`ToneSequence`] on the default output device
///
/// cpal streams are not `Send`, so each playback owns a blocking thread that
/// builds the stream and keeps it alive until paused.
pub struct TonePlayer {
    sequence: Arc<ToneSequence>,
    volume: f32,
    is_playing: Arc<AtomicBool>,
    /// Frames rendered since the last reset
    position: Arc<AtomicU64>,
    /// Bumped on every play so a stale thread never outlives its pause
    generation: Arc<AtomicU64>,
}

impl TonePlayer {
    pub fn new(sequence: ToneSequence, volume: f32) -> Self {
        Self {
            sequence: Arc::new(sequence),
            volume,
            is_playing: Arc::new(AtomicBool::new(false)),
            position: Arc::new(AtomicU64::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn play_blocking(
        playback: Playback,
        ready: oneshot::Sender<Result<(), PlaybackError>>,
    ) {
        let stream = match Self::open_stream(&playback) {
            Ok(stream) => stream,
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };

        if let Err(e) = stream.play() {
            let _ = ready.send(Err(PlaybackError::Stream(e.to_string())));
            return;
        }
        let _ = ready.send(Ok(()));

        // Keep the stream alive while this generation is playing
        while playback.is_current() {
            std::thread::sleep(Duration::from_millis(50));
        }

        stream.pause().ok();
    }

    fn open_stream(playback: &Playback) -> Result<Stream, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoOutputDevice)?;

        let config = device
            .default_output_config()
            .map_err(|e| PlaybackError::Stream(e.to_string()))?;

        let sample_format = config.sample_format();
        info!(
            "🔔 Ringtone output: {} Hz, {} channels, format: {:?}",
            config.sample_rate().0,
            config.channels(),
            sample_format
        );

        let stream_config: StreamConfig = config.into();

        let stream = match sample_format {
            SampleFormat::I8 => Self::build_stream::<i8>(&device, &stream_config, playback),
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &stream_config, playback),
            SampleFormat::I32 => Self::build_stream::<i32>(&device, &stream_config, playback),
            SampleFormat::U8 => Self::build_stream::<u8>(&device, &stream_config, playback),
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &stream_config, playback),
            SampleFormat::U32 => Self::build_stream::<u32>(&device, &stream_config, playback),
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &stream_config, playback),
            SampleFormat::F64 => Self::build_stream::<f64>(&device, &stream_config, playback),
            other => return Err(PlaybackError::UnsupportedFormat(format!("{:?}", other))),
        };

        stream.map_err(|e| PlaybackError::Stream(e.to_string()))
    }

    fn build_stream<T>(device: &Device, config: &StreamConfig, playback: &Playback) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = config.sample_rate.0 as f32;
        let channels = config.channels as usize;
        let loop_frames = (playback.sequence.cycle_secs * sample_rate).max(1.0) as u64;

        let playback = playback.clone();

        let data_fn = move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            if !playback.is_current() {
                for sample in data.iter_mut() {
                    *sample = T::from_sample(0.0);
                }
                return;
            }

            for frame in data.chunks_mut(channels) {
                let position = playback.position.fetch_add(1, Ordering::Relaxed) % loop_frames;
                let value = playback.sequence.sample_at(position as f32 / sample_rate) * playback.volume;

                for sample in frame.iter_mut() {
                    *sample = T::from_sample(value);
                }
            }
        };

        let err_fn = |err| {
            error!("Ringtone output stream error: {}", err);
        };

        device
            .build_output_stream(config, data_fn, err_fn, None)
            .map_err(|e| anyhow!("Failed to build ringtone stream: {}", e))
    }
}

/// Shared state handed to the playback thread
#[derive(Clone)]
struct Playback {
    sequence: Arc<ToneSequence>,
    volume: f32,
    is_playing: Arc<AtomicBool>,
    position: Arc<AtomicU64>,
    generation: Arc<AtomicU64>,
    my_generation: u64,
}

impl Playback {
    fn is_current(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
            && self.generation.load(Ordering::Relaxed) == self.my_generation
    }
}

impl Ringtone for TonePlayer {
    fn play(&mut self) -> PlayRequest {
        if self.is_playing.load(Ordering::Relaxed) {
            return Box::pin(async { Ok(()) });
        }

        let my_generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.is_playing.store(true, Ordering::Relaxed);

        let playback = Playback {
            sequence: self.sequence.clone(),
            volume: self.volume,
            is_playing: self.is_playing.clone(),
            position: self.position.clone(),
            generation: self.generation.clone(),
            my_generation,
        };

        let is_playing = self.is_playing.clone();
        let generation = self.generation.clone();

        let (ready_tx, ready_rx) = oneshot::channel();
        // Detached: the thread exits on its own once this generation stops
        spawn_blocking(move || Self::play_blocking(playback, ready_tx));

        Box::pin(async move {
            let started = ready_rx.await.unwrap_or(Err(PlaybackError::Aborted));
            // Only clear the flag if no newer play has taken over since
            if started.is_err() && generation.load(Ordering::Relaxed) == my_generation {
                is_playing.store(false, Ordering::Relaxed);
            }
            started
        })
    }

    fn pause(&mut self) {
        // The blocking thread notices the flag and drops its stream
        self.is_playing.store(false, Ordering::Relaxed);
    }

    fn reset(&mut self) {
        self.position.store(0, Ordering::Relaxed);
    }

    fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }
}

impl Drop for TonePlayer {
    fn drop(&mut self) {
        self.pause();
    }
}
