use futures_util::future::{self, BoxFuture};
use thiserror::Error;

pub mod ringtone_handle;
pub mod tone;
pub mod tone_player;

#[cfg(test)]
pub mod testing;

pub use ringtone_handle::RingtoneHandle;
pub use tone::ToneSequence;
pub use tone_player::TonePlayer;

/// Reasons the platform refused to start the ringtone
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to open output stream: {0}")]
    Stream(String),

    #[error("playback thread exited before the stream started")]
    Aborted,
}

/// Resolves once the platform has accepted or refused a play request
pub type PlayRequest = BoxFuture<'static, Result<(), PlaybackError>>;

/// A loopable sound that can be started, paused and rewound
pub trait Ringtone: Send {
    /// Begin audible playback from the current position.
    ///
    /// The ringtone counts as playing as soon as this returns; the request
    /// only reports whether the platform went along with it. Dropping the
    /// request does not stop playback.
    fn play(&mut self) -> PlayRequest;

    fn pause(&mut self);

    /// Rewind to the start of the loop
    fn reset(&mut self);

    fn is_playing(&self) -> bool;
}

/// Ringtone configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RingtoneConfig {
    /// Play a ringtone at all (can be disabled for quiet or headless use)
    pub enabled: bool,
    /// Melody to synthesize
    pub sequence: ToneSequence,
    /// Output volume (0.0 to 1.0)
    pub volume: f32,
}

impl Default for RingtoneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sequence: ToneSequence::default(),
            volume: 1.0,
        }
    }
}

impl RingtoneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_sequence(mut self, sequence: ToneSequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

/// Stand-in used when the ringtone is switched off
#[derive(Debug, Default)]
pub struct SilentRingtone {
    playing: bool,
}

impl Ringtone for SilentRingtone {
    fn play(&mut self) -> PlayRequest {
        self.playing = true;
        Box::pin(future::ready(Ok(())))
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn reset(&mut self) {}

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Build the ringtone described by `config`
pub fn build_ringtone(config: &RingtoneConfig) -> Box<dyn Ringtone> {
    if config.enabled {
        Box::new(TonePlayer::new(config.sequence.clone(), config.volume))
    } else {
        Box::new(SilentRingtone::default())
    }
}
