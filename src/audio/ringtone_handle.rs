use log::debug;

use super::{build_ringtone, PlayRequest, Ringtone, RingtoneConfig};

/// The ringtone as held by the selector screen: start from the top, stop and rewind
///
/// Dropping the handle silences the ringtone.
pub struct RingtoneHandle {
    ringtone: Box<dyn Ringtone>,
}

impl RingtoneHandle {
    pub fn new(ringtone: Box<dyn Ringtone>) -> Self {
        Self { ringtone }
    }

    pub fn from_config(config: &RingtoneConfig) -> Self {
        Self::new(build_ringtone(config))
    }

    /// Rewind and play. Returns without waiting for the platform; the
    /// request resolves once the device has accepted or refused.
    pub fn start(&mut self) -> PlayRequest {
        self.ringtone.reset();
        debug!("🔔 Ringtone requested");
        self.ringtone.play()
    }

    pub fn stop(&mut self) {
        self.ringtone.pause();
        self.ringtone.reset();
        debug!("🔕 Ringtone stopped");
    }

    pub fn is_playing(&self) -> bool {
        self.ringtone.is_playing()
    }
}

impl Drop for RingtoneHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
