use tokio::sync::mpsc;
use uuid::Uuid;

/// Events raised by background tasks for the call coroutine
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    /// One tick period elapsed for the given session
    Tick { session_id: Uuid },

    /// The platform refused to play the ringtone for the given session
    PlaybackFailed { session_id: Uuid, reason: String },
}

/// Channel for passing call events from background tasks to the UI coroutine
pub struct EventChannel {
    pub sender: mpsc::UnboundedSender<CallEvent>,
    pub receiver: mpsc::UnboundedReceiver<CallEvent>,
}

impl EventChannel {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }
}
