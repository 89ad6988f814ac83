use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use uuid::Uuid;

use crate::event_channel::CallEvent;

/// Repeating tick source for a connected call
///
/// The task lives exactly as long as this value: `cancel` or drop aborts it.
pub struct CallTimer {
    session_id: Uuid,
    task: Option<JoinHandle<()>>,
}

impl CallTimer {
    /// Spawn the tick task. The first tick fires one full `period` after start.
    pub fn start(period: Duration, session_id: Uuid, sender: mpsc::UnboundedSender<CallEvent>) -> Self {
        debug!("Starting call timer for session {}", session_id);

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if sender.send(CallEvent::Tick { session_id }).is_err() {
                    // Receiver gone, nobody left to count
                    break;
                }
            }
        });

        Self {
            session_id,
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Cancelling call timer for session {}", self.session_id);
            task.abort();
        }
    }
}

impl Drop for CallTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
