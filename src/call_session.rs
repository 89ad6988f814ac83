use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::roster::Caller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Ringing,
    Connected,
}

/// State of a single simulated call, alive from `start_call` until the call ends
#[derive(Debug, Clone, PartialEq)]
pub struct CallSession {
    pub id: Uuid,
    pub caller: Caller,
    pub state: CallState,
    pub muted: bool,
    pub elapsed_secs: u64,
    pub started_at: DateTime<Utc>,
    pub answered_at: Option<DateTime<Utc>>,
}

/// What is left of a session once it has ended
#[derive(Debug, Clone, PartialEq)]
pub struct CallSummary {
    pub session_id: Uuid,
    pub caller_id: String,
    pub answered: bool,
    pub elapsed_secs: u64,
    pub ended_at: DateTime<Utc>,
}

impl CallSession {
    pub fn new(caller: Caller) -> Self {
        Self {
            id: Uuid::new_v4(),
            caller,
            state: CallState::Ringing,
            muted: false,
            elapsed_secs: 0,
            started_at: Utc::now(),
            answered_at: None,
        }
    }

    /// Move from Ringing to Connected. Returns false if already connected.
    pub fn answer(&mut self) -> bool {
        if self.state == CallState::Connected {
            return false;
        }
        self.state = CallState::Connected;
        self.elapsed_secs = 0;
        self.answered_at = Some(Utc::now());
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Count one second of talk time. Ignored while ringing.
    pub fn tick(&mut self) {
        if self.state == CallState::Connected {
            self.elapsed_secs += 1;
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == CallState::Connected
    }

    pub fn elapsed(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    pub fn status_label(&self) -> String {
        match self.state {
            CallState::Ringing => "Incoming call...".to_string(),
            CallState::Connected => self.elapsed(),
        }
    }

    pub fn finish(self) -> CallSummary {
        CallSummary {
            session_id: self.id,
            caller_id: self.caller.id,
            answered: self.state == CallState::Connected,
            elapsed_secs: self.elapsed_secs,
            ended_at: Utc::now(),
        }
    }
}

/// `MM:SS` with the minute field growing past 99 instead of rolling into hours
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
