use std::sync::{Arc, Mutex};

use futures_util::future;

use super::{PlayRequest, PlaybackError, Ringtone};

/// Everything a [`MockRingtone`] has been asked to do
#[derive(Debug, Default)]
pub struct MockState {
    pub playing: bool,
    pub position: u64,
    pub plays: usize,
    pub pauses: usize,
    pub resets: usize,
    pub fail: bool,
    /// Never answer play requests, like a device that hangs while opening
    pub hang: bool,
}

/// Ringtone that records calls instead of making noise
pub struct MockRingtone {
    state: Arc<Mutex<MockState>>,
}

impl MockRingtone {
    pub fn new() -> (Self, Arc<Mutex<MockState>>) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (Self { state: state.clone() }, state)
    }

    /// A ringtone whose `play` is always rejected, like a blocked autoplay
    pub fn failing() -> (Self, Arc<Mutex<MockState>>) {
        let (mock, state) = Self::new();
        state.lock().unwrap().fail = true;
        (mock, state)
    }

    pub fn hanging() -> (Self, Arc<Mutex<MockState>>) {
        let (mock, state) = Self::new();
        state.lock().unwrap().hang = true;
        (mock, state)
    }
}

impl Ringtone for MockRingtone {
    fn play(&mut self) -> PlayRequest {
        let mut state = self.state.lock().unwrap();
        state.plays += 1;
        if state.fail {
            return Box::pin(future::ready(Err(PlaybackError::NoOutputDevice)));
        }
        state.playing = true;
        if state.hang {
            return Box::pin(future::pending());
        }
        Box::pin(future::ready(Ok(())))
    }

    fn pause(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.pauses += 1;
        state.playing = false;
    }

    fn reset(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.resets += 1;
        state.position = 0;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }
}
