use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::audio::RingtoneHandle;
use crate::call_session::{CallSession, CallSummary};
use crate::call_timer::CallTimer;
use crate::commands::CallCommand;
use crate::config::AppConfig;
use crate::event_channel::CallEvent;
use crate::roster::{Caller, Roster};

/// Owns the selector screen state, the ringtone and the live call
///
/// Lives inside the UI coroutine; every field is touched from that one task.
pub struct CallController {
    roster: Roster,
    tick_period: Duration,
    stop_ringtone_on_answer: bool,
    selected: Option<String>,
    ringtone: Option<RingtoneHandle>,
    session: Option<CallSession>,
    timer: Option<CallTimer>,
    /// In-flight ringtone play request for the live session
    playback: Option<JoinHandle<()>>,
    event_sender: mpsc::UnboundedSender<CallEvent>,
}

impl CallController {
    pub fn new(config: &AppConfig, event_sender: mpsc::UnboundedSender<CallEvent>) -> Self {
        Self {
            roster: config.roster.clone(),
            tick_period: config.tick_period,
            stop_ringtone_on_answer: config.stop_ringtone_on_answer,
            selected: None,
            ringtone: None,
            session: None,
            timer: None,
            playback: None,
            event_sender,
        }
    }

    pub fn attach_ringtone(&mut self, ringtone: RingtoneHandle) {
        self.ringtone = Some(ringtone);
    }

    /// Stop and drop the ringtone. Calls cannot be started until a new one is attached.
    pub fn release_ringtone(&mut self) {
        if let Some(mut ringtone) = self.ringtone.take() {
            ringtone.stop();
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selected(&self) -> Option<&Caller> {
        self.selected.as_deref().and_then(|id| self.roster.get(id))
    }

    pub fn session(&self) -> Option<&CallSession> {
        self.session.as_ref()
    }

    pub fn is_ringtone_playing(&self) -> bool {
        self.ringtone.as_ref().is_some_and(RingtoneHandle::is_playing)
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(CallTimer::is_running)
    }

    pub fn select_caller(&mut self, id: &str) {
        if !self.roster.contains(id) {
            warn!("Ignoring unknown caller: {}", id);
            return;
        }
        info!("Selected caller: {}", id);
        self.selected = Some(id.to_string());
    }

    /// Show the call screen and start ringing.
    ///
    /// Does nothing without a selected caller, without a ringtone, or while a
    /// call is already up.
    pub fn start_call(&mut self) -> Option<&CallSession> {
        if self.session.is_some() {
            debug!("Call already active, ignoring start");
            return None;
        }
        let Some(caller) = self.selected().cloned() else {
            debug!("No caller selected, ignoring start");
            return None;
        };
        let Some(ringtone) = self.ringtone.as_mut() else {
            debug!("Ringtone not ready, ignoring start");
            return None;
        };

        let session = CallSession::new(caller);
        let session_id = session.id;
        info!("📞 Incoming call from {} (session {})", session.caller.id, session_id);
        self.session = Some(session);

        // The call screen does not wait for the device; a refusal comes back as an event
        let request = ringtone.start();
        let sender = self.event_sender.clone();
        self.playback = Some(tokio::spawn(async move {
            if let Err(e) = request.await {
                warn!("Ringtone playback failed: {}", e);
                let _ = sender.send(CallEvent::PlaybackFailed {
                    session_id,
                    reason: e.to_string(),
                });
            }
        }));

        self.session.as_ref()
    }

    pub fn answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.answer() {
            return;
        }

        info!("Call with {} answered", session.caller.id);
        self.timer = Some(CallTimer::start(self.tick_period, session.id, self.event_sender.clone()));

        if self.stop_ringtone_on_answer {
            if let Some(ringtone) = self.ringtone.as_mut() {
                ringtone.stop();
            }
        }
    }

    pub fn toggle_mute(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let muted = session.toggle_mute();
            debug!("Mute toggled: {}", muted);
        }
    }

    pub fn decline(&mut self) -> Option<CallSummary> {
        self.end_call()
    }

    /// Tear down the call: timer first, then the ringtone, then the session.
    pub fn end_call(&mut self) -> Option<CallSummary> {
        let session = self.session.take()?;

        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        if let Some(playback) = self.playback.take() {
            playback.abort();
        }
        if let Some(ringtone) = self.ringtone.as_mut() {
            ringtone.stop();
        }

        let summary = session.finish();
        info!(
            "Call with {} ended (answered: {}, elapsed: {}s)",
            summary.caller_id, summary.answered, summary.elapsed_secs
        );
        Some(summary)
    }

    pub fn handle_command(&mut self, command: CallCommand) {
        match command {
            CallCommand::SelectCaller { id } => self.select_caller(&id),
            CallCommand::StartCall => {
                self.start_call();
            }
            CallCommand::Answer => self.answer(),
            CallCommand::Decline => {
                self.decline();
            }
            CallCommand::ToggleMute => self.toggle_mute(),
            CallCommand::EndCall => {
                self.end_call();
            }
        }
    }

    pub fn handle_event(&mut self, event: CallEvent) {
        match event {
            CallEvent::Tick { session_id } => match self.session.as_mut() {
                Some(session) if session.id == session_id && session.is_connected() => session.tick(),
                _ => debug!("Dropping stale tick for session {}", session_id),
            },
            CallEvent::PlaybackFailed { session_id, reason } => {
                if self.session.as_ref().is_some_and(|s| s.id == session_id) {
                    info!("Ringing silently for session {}: {}", session_id, reason);
                }
            }
        }
    }
}

impl Drop for CallController {
    fn drop(&mut self) {
        self.end_call();
        self.release_ringtone();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::time::Instant;

    use super::*;
    use crate::audio::testing::{MockRingtone, MockState};
    use crate::call_session::CallState;

    struct Harness {
        controller: CallController,
        events: mpsc::UnboundedReceiver<CallEvent>,
        audio: Arc<Mutex<MockState>>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(AppConfig::default())
        }

        fn with_config(config: AppConfig) -> Self {
            Self::with_ringtone(config, MockRingtone::new())
        }

        fn with_ringtone(config: AppConfig, (mock, audio): (MockRingtone, Arc<Mutex<MockState>>)) -> Self {
            let (tx, events) = mpsc::unbounded_channel();
            let mut controller = CallController::new(&config, tx);
            controller.attach_ringtone(RingtoneHandle::new(Box::new(mock)));
            Self {
                controller,
                events,
                audio,
            }
        }

        /// Wait for the next tick and apply it
        async fn next_tick(&mut self) {
            let event = self.events.recv().await.unwrap();
            self.controller.handle_event(event);
        }

        fn elapsed(&self) -> String {
            self.controller.session().unwrap().elapsed()
        }
    }

    #[tokio::test]
    async fn every_caller_reaches_the_call_screen() {
        let mut h = Harness::new();
        let ids: Vec<String> = h.controller.roster().iter().map(|c| c.id.clone()).collect();

        for id in ids {
            h.controller.select_caller(&id);
            let session = h.controller.start_call().unwrap();
            assert_eq!(session.caller.id, id);
            assert_eq!(session.state, CallState::Ringing);
            assert!(h.controller.end_call().is_some());
        }
    }

    #[tokio::test]
    async fn start_without_selection_is_a_no_op() {
        let mut h = Harness::new();
        assert!(h.controller.start_call().is_none());
        assert!(h.controller.session().is_none());
        assert_eq!(h.audio.lock().unwrap().plays, 0);
    }

    #[tokio::test]
    async fn start_without_ringtone_is_a_no_op() {
        let mut h = Harness::new();
        h.controller.select_caller("mom");
        h.controller.release_ringtone();
        assert!(h.controller.start_call().is_none());
        assert!(h.controller.session().is_none());
    }

    #[tokio::test]
    async fn unknown_caller_is_ignored() {
        let mut h = Harness::new();
        h.controller.select_caller("wife");
        h.controller.select_caller("stranger");
        assert_eq!(h.controller.selected().unwrap().id, "wife");
    }

    #[tokio::test]
    async fn rejected_playback_still_shows_call() {
        let mut h = Harness::with_ringtone(AppConfig::default(), MockRingtone::failing());
        h.controller.select_caller("bank");

        let session_id = h.controller.start_call().unwrap().id;
        assert!(!h.controller.is_ringtone_playing());
        assert_eq!(h.audio.lock().unwrap().plays, 1);

        let event = h.events.recv().await.unwrap();
        assert!(matches!(&event, CallEvent::PlaybackFailed { session_id: id, .. } if *id == session_id));
        h.controller.handle_event(event);
        assert_eq!(h.controller.session().unwrap().id, session_id);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_audio_device_does_not_block_the_call() {
        let mut h = Harness::with_ringtone(AppConfig::default(), MockRingtone::hanging());
        h.controller.handle_command(CallCommand::SelectCaller { id: "mom".to_string() });
        h.controller.handle_command(CallCommand::StartCall);
        assert!(h.controller.session().is_some());

        h.controller.handle_command(CallCommand::Answer);
        h.next_tick().await;
        assert_eq!(h.elapsed(), "00:01");

        h.controller.handle_command(CallCommand::EndCall);
        assert!(h.controller.session().is_none());
        assert!(!h.audio.lock().unwrap().playing);
    }

    #[tokio::test(start_paused = true)]
    async fn end_call_while_ringing_rewinds_audio() {
        let mut h = Harness::new();
        h.controller.select_caller("wife");
        h.controller.start_call();
        h.audio.lock().unwrap().position = 4_800;

        assert!(h.controller.end_call().is_some());
        {
            let audio = h.audio.lock().unwrap();
            assert_eq!(audio.position, 0);
            assert_eq!(audio.pauses, 1);
            assert!(!audio.playing);
        }
        assert!(!h.controller.is_timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_controller_stops_call() {
        let mut h = Harness::new();
        h.controller.select_caller("doctor");
        h.controller.start_call();
        h.controller.answer();
        h.next_tick().await;

        let Harness { controller, mut events, audio } = h;
        drop(controller);

        {
            let audio = audio.lock().unwrap();
            assert!(!audio.playing);
            assert_eq!(audio.position, 0);
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
        // timer and controller were the last senders, so the channel closes empty
        assert_eq!(events.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn decline_notifies_once_without_ticks() {
        let mut h = Harness::new();
        h.controller.select_caller("jake");
        h.controller.start_call();

        let summary = h.controller.decline().unwrap();
        assert!(!summary.answered);
        assert!(h.controller.decline().is_none());
        assert!(h.controller.end_call().is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn connected_call_ticks_once_per_second() {
        let mut h = Harness::new();
        h.controller.select_caller("boss");
        h.controller.start_call();

        // ringing does not count time
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(h.events.try_recv().is_err());

        h.controller.answer();
        assert_eq!(h.elapsed(), "00:00");
        assert!(h.controller.is_timer_running());

        let answered = Instant::now();
        for n in 1..=5u64 {
            h.next_tick().await;
            assert_eq!(h.controller.session().unwrap().elapsed_secs, n);
            assert_eq!(answered.elapsed(), Duration::from_secs(n));
        }
        assert_eq!(h.elapsed(), "00:05");
    }

    #[tokio::test(start_paused = true)]
    async fn end_call_stops_timer_and_rewinds_audio() {
        let mut h = Harness::new();
        h.controller.select_caller("doctor");
        h.controller.start_call();
        h.controller.answer();
        h.next_tick().await;
        h.next_tick().await;
        h.audio.lock().unwrap().position = 4_800;

        let summary = h.controller.end_call().unwrap();
        assert!(summary.answered);
        assert_eq!(summary.elapsed_secs, 2);
        assert!(!h.controller.is_timer_running());
        assert!(!h.controller.is_ringtone_playing());
        {
            let audio = h.audio.lock().unwrap();
            assert_eq!(audio.position, 0);
            assert_eq!(audio.pauses, 1);
        }

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn new_call_starts_from_zero() {
        let mut h = Harness::new();
        h.controller.select_caller("mom");
        h.controller.start_call();
        h.controller.answer();
        h.next_tick().await;
        h.next_tick().await;
        h.next_tick().await;
        h.controller.end_call();

        // caller stays selected after hanging up
        assert_eq!(h.controller.selected().unwrap().id, "mom");

        let session = h.controller.start_call().unwrap();
        assert_eq!(session.elapsed_secs, 0);
        assert!(!session.muted);
        {
            let audio = h.audio.lock().unwrap();
            assert!(audio.playing);
            assert_eq!(audio.plays, 2);
            assert_eq!(audio.position, 0);
        }

        h.controller.answer();
        assert_eq!(h.elapsed(), "00:00");
        h.next_tick().await;
        assert_eq!(h.elapsed(), "00:01");
    }

    #[tokio::test]
    async fn stale_ticks_are_dropped() {
        let mut h = Harness::new();
        h.controller.select_caller("wife");
        h.controller.start_call();
        h.controller.answer();
        let old_id = h.controller.session().unwrap().id;
        h.controller.end_call();

        h.controller.start_call();
        h.controller.answer();
        h.controller.handle_event(CallEvent::Tick { session_id: old_id });
        assert_eq!(h.controller.session().unwrap().elapsed_secs, 0);
    }

    #[tokio::test]
    async fn mute_leaves_timer_and_audio_alone() {
        let mut h = Harness::new();
        h.controller.select_caller("jake");
        h.controller.start_call();
        h.controller.answer();

        h.controller.toggle_mute();
        assert!(h.controller.session().unwrap().muted);
        assert!(h.controller.is_timer_running());
        assert!(h.controller.is_ringtone_playing());

        h.controller.toggle_mute();
        assert!(!h.controller.session().unwrap().muted);
    }

    #[tokio::test]
    async fn ringtone_keeps_playing_after_answer_by_default() {
        let mut h = Harness::new();
        h.controller.select_caller("boss");
        h.controller.start_call();
        h.controller.answer();
        assert!(h.controller.is_ringtone_playing());

        let mut h = Harness::with_config(AppConfig::default().with_stop_ringtone_on_answer(true));
        h.controller.select_caller("boss");
        h.controller.start_call();
        h.controller.answer();
        assert!(!h.controller.is_ringtone_playing());
    }

    #[tokio::test]
    async fn commands_drive_the_lifecycle() {
        let mut h = Harness::new();
        h.controller.handle_command(CallCommand::SelectCaller { id: "bank".to_string() });
        h.controller.handle_command(CallCommand::StartCall);
        assert!(h.controller.session().is_some());

        h.controller.handle_command(CallCommand::Answer);
        h.controller.handle_command(CallCommand::ToggleMute);
        let session = h.controller.session().unwrap();
        assert!(session.is_connected());
        assert!(session.muted);

        h.controller.handle_command(CallCommand::EndCall);
        assert!(h.controller.session().is_none());
    }
}
