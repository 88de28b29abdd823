//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, watch};
use tracing::info;

use super::{ActiveMeeting, MeetingEvent, ScrumStore};
use crate::{
    error::ScrumError,
    scrum::{ScrumDraft, ScrumRecord},
    timer::{CardView, MeetingView, TickOutcome, TimerEngine, TimerSnapshot},
};

/// Main application state: the scrum catalogue plus at most one meeting
#[derive(Debug)]
pub struct AppState {
    /// Scrum catalogue
    pub scrums: Arc<Mutex<ScrumStore>>,
    /// Current (or most recently finished) meeting
    pub meeting: Arc<Mutex<Option<ActiveMeeting>>>,
    /// How often the meeting driver ticks
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Id handed to the next meeting
    next_meeting_id: AtomicU64,
    /// Channel for meeting lifecycle notifications
    pub meeting_event_tx: broadcast::Sender<MeetingEvent>,
    /// Channel carrying the latest timer snapshot
    pub snapshot_tx: watch::Sender<Option<TimerSnapshot>>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Option<TimerSnapshot>>,
}

impl AppState {
    /// Create a new AppState around a scrum catalogue
    pub fn new(port: u16, host: String, tick_interval: Duration, scrums: ScrumStore) -> Self {
        let (meeting_event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(None);

        Self {
            scrums: Arc::new(Mutex::new(scrums)),
            meeting: Arc::new(Mutex::new(None)),
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            next_meeting_id: AtomicU64::new(1),
            meeting_event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock_scrums(&self) -> Result<MutexGuard<'_, ScrumStore>, ScrumError> {
        self.scrums.lock().map_err(|e| ScrumError::lock("scrum store", e))
    }

    fn lock_meeting(&self) -> Result<MutexGuard<'_, Option<ActiveMeeting>>, ScrumError> {
        self.meeting.lock().map_err(|e| ScrumError::lock("meeting state", e))
    }

    /// Card summaries for every scrum, in id order
    pub fn list_cards(&self) -> Result<Vec<CardView>, ScrumError> {
        let scrums = self.lock_scrums()?;
        Ok(scrums.list().map(CardView::project).collect())
    }

    pub fn get_scrum(&self, id: u64) -> Result<ScrumRecord, ScrumError> {
        self.lock_scrums()?.get(id).cloned()
    }

    /// Edit buffer seeded from an existing scrum
    pub fn draft_for(&self, id: u64) -> Result<ScrumDraft, ScrumError> {
        let scrums = self.lock_scrums()?;
        Ok(ScrumDraft::from_record(scrums.get(id)?))
    }

    pub fn create_scrum(&self, draft: ScrumDraft) -> Result<ScrumRecord, ScrumError> {
        self.lock_scrums()?.insert(draft)
    }

    /// Running meetings keep their own copy of the record, so edits apply to the next one
    pub fn update_scrum(&self, id: u64, draft: ScrumDraft) -> Result<ScrumRecord, ScrumError> {
        self.lock_scrums()?.update(id, draft)
    }

    pub fn delete_scrum(&self, id: u64) -> Result<ScrumRecord, ScrumError> {
        self.lock_scrums()?.remove(id)
    }

    /// Start a meeting for a scrum and return its meeting id.
    ///
    /// Fails while another meeting is running; a finished meeting is replaced.
    pub fn begin_meeting(&self, scrum_id: u64) -> Result<u64, ScrumError> {
        let record = self.get_scrum(scrum_id)?;

        let mut meeting = self.lock_meeting()?;
        if meeting.as_ref().is_some_and(|m| m.engine.is_running()) {
            return Err(ScrumError::MeetingInProgress);
        }

        let engine = TimerEngine::start(record)?;
        let meeting_id = self.next_meeting_id.fetch_add(1, Ordering::Relaxed);

        info!(
            "Starting meeting {} for scrum {} '{}'",
            meeting_id,
            scrum_id,
            engine.record().title
        );
        self.publish(engine.snapshot(), Some(MeetingEvent::Started { meeting_id, scrum_id }));
        *meeting = Some(ActiveMeeting::new(meeting_id, engine));

        Ok(meeting_id)
    }

    /// Apply a tick from the driver of `meeting_id`; stale drivers get `Ignored`
    pub fn tick_meeting(&self, meeting_id: u64, delta_seconds: u64) -> Result<TickOutcome, ScrumError> {
        self.mutate_meeting(Some(meeting_id), |engine| engine.tick(delta_seconds))
            .map(|result| result.map_or(TickOutcome::Ignored, |(outcome, _)| outcome))
    }

    /// "Next speaker" button
    pub fn advance_speaker(&self) -> Result<MeetingView, ScrumError> {
        self.mutate_meeting(None, |engine| engine.advance_speaker())?
            .map(|(_, view)| view)
            .ok_or(ScrumError::NoActiveMeeting)
    }

    pub fn cancel_meeting(&self) -> Result<MeetingView, ScrumError> {
        let mut guard = self.lock_meeting()?;
        let meeting = guard.as_mut().ok_or(ScrumError::NoActiveMeeting)?;

        if meeting.engine.is_running() {
            meeting.engine.cancel();
            info!("Meeting {} cancelled", meeting.meeting_id);
            self.publish(
                meeting.engine.snapshot(),
                Some(MeetingEvent::Cancelled { meeting_id: meeting.meeting_id }),
            );
        }

        Ok(meeting.view())
    }

    /// Current meeting screen
    pub fn meeting_view(&self) -> Result<MeetingView, ScrumError> {
        self.lock_meeting()?
            .as_ref()
            .map(ActiveMeeting::view)
            .ok_or(ScrumError::NoActiveMeeting)
    }

    /// Latest published snapshot; never blocks on the meeting lock
    pub fn meeting_snapshot(&self) -> Option<TimerSnapshot> {
        *self.snapshot_tx.borrow()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<MeetingEvent> {
        self.meeting_event_tx.subscribe()
    }

    /// Run an engine operation on the current meeting, publishing any change.
    ///
    /// Returns `None` if there is no meeting, or if `meeting_id` names an older one.
    fn mutate_meeting<F>(
        &self,
        meeting_id: Option<u64>,
        op: F,
    ) -> Result<Option<(TickOutcome, MeetingView)>, ScrumError>
    where
        F: FnOnce(&mut TimerEngine) -> TickOutcome,
    {
        let mut guard = self.lock_meeting()?;
        let meeting = match guard.as_mut() {
            Some(m) if meeting_id.map_or(true, |id| id == m.meeting_id) => m,
            _ => return Ok(None),
        };

        let speaker_before = meeting.engine.active_speaker_index();
        let outcome = op(&mut meeting.engine);
        let id = meeting.meeting_id;
        let snapshot = meeting.engine.snapshot();
        let view = meeting.view();

        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Completed => {
                info!("Meeting {} completed", id);
                self.publish(snapshot, Some(MeetingEvent::Completed { meeting_id: id }));
            }
            TickOutcome::Advanced if snapshot.active_speaker_index != speaker_before => {
                info!("Meeting {}: {}", id, view.speaker_label);
                self.publish(
                    snapshot,
                    Some(MeetingEvent::SpeakerChanged {
                        meeting_id: id,
                        speaker_index: snapshot.active_speaker_index,
                    }),
                );
            }
            TickOutcome::Advanced => self.publish(snapshot, None),
        }

        Ok(Some((outcome, view)))
    }

    /// Must be called with the meeting lock held so snapshots land in mutation order
    fn publish(&self, snapshot: TimerSnapshot, event: Option<MeetingEvent>) {
        self.snapshot_tx.send_replace(Some(snapshot));

        if let Some(event) = event {
            // No subscribers is fine
            let _ = self.meeting_event_tx.send(event);
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerPhase;

    fn state() -> AppState {
        AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(1), ScrumStore::with_samples())
    }

    #[test]
    fn begin_meeting_publishes_snapshot_and_event() {
        let state = state();
        let mut events = state.subscribe_events();
        assert!(state.meeting_snapshot().is_none());

        let id = state.begin_meeting(2).unwrap();
        let snapshot = state.meeting_snapshot().unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.total_seconds, 300);
        assert_eq!(
            events.try_recv().unwrap(),
            MeetingEvent::Started { meeting_id: id, scrum_id: 2 }
        );
    }

    #[test]
    fn second_meeting_waits_for_first() {
        let state = state();
        let first = state.begin_meeting(1).unwrap();
        assert!(matches!(state.begin_meeting(2), Err(ScrumError::MeetingInProgress)));

        state.cancel_meeting().unwrap();
        let second = state.begin_meeting(2).unwrap();
        assert!(second > first);

        // The old driver's ticks no longer land
        assert_eq!(state.tick_meeting(first, 10).unwrap(), TickOutcome::Ignored);
        assert_eq!(state.tick_meeting(second, 10).unwrap(), TickOutcome::Advanced);
    }

    #[test]
    fn speaker_changes_and_completion_are_announced() {
        let state = state();
        let mut events = state.subscribe_events();
        // App Dev: 5 minutes, 5 speakers, 60s each
        let id = state.begin_meeting(2).unwrap();
        events.try_recv().unwrap();

        state.tick_meeting(id, 30).unwrap();
        assert!(events.try_recv().is_err());

        state.tick_meeting(id, 30).unwrap();
        assert_eq!(
            events.try_recv().unwrap(),
            MeetingEvent::SpeakerChanged { meeting_id: id, speaker_index: 1 }
        );

        assert_eq!(state.tick_meeting(id, 1000).unwrap(), TickOutcome::Completed);
        assert_eq!(events.try_recv().unwrap(), MeetingEvent::Completed { meeting_id: id });
        assert_eq!(state.tick_meeting(id, 1).unwrap(), TickOutcome::Ignored);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn meeting_controls_need_a_meeting() {
        let state = state();
        assert!(matches!(state.meeting_view(), Err(ScrumError::NoActiveMeeting)));
        assert!(matches!(state.advance_speaker(), Err(ScrumError::NoActiveMeeting)));
        assert!(matches!(state.cancel_meeting(), Err(ScrumError::NoActiveMeeting)));
    }

    #[test]
    fn cancel_twice_announces_once() {
        let state = state();
        let mut events = state.subscribe_events();
        let id = state.begin_meeting(1).unwrap();
        events.try_recv().unwrap();

        assert_eq!(state.cancel_meeting().unwrap().phase, TimerPhase::Cancelled);
        assert_eq!(state.cancel_meeting().unwrap().phase, TimerPhase::Cancelled);
        assert_eq!(events.try_recv().unwrap(), MeetingEvent::Cancelled { meeting_id: id });
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn editing_a_scrum_does_not_touch_running_meeting() {
        let state = state();
        state.begin_meeting(1).unwrap();

        let mut draft = state.draft_for(1).unwrap();
        draft.title = "Renamed".to_string();
        draft.set_length(30.0);
        state.update_scrum(1, draft).unwrap();

        let view = state.meeting_view().unwrap();
        assert_eq!(view.title, "Design");
        assert_eq!(view.seconds_remaining, "600");
    }

    #[test]
    fn invalid_scrum_never_starts() {
        let state = AppState::new(0, "127.0.0.1".to_string(), Duration::from_secs(1), ScrumStore::new());
        assert!(matches!(state.begin_meeting(1), Err(ScrumError::ScrumNotFound(1))));
        assert!(state.meeting_snapshot().is_none());
    }

    #[test]
    fn snapshot_matches_meeting_after_racing_cancel() {
        let state = Arc::new(state());

        for _ in 0..200 {
            let id = state.begin_meeting(1).unwrap();

            let ticker = {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        state.tick_meeting(id, 0).unwrap();
                    }
                })
            };
            state.cancel_meeting().unwrap();
            ticker.join().unwrap();

            let view = state.meeting_view().unwrap();
            let snapshot = state.meeting_snapshot().unwrap();
            assert_eq!(view.phase, TimerPhase::Cancelled);
            assert_eq!(snapshot.phase, TimerPhase::Cancelled);
        }
    }

    #[test]
    fn snapshot_never_runs_backwards_under_two_writers() {
        let state = Arc::new(state());
        // Design: 10 minutes, 4 speakers
        let id = state.begin_meeting(1).unwrap();

        let ticker = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    state.tick_meeting(id, 1).unwrap();
                }
            })
        };
        for _ in 0..3 {
            state.advance_speaker().unwrap();
        }
        ticker.join().unwrap();

        let snapshot = state.meeting_snapshot().unwrap();
        let view = state.meeting_view().unwrap();
        assert_eq!(snapshot.elapsed_seconds.to_string(), view.seconds_elapsed);
        assert_eq!(snapshot.phase, view.phase);
    }
}
