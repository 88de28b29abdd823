use std::{sync::Arc, time::Duration};

use scrum_timer::{
    state::{MeetingEvent, ScrumStore},
    tasks::start_meeting,
    AppState, ScrumDraft, TimerPhase,
};

fn state_with(attendees: &[&str], minutes: f64) -> (Arc<AppState>, u64) {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Duration::from_secs(1),
        ScrumStore::new(),
    ));
    let mut draft = ScrumDraft::new();
    draft.title = "Standup".to_string();
    draft.set_length(minutes);
    for name in attendees {
        draft.add_attendee(name);
    }
    let id = state.create_scrum(draft).unwrap().id;
    (state, id)
}

#[tokio::test(start_paused = true)]
async fn driver_rotates_speakers_over_time() {
    let (state, scrum_id) = state_with(&["A", "B", "C"], 15.0);
    let _handle = start_meeting(Arc::clone(&state), scrum_id).unwrap();

    tokio::time::sleep(Duration::from_millis(450_500)).await;

    let view = state.meeting_view().unwrap();
    assert_eq!(view.phase, TimerPhase::Running);
    assert_eq!(view.speaker_label, "Speaker 2 of 3");
    assert_eq!(view.speaker_name.as_deref(), Some("B"));
}

#[tokio::test(start_paused = true)]
async fn driver_stops_when_meeting_completes() {
    let (state, scrum_id) = state_with(&["A"], 5.0);
    let mut events = state.subscribe_events();
    let handle = start_meeting(Arc::clone(&state), scrum_id).unwrap();
    let meeting_id = handle.meeting_id;
    assert!(!handle.is_finished());

    tokio::time::timeout(Duration::from_secs(400), handle.join())
        .await
        .expect("driver should stop after the meeting ends");

    let snapshot = state.meeting_snapshot().unwrap();
    assert_eq!(snapshot.phase, TimerPhase::Completed);
    assert_eq!(snapshot.seconds_remaining(), 0);

    let mut completions = 0;
    while let Ok(event) = events.try_recv() {
        if event == (MeetingEvent::Completed { meeting_id }) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_the_driver() {
    let (state, scrum_id) = state_with(&["A", "B"], 30.0);
    let handle = start_meeting(Arc::clone(&state), scrum_id).unwrap();

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    let view = state.cancel_meeting().unwrap();
    assert_eq!(view.phase, TimerPhase::Cancelled);
    assert_eq!(view.seconds_elapsed, "10");

    tokio::time::timeout(Duration::from_secs(5), handle.join())
        .await
        .expect("driver should notice the cancellation");

    assert_eq!(state.meeting_snapshot().unwrap().elapsed_seconds, 10);
}

#[tokio::test(start_paused = true)]
async fn manual_skip_and_ticks_share_the_clock() {
    let (state, scrum_id) = state_with(&["A", "B", "C", "D"], 10.0);
    let _handle = start_meeting(Arc::clone(&state), scrum_id).unwrap();

    tokio::time::sleep(Duration::from_millis(20_500)).await;
    let view = state.advance_speaker().unwrap();
    assert_eq!(view.seconds_elapsed, "150");

    tokio::time::sleep(Duration::from_secs(5)).await;
    let view = state.meeting_view().unwrap();
    assert_eq!(view.seconds_elapsed, "155");
    assert_eq!(view.speaker_label, "Speaker 2 of 4");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn driver_and_controls_agree_on_final_snapshot() {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Duration::from_millis(1),
        ScrumStore::with_samples(),
    ));
    // Web Dev: 10 speakers, so skips keep the meeting running
    let handle = start_meeting(Arc::clone(&state), 3).unwrap();

    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(2)).await;
        state.advance_speaker().unwrap();
    }
    let cancelled = state.cancel_meeting().unwrap();

    tokio::time::timeout(Duration::from_secs(5), handle.join())
        .await
        .expect("driver should notice the cancellation");

    let snapshot = state.meeting_snapshot().unwrap();
    assert_eq!(cancelled.phase, TimerPhase::Cancelled);
    assert_eq!(snapshot.phase, TimerPhase::Cancelled);
    assert_eq!(snapshot.elapsed_seconds.to_string(), cancelled.seconds_elapsed);
}
