//! The meeting currently held by the server

use serde::{Deserialize, Serialize};

use crate::timer::{MeetingView, TimerEngine};

/// A started meeting and the id its driver task knows it by
#[derive(Debug, Clone)]
pub struct ActiveMeeting {
    pub meeting_id: u64,
    pub engine: TimerEngine,
}

impl ActiveMeeting {
    pub fn new(meeting_id: u64, engine: TimerEngine) -> Self {
        Self { meeting_id, engine }
    }

    pub fn view(&self) -> MeetingView {
        MeetingView::project(self.engine.record(), &self.engine.snapshot())
    }
}

/// Lifecycle notifications published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MeetingEvent {
    Started { meeting_id: u64, scrum_id: u64 },
    SpeakerChanged { meeting_id: u64, speaker_index: usize },
    Completed { meeting_id: u64 },
    Cancelled { meeting_id: u64 },
}
