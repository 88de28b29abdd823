//! Meeting countdown and speaker rotation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::ScrumError, scrum::ScrumRecord};

/// Lifecycle of a single meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl TimerPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, TimerPhase::Completed | TimerPhase::Cancelled)
    }
}

/// What a `tick` or `advance_speaker` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time moved, meeting still running
    Advanced,
    /// This call finished the meeting; returned only once per meeting
    Completed,
    /// Engine was not running, nothing changed
    Ignored,
}

/// Point-in-time copy of the engine state handed to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub total_seconds: u64,
    pub per_speaker_seconds: u64,
    pub elapsed_seconds: u64,
    pub active_speaker_index: usize,
    pub attendee_count: usize,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.total_seconds - self.elapsed_seconds
    }

    /// First second of the given speaker's slot
    pub fn speaker_start(&self, index: usize) -> u64 {
        self.per_speaker_seconds * index as u64
    }

    /// Length of the given speaker's slot; the last one absorbs the remainder
    pub fn speaker_slot_seconds(&self, index: usize) -> u64 {
        if index + 1 >= self.attendee_count {
            self.total_seconds - self.speaker_start(self.attendee_count - 1)
        } else {
            self.per_speaker_seconds
        }
    }

    pub fn speaker_seconds_remaining(&self) -> u64 {
        let end = self.speaker_start(self.active_speaker_index)
            + self.speaker_slot_seconds(self.active_speaker_index);
        end.saturating_sub(self.elapsed_seconds)
    }
}

/// Countdown for one meeting. Owns its copy of the record.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    record: ScrumRecord,
    state: TimerSnapshot,
}

impl TimerEngine {
    /// Build an idle engine for a validated record
    pub fn prepare(record: ScrumRecord) -> Result<Self, ScrumError> {
        record.validate()?;

        let total_seconds = record.total_seconds();
        let attendee_count = record.attendee_count();
        let state = TimerSnapshot {
            phase: TimerPhase::Idle,
            total_seconds,
            per_speaker_seconds: total_seconds / attendee_count as u64,
            elapsed_seconds: 0,
            active_speaker_index: 0,
            attendee_count,
        };

        Ok(Self { record, state })
    }

    /// Build an engine and put it straight into `Running`
    pub fn start(record: ScrumRecord) -> Result<Self, ScrumError> {
        let mut engine = Self::prepare(record)?;
        engine.begin();
        Ok(engine)
    }

    /// Idle -> Running; anything else is left alone
    pub fn begin(&mut self) -> bool {
        if self.state.phase != TimerPhase::Idle {
            return false;
        }
        debug!(
            "Meeting '{}' started: {}s total, {}s per speaker",
            self.record.title, self.state.total_seconds, self.state.per_speaker_seconds
        );
        self.state.phase = TimerPhase::Running;
        true
    }

    pub fn tick(&mut self, delta_seconds: u64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        let elapsed = self
            .state
            .elapsed_seconds
            .saturating_add(delta_seconds)
            .min(self.state.total_seconds);
        self.set_elapsed(elapsed)
    }

    /// Skip to the next speaker's slot, or finish when on the last one
    pub fn advance_speaker(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        let next = self.state.active_speaker_index + 1;
        let target = if next >= self.state.attendee_count {
            self.state.total_seconds
        } else {
            self.state.speaker_start(next)
        };
        self.set_elapsed(target.max(self.state.elapsed_seconds))
    }

    pub fn cancel(&mut self) {
        if self.state.phase.is_terminal() {
            return;
        }
        debug!("Meeting '{}' cancelled at {}s", self.record.title, self.state.elapsed_seconds);
        self.state.phase = TimerPhase::Cancelled;
    }

    fn set_elapsed(&mut self, elapsed: u64) -> TickOutcome {
        self.state.elapsed_seconds = elapsed;
        self.state.active_speaker_index = self.speaker_at(elapsed);

        if elapsed >= self.state.total_seconds {
            self.state.phase = TimerPhase::Completed;
            debug!("Meeting '{}' completed", self.record.title);
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        }
    }

    fn speaker_at(&self, elapsed: u64) -> usize {
        let index = (elapsed / self.state.per_speaker_seconds) as usize;
        index.min(self.state.attendee_count - 1)
    }

    pub fn record(&self) -> &ScrumRecord {
        &self.record
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn seconds_elapsed(&self) -> u64 {
        self.state.elapsed_seconds
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.state.seconds_remaining()
    }

    pub fn active_speaker_index(&self) -> usize {
        self.state.active_speaker_index
    }
}
