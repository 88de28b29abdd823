//! Display data derived from a record and a timer snapshot
//!
//! Everything here is a pure function of its inputs, so renderers can call it
//! as often as they like.

use serde::{Deserialize, Serialize};

use super::{TimerPhase, TimerSnapshot};
use crate::scrum::{Color, ScrumRecord};

/// Share of the meeting already spent, in [0, 1]
pub fn progress_fraction(snapshot: &TimerSnapshot) -> f64 {
    if snapshot.total_seconds == 0 {
        return 0.0;
    }
    (snapshot.elapsed_seconds as f64 / snapshot.total_seconds as f64).clamp(0.0, 1.0)
}

pub fn current_speaker_label(snapshot: &TimerSnapshot) -> String {
    format!(
        "Speaker {} of {}",
        snapshot.active_speaker_index + 1,
        snapshot.attendee_count
    )
}

pub fn elapsed_label(snapshot: &TimerSnapshot) -> String {
    snapshot.elapsed_seconds.to_string()
}

pub fn remaining_label(snapshot: &TimerSnapshot) -> String {
    snapshot.seconds_remaining().to_string()
}

pub fn speaker_remaining_label(snapshot: &TimerSnapshot) -> String {
    snapshot.speaker_seconds_remaining().to_string()
}

pub fn current_speaker_name<'a>(record: &'a ScrumRecord, snapshot: &TimerSnapshot) -> Option<&'a str> {
    record
        .attendees
        .get(snapshot.active_speaker_index)
        .map(String::as_str)
}

/// Everything the meeting screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingView {
    pub scrum_id: u64,
    pub title: String,
    pub color: Color,
    pub phase: TimerPhase,
    pub progress: f64,
    pub seconds_elapsed: String,
    pub seconds_remaining: String,
    pub speaker_label: String,
    pub speaker_name: Option<String>,
    pub speaker_seconds_remaining: String,
}

impl MeetingView {
    pub fn project(record: &ScrumRecord, snapshot: &TimerSnapshot) -> Self {
        Self {
            scrum_id: record.id,
            title: record.title.clone(),
            color: record.color,
            phase: snapshot.phase,
            progress: progress_fraction(snapshot),
            seconds_elapsed: elapsed_label(snapshot),
            seconds_remaining: remaining_label(snapshot),
            speaker_label: current_speaker_label(snapshot),
            speaker_name: current_speaker_name(record, snapshot).map(str::to_string),
            speaker_seconds_remaining: speaker_remaining_label(snapshot),
        }
    }
}

/// Summary row in the scrum list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: u64,
    pub title: String,
    pub color: Color,
    pub attendee_count: usize,
    pub length_label: String,
}

impl CardView {
    pub fn project(record: &ScrumRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            color: record.color,
            attendee_count: record.attendee_count(),
            length_label: format!("{} minutes", record.length_in_minutes),
        }
    }
}
