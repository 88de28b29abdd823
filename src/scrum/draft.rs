//! Edit buffer for creating or changing a scrum

use serde::{Deserialize, Serialize};

use super::{Color, ScrumRecord};
use crate::error::ValidationError;

/// Mutable draft behind the edit form.
///
/// Fields change freely while the form is open. `commit` validates the draft
/// and produces a record; cancelling the edit is just dropping the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrumDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Slider value; whole minutes once committed
    #[serde(default = "ScrumDraft::default_length")]
    pub length_in_minutes: f64,
    #[serde(default)]
    pub color: Color,
}

impl ScrumDraft {
    pub const LENGTH_STEP: f64 = 1.0;

    fn default_length() -> f64 {
        f64::from(ScrumRecord::MIN_LENGTH_MINUTES)
    }

    pub fn new() -> Self {
        Self {
            title: String::new(),
            attendees: Vec::new(),
            length_in_minutes: Self::default_length(),
            color: Color::default(),
        }
    }

    /// Seed a draft from an existing record
    pub fn from_record(record: &ScrumRecord) -> Self {
        Self {
            title: record.title.clone(),
            attendees: record.attendees.clone(),
            length_in_minutes: f64::from(record.length_in_minutes),
            color: record.color,
        }
    }

    /// Move the length slider; clamps to the allowed range and snaps to the step
    pub fn set_length(&mut self, minutes: f64) {
        let min = f64::from(ScrumRecord::MIN_LENGTH_MINUTES);
        let max = f64::from(ScrumRecord::MAX_LENGTH_MINUTES);
        let value = if minutes.is_nan() { min } else { minutes.clamp(min, max) };
        self.length_in_minutes = (value / Self::LENGTH_STEP).round() * Self::LENGTH_STEP;
    }

    pub fn length_label(&self) -> String {
        format!("{} minutes", self.length_in_minutes as i64)
    }

    pub fn add_attendee(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.attendees.push(name.to_string());
        true
    }

    pub fn remove_attendee(&mut self, index: usize) -> Option<String> {
        (index < self.attendees.len()).then(|| self.attendees.remove(index))
    }

    /// Validate the draft and turn it into a record with the given id
    pub fn commit(self, id: u64) -> Result<ScrumRecord, ValidationError> {
        // Float casts saturate, so NaN and negatives report as 0
        let minutes = self.length_in_minutes as u32;
        if self.length_in_minutes.fract() != 0.0 || self.length_in_minutes < 0.0 {
            return Err(ValidationError::InvalidLength { minutes });
        }

        let attendees = self
            .attendees
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let record = ScrumRecord::new(
            id,
            self.title.trim(),
            attendees,
            minutes,
            self.color,
        );
        record.validate()?;
        Ok(record)
    }
}

impl Default for ScrumDraft {
    fn default() -> Self {
        Self::new()
    }
}
