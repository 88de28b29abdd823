//! Scrum record structure and validation

use serde::{Deserialize, Serialize};

use super::Color;
use crate::error::ValidationError;

/// One daily scrum: who attends, in what order, and for how long
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrumRecord {
    pub id: u64,
    pub title: String,
    /// Speaking order
    pub attendees: Vec<String>,
    pub length_in_minutes: u32,
    pub color: Color,
}

impl ScrumRecord {
    pub const MIN_LENGTH_MINUTES: u32 = 5;
    pub const MAX_LENGTH_MINUTES: u32 = 30;

    pub fn new(
        id: u64,
        title: impl Into<String>,
        attendees: Vec<String>,
        length_in_minutes: u32,
        color: Color,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            attendees,
            length_in_minutes,
            color,
        }
    }

    /// Check the record can back a meeting
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(Self::MIN_LENGTH_MINUTES..=Self::MAX_LENGTH_MINUTES).contains(&self.length_in_minutes) {
            return Err(ValidationError::InvalidLength {
                minutes: self.length_in_minutes,
            });
        }

        if self.attendees.is_empty() {
            return Err(ValidationError::EmptyAttendees);
        }

        // Every speaker needs a slot of at least one second
        let max = self.total_seconds() as usize;
        if self.attendees.len() > max {
            return Err(ValidationError::TooManyAttendees {
                count: self.attendees.len(),
                max,
            });
        }

        Ok(())
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.length_in_minutes) * 60
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    /// Demo catalogue used to seed a fresh server
    pub fn samples() -> Vec<ScrumRecord> {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        vec![
            ScrumRecord::new(
                1,
                "Design",
                names(&["Cathy", "Daisy", "Simon", "Jonathan"]),
                10,
                Color::rgb(0xFF, 0xD6, 0x0A),
            ),
            ScrumRecord::new(
                2,
                "App Dev",
                names(&["Katie", "Gray", "Euna", "Luis", "Darla"]),
                5,
                Color::rgb(0xAF, 0x52, 0xDE),
            ),
            ScrumRecord::new(
                3,
                "Web Dev",
                names(&[
                    "Chella", "Chris", "Christina", "Eden", "Karla", "Lindsey", "Aga", "Chad",
                    "Jenn", "Sarah",
                ]),
                5,
                Color::rgb(0xFF, 0x95, 0x00),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(length: u32, attendees: &[&str]) -> ScrumRecord {
        ScrumRecord::new(
            7,
            "Standup",
            attendees.iter().map(|s| s.to_string()).collect(),
            length,
            Color::default(),
        )
    }

    #[test]
    fn accepts_bounds_of_length_range() {
        assert!(record(5, &["A"]).validate().is_ok());
        assert!(record(30, &["A"]).validate().is_ok());
    }

    #[test]
    fn rejects_length_outside_range() {
        assert_eq!(
            record(3, &["A"]).validate(),
            Err(ValidationError::InvalidLength { minutes: 3 })
        );
        assert_eq!(
            record(31, &["A"]).validate(),
            Err(ValidationError::InvalidLength { minutes: 31 })
        );
    }

    #[test]
    fn rejects_empty_attendees() {
        assert_eq!(record(15, &[]).validate(), Err(ValidationError::EmptyAttendees));
    }

    #[test]
    fn length_is_checked_before_attendees() {
        assert!(matches!(
            record(0, &[]).validate(),
            Err(ValidationError::InvalidLength { minutes: 0 })
        ));
    }

    #[test]
    fn rejects_more_attendees_than_seconds() {
        let mut r = record(5, &["A"]);
        r.attendees = (0..301).map(|i| format!("p{}", i)).collect();
        assert_eq!(
            r.validate(),
            Err(ValidationError::TooManyAttendees { count: 301, max: 300 })
        );

        r.attendees.pop();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn samples_are_valid_with_unique_ids() {
        let samples = ScrumRecord::samples();
        assert_eq!(samples.len(), 3);
        for sample in &samples {
            assert!(sample.validate().is_ok(), "{} should be valid", sample.title);
        }
        let mut ids: Vec<u64> = samples.iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
