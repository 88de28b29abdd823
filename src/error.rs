//! Error types shared across the crate

use thiserror::Error;

use crate::scrum::ScrumRecord;

/// Reasons a scrum record (or a committed draft) is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "meeting length must be between {} and {} minutes, got {minutes}",
        ScrumRecord::MIN_LENGTH_MINUTES,
        ScrumRecord::MAX_LENGTH_MINUTES
    )]
    InvalidLength { minutes: u32 },

    #[error("a meeting needs at least one attendee")]
    EmptyAttendees,

    #[error("{count} attendees cannot share a meeting; at most {max} fit")]
    TooManyAttendees { count: usize, max: usize },
}

/// Errors surfaced by the catalogue and meeting operations
#[derive(Debug, Error)]
pub enum ScrumError {
    #[error("invalid scrum record: {0}")]
    InvalidRecord(#[from] ValidationError),

    #[error("scrum {0} not found")]
    ScrumNotFound(u64),

    #[error("a meeting is already in progress")]
    MeetingInProgress,

    #[error("no meeting has been started")]
    NoActiveMeeting,

    #[error("failed to lock {0}")]
    StateLock(String),
}

impl ScrumError {
    pub(crate) fn lock<E: std::fmt::Display>(what: &str, e: E) -> Self {
        ScrumError::StateLock(format!("{}: {}", what, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_message_follows_record_limits() {
        let message = ValidationError::InvalidLength { minutes: 3 }.to_string();
        assert_eq!(
            message,
            format!(
                "meeting length must be between {} and {} minutes, got 3",
                ScrumRecord::MIN_LENGTH_MINUTES,
                ScrumRecord::MAX_LENGTH_MINUTES
            )
        );
    }
}
