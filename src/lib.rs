//! Scrum Timer - A state-managed HTTP server for daily scrum meetings
//! 
//! This library keeps a catalogue of scrums, runs one meeting at a time with
//! a countdown that rotates through the attendees, and projects the timer
//! state into the strings and fractions a meeting screen shows.

pub mod config;
pub mod error;
pub mod scrum;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ScrumError, ValidationError};
pub use scrum::{Color, ScrumDraft, ScrumRecord};
pub use timer::{MeetingView, TimerEngine, TimerPhase, TimerSnapshot};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
