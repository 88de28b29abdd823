//! State management module
//! 
//! This module holds the scrum catalogue and the running meeting.

pub mod app_state;
pub mod meeting_state;
pub mod scrum_store;

// Re-export main types
pub use app_state::AppState;
pub use meeting_state::{ActiveMeeting, MeetingEvent};
pub use scrum_store::ScrumStore;
