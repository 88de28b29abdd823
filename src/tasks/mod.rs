//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod meeting_timer;

// Re-export main functions
pub use meeting_timer::{meeting_timer_task, start_meeting, TimerHandle};
