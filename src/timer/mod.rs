//! Meeting timer engine and the view projections built on it

pub mod engine;
pub mod projection;

pub use engine::{TickOutcome, TimerEngine, TimerPhase, TimerSnapshot};
pub use projection::{CardView, MeetingView};
