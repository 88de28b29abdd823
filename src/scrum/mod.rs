//! Scrum records and the edit draft that produces them

pub mod color;
pub mod draft;
pub mod record;

pub use color::Color;
pub use draft::ScrumDraft;
pub use record::ScrumRecord;
