//! Campus knowledge base.
//!
//! Loads the campus data file into a typed, read-only [`KnowledgeStore`] and
//! matches free text against it to pick images for the front end.

pub mod matcher;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use matcher::{capitalize, match_content};
pub use store::{KnowledgeStore, REQUIRED_SECTIONS};
pub use types::{
    DaySchedule, Direction, DisplayItem, Event, KnowledgeStats, MatchCategory, Sport,
};
