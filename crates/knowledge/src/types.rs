//! Knowledge base record types and matcher output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A campus event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event title, matched case-insensitively against question and answer
    pub title: String,

    /// Poster image path or URL
    #[serde(default)]
    pub image: Option<String>,

    /// Any other descriptive fields (date, venue, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Timetable image for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Lowercase day identifier (e.g. "monday"), taken from the mapping key
    #[serde(skip)]
    pub day: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A campus location with an optional map image and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    /// snake_case location key (e.g. "main_gate")
    #[serde(skip)]
    pub key: String,

    #[serde(default)]
    pub image: Option<String>,

    /// Human-readable directions, preferred as the caption
    #[serde(default)]
    pub info: Option<String>,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A sport and its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    /// snake_case sport key (e.g. "basket_ball")
    pub key: String,

    pub image: String,
}

/// Knowledge base section a display item was matched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Event,
    Schedule,
    Direction,
    Sport,
}

impl MatchCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Schedule => "schedule",
            Self::Direction => "direction",
            Self::Sport => "sport",
        }
    }
}

/// An image plus caption destined for the front end.
///
/// `image` may be empty when the knowledge base entry had none; the front
/// end decides whether to skip it or render a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub image: String,
    pub caption: String,
    pub category: MatchCategory,
}

impl DisplayItem {
    pub fn new(
        image: impl Into<String>,
        caption: impl Into<String>,
        category: MatchCategory,
    ) -> Self {
        Self {
            image: image.into(),
            caption: caption.into(),
            category,
        }
    }

    /// Whether the item carries an image reference.
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}

/// Entry counts per knowledge base section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    pub events: usize,
    pub schedules: usize,
    pub directions: usize,
    pub sports: usize,
}

impl KnowledgeStats {
    pub fn total(&self) -> usize {
        self.events + self.schedules + self.directions + self.sports
    }
}
