//! Campus knowledge store.
//!
//! The store is loaded once at startup and never mutated. It is shared with
//! the prompt builder and the content matcher through `Arc<KnowledgeStore>`.

use crate::types::{DaySchedule, Direction, Event, KnowledgeStats, Sport};
use campus_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Top-level sections every knowledge base must carry, in prompt order.
pub const REQUIRED_SECTIONS: [&str; 4] = ["events", "schedules", "directions", "sports"];

/// Immutable in-memory campus knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    events: Vec<Event>,
    schedules: Vec<DaySchedule>,
    directions: Vec<Direction>,
    sports: Vec<Sport>,

    /// Raw JSON of exactly the four sections, sent to the LLM
    snapshot: Map<String, Value>,
}

impl KnowledgeStore {
    /// Load a knowledge base from a JSON or YAML file.
    ///
    /// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as
    /// JSON. Either all four sections load or the whole call fails.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::Load(format!(
                "Knowledge base not found at {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Load(format!("Failed to read knowledge base {:?}: {}", path, e))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let value: Value = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| {
                AppError::Load(format!("Failed to parse knowledge base {:?}: {}", path, e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                AppError::Load(format!("Failed to parse knowledge base {:?}: {}", path, e))
            })?
        };

        let store = Self::from_value(value)?;
        let stats = store.stats();

        tracing::info!(
            events = stats.events,
            schedules = stats.schedules,
            directions = stats.directions,
            sports = stats.sports,
            "Loaded knowledge base from {:?}",
            path
        );

        Ok(store)
    }

    /// Parse a knowledge base from a JSON string.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AppError::Load(format!("Failed to parse knowledge base: {}", e)))?;
        Self::from_value(value)
    }

    /// Build a store from an already parsed document.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let root = match value {
            Value::Object(map) => map,
            other => {
                return Err(AppError::Load(format!(
                    "Knowledge base must be a mapping at the top level, found {}",
                    value_kind(&other)
                )))
            }
        };

        let missing: Vec<&str> = REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|section| !root.contains_key(*section))
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Load(format!(
                "Knowledge base is missing required section(s): {}",
                missing.join(", ")
            )));
        }

        let events = parse_events(&root["events"])?;

        let schedules = parse_mapping("schedules", &root["schedules"], |mut entry: DaySchedule, key| {
            entry.day = key;
            entry
        })?;

        let directions = parse_mapping("directions", &root["directions"], |mut entry: Direction, key| {
            entry.key = key;
            entry
        })?;

        let sports = parse_mapping("sports", &root["sports"], |image: String, key| Sport {
            key,
            image,
        })?;

        let ignored = root
            .keys()
            .filter(|k| !REQUIRED_SECTIONS.contains(&k.as_str()))
            .count();
        if ignored > 0 {
            tracing::debug!("Ignoring {} extra top-level section(s)", ignored);
        }

        let snapshot = REQUIRED_SECTIONS
            .iter()
            .map(|section| (section.to_string(), root[*section].clone()))
            .collect();

        Ok(Self {
            events,
            schedules,
            directions,
            sports,
            snapshot,
        })
    }

    /// Events in source order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Day schedules in source order.
    pub fn schedules(&self) -> &[DaySchedule] {
        &self.schedules
    }

    /// Directions in source order.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Sports in source order.
    pub fn sports(&self) -> &[Sport] {
        &self.sports
    }

    /// The `events`, `schedules`, `directions` and `sports` sections exactly
    /// as they appeared in the source, in that order.
    pub fn snapshot(&self) -> &Map<String, Value> {
        &self.snapshot
    }

    /// Serialize the snapshot as compact JSON for the prompt.
    pub fn snapshot_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(&self.snapshot)?)
    }

    pub fn stats(&self) -> KnowledgeStats {
        KnowledgeStats {
            events: self.events.len(),
            schedules: self.schedules.len(),
            directions: self.directions.len(),
            sports: self.sports.len(),
        }
    }
}

fn parse_events(value: &Value) -> AppResult<Vec<Event>> {
    let items = value.as_array().ok_or_else(|| {
        AppError::Load(format!(
            "Section 'events' must be a sequence, found {}",
            value_kind(value)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let event: Event = serde_json::from_value(item.clone())
                .map_err(|e| AppError::Load(format!("Invalid entry events[{}]: {}", i, e)))?;

            if event.title.trim().is_empty() {
                return Err(AppError::Load(format!(
                    "Invalid entry events[{}]: title cannot be empty",
                    i
                )));
            }

            Ok(event)
        })
        .collect()
}

/// Deserialize every value of a mapping section, keeping source order.
fn parse_mapping<T, R, F>(section: &str, value: &Value, attach: F) -> AppResult<Vec<R>>
where
    T: DeserializeOwned,
    F: Fn(T, String) -> R,
{
    let entries = value.as_object().ok_or_else(|| {
        AppError::Load(format!(
            "Section '{}' must be a mapping, found {}",
            section,
            value_kind(value)
        ))
    })?;

    entries
        .iter()
        .map(|(key, entry)| {
            let parsed: T = serde_json::from_value(entry.clone()).map_err(|e| {
                AppError::Load(format!("Invalid entry {}.{}: {}", section, key, e))
            })?;
            Ok(attach(parsed, key.clone()))
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "college": {"name": "Example College"},
        "events": [
            {"title": "Tech Fest", "image": "tf.png", "date": "March 1"},
            {"title": "Cultural Night", "image": "cn.png"}
        ],
        "schedules": {
            "monday": {"image": "mon.png"},
            "tuesday": {"image": "tue.png"}
        },
        "directions": {
            "main_gate": {"image": "gate.png", "info": "Near Block A"},
            "library": {"info": "Second floor, admin block"}
        },
        "sports": {
            "basket_ball": "bb.png",
            "cricket": "cricket.png"
        }
    }"#;

    fn load_err(json: &str) -> String {
        match KnowledgeStore::from_json_str(json) {
            Err(AppError::Load(msg)) => msg,
            Err(other) => panic!("Expected load error, got {:?}", other),
            Ok(_) => panic!("Expected load error, got a store"),
        }
    }

    #[test]
    fn test_from_json_str_preserves_order() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();

        let days: Vec<&str> = store.schedules().iter().map(|s| s.day.as_str()).collect();
        assert_eq!(days, vec!["monday", "tuesday"]);

        let keys: Vec<&str> = store.directions().iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["main_gate", "library"]);

        assert_eq!(store.sports()[0].key, "basket_ball");
        assert_eq!(store.sports()[0].image, "bb.png");
        assert_eq!(store.events()[1].title, "Cultural Night");
    }

    #[test]
    fn test_snapshot_has_exactly_four_sections() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();
        let keys: Vec<&str> = store.snapshot().keys().map(String::as_str).collect();
        assert_eq!(keys, REQUIRED_SECTIONS.to_vec());

        let json = store.snapshot_json().unwrap();
        assert!(!json.contains("college"));
        assert!(json.contains("\"date\":\"March 1\""));
    }

    #[test]
    fn test_stats() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();
        let stats = store.stats();
        assert_eq!(stats.events, 2);
        assert_eq!(stats.schedules, 2);
        assert_eq!(stats.directions, 2);
        assert_eq!(stats.sports, 2);
        assert_eq!(stats.total(), 8);
    }

    #[test]
    fn test_missing_sections_are_named() {
        let msg = load_err(r#"{"events": [], "schedules": {}}"#);
        assert!(msg.contains("directions"));
        assert!(msg.contains("sports"));
        assert!(!msg.contains("events,"));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let msg = load_err("[1, 2, 3]");
        assert!(msg.contains("mapping"));
    }

    #[test]
    fn test_events_must_be_sequence() {
        let msg = load_err(r#"{"events": {}, "schedules": {}, "directions": {}, "sports": {}}"#);
        assert!(msg.contains("'events' must be a sequence"));
    }

    #[test]
    fn test_sections_must_be_mappings() {
        let msg = load_err(r#"{"events": [], "schedules": [], "directions": {}, "sports": {}}"#);
        assert!(msg.contains("'schedules' must be a mapping"));
    }

    #[test]
    fn test_empty_event_title_rejected() {
        let msg = load_err(
            r#"{"events": [{"title": "  ", "image": "x.png"}], "schedules": {}, "directions": {}, "sports": {}}"#,
        );
        assert!(msg.contains("events[0]"));
    }

    #[test]
    fn test_sport_value_must_be_string() {
        let msg = load_err(
            r#"{"events": [], "schedules": {}, "directions": {}, "sports": {"cricket": {"image": "c.png"}}}"#,
        );
        assert!(msg.contains("sports.cricket"));
    }

    #[test]
    fn test_empty_sections_are_valid() {
        let store = KnowledgeStore::from_json_str(
            r#"{"events": [], "schedules": {}, "directions": {}, "sports": {}}"#,
        )
        .unwrap();
        assert_eq!(store.stats().total(), 0);
    }

    #[test]
    fn test_load_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("campus_data.json");
        fs::write(&path, SAMPLE).unwrap();

        let store = KnowledgeStore::load(&path).unwrap();
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn test_load_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("campus.yaml");
        fs::write(
            &path,
            r#"
events:
  - title: Tech Fest
    image: tf.png
schedules:
  friday:
    image: fri.png
directions:
  main_gate:
    info: Near Block A
sports:
  foot_ball: fb.png
"#,
        )
        .unwrap();

        let store = KnowledgeStore::load(&path).unwrap();
        assert_eq!(store.schedules()[0].day, "friday");
        assert_eq!(store.directions()[0].image, None);
        assert_eq!(store.sports()[0].image, "fb.png");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = KnowledgeStore::load(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("campus_data.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(KnowledgeStore::load(&path), Err(AppError::Load(_))));
    }
}
