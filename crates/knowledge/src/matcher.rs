//! Content matcher: picks display items whose keyword occurs in the
//! question or the answer.
//!
//! Matching is plain case-insensitive substring containment against
//! `lowercase(question + answer)`. There is no ranking and no deduplication;
//! output order is events, schedules, directions, sports, each in store order.

use crate::store::KnowledgeStore;
use crate::types::{DisplayItem, MatchCategory};

/// Keyword that opens the schedule section even when no day is named.
const SCHEDULE_KEYWORD: &str = "schedule";

/// Select display items for a question/answer pair.
///
/// # Example
/// ```
/// use campus_knowledge::{match_content, KnowledgeStore};
///
/// let store = KnowledgeStore::from_json_str(
///     r#"{"events": [{"title": "Tech Fest", "image": "tf.png"}],
///         "schedules": {}, "directions": {}, "sports": {}}"#,
/// ).unwrap();
///
/// let items = match_content("When is the Tech Fest?", "Tech Fest is on Friday.", &store);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].caption, "Tech Fest");
/// ```
pub fn match_content(question: &str, answer: &str, store: &KnowledgeStore) -> Vec<DisplayItem> {
    let text = format!("{}{}", question, answer).to_lowercase();
    let mut items = Vec::new();

    match_events(&text, store, &mut items);
    match_schedules(&text, store, &mut items);
    match_directions(&text, store, &mut items);
    match_sports(&text, store, &mut items);

    tracing::debug!(
        count = items.len(),
        text_len = text.len(),
        "Matched display items"
    );

    items
}

fn match_events(text: &str, store: &KnowledgeStore, items: &mut Vec<DisplayItem>) {
    for event in store.events() {
        if text.contains(&event.title.to_lowercase()) {
            items.push(DisplayItem::new(
                event.image.clone().unwrap_or_default(),
                event.title.clone(),
                MatchCategory::Event,
            ));
        }
    }
}

fn match_schedules(text: &str, store: &KnowledgeStore, items: &mut Vec<DisplayItem>) {
    // The guard is looser than the per-day test below: "schedule" alone opens
    // the section, but only days named in the text are emitted.
    let guard = text.contains(SCHEDULE_KEYWORD)
        || store
            .schedules()
            .iter()
            .any(|schedule| text.contains(schedule.day.as_str()));

    if !guard {
        return;
    }

    for schedule in store.schedules() {
        if text.contains(schedule.day.as_str()) {
            items.push(DisplayItem::new(
                schedule.image.clone().unwrap_or_default(),
                format!("Schedule: {}", capitalize(&schedule.day)),
                MatchCategory::Schedule,
            ));
        }
    }
}

fn match_directions(text: &str, store: &KnowledgeStore, items: &mut Vec<DisplayItem>) {
    for direction in store.directions() {
        if text.contains(&spaced(&direction.key)) {
            let caption = direction
                .info
                .as_deref()
                .filter(|info| !info.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| capitalize(&direction.key));

            items.push(DisplayItem::new(
                direction.image.clone().unwrap_or_default(),
                caption,
                MatchCategory::Direction,
            ));
        }
    }
}

fn match_sports(text: &str, store: &KnowledgeStore, items: &mut Vec<DisplayItem>) {
    for sport in store.sports() {
        let name = spaced(&sport.key);
        if text.contains(&name) {
            items.push(DisplayItem::new(
                sport.image.clone(),
                capitalize(&name),
                MatchCategory::Sport,
            ));
        }
    }
}

/// snake_case key to the words it is matched by.
fn spaced(key: &str) -> String {
    key.replace('_', " ")
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
