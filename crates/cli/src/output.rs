//! Terminal rendering of answers and display items.
//!
//! Everything here writes to stdout; logs stay on stderr.

use crate::assistant::Answer;
use campus_core::AppResult;
use campus_knowledge::DisplayItem;
use serde::Serialize;

/// Print an answer followed by its display items.
pub fn print_answer(answer: &Answer, json: bool) -> AppResult<()> {
    if json {
        return print_json(answer);
    }

    println!("{}", answer.answer);
    if !answer.items.is_empty() {
        println!();
        print_items(&answer.items);
    }
    Ok(())
}

/// Print display items, one per line.
pub fn print_items(items: &[DisplayItem]) {
    if items.is_empty() {
        println!("No matching images.");
        return;
    }

    println!("Images:");
    for line in item_lines(items) {
        println!("{}", line);
    }
}

/// Pretty-print any serializable value as JSON.
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn item_lines(items: &[DisplayItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let image = if item.has_image() {
                item.image.as_str()
            } else {
                "(no image)"
            };
            format!("  [{}] {}: {}", item.category.as_str(), item.caption, image)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_knowledge::MatchCategory;

    #[test]
    fn test_item_lines() {
        let items = vec![
            DisplayItem::new("tf.png", "Tech Fest", MatchCategory::Event),
            DisplayItem::new("", "Library", MatchCategory::Direction),
        ];

        assert_eq!(
            item_lines(&items),
            vec![
                "  [event] Tech Fest: tf.png".to_string(),
                "  [direction] Library: (no image)".to_string(),
            ]
        );
    }

    #[test]
    fn test_print_json_answer() {
        let answer = Answer {
            answer: "Near Block A.".to_string(),
            items: vec![DisplayItem::new("gate.png", "Near Block A", MatchCategory::Direction)],
        };
        assert!(print_answer(&answer, true).is_ok());
    }
}
