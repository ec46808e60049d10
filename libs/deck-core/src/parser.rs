//! Deck payload parser.
//!
//! # Format
//! ```json
//! [
//!   { "front": "What is **Rust**?", "back": "A systems programming language." },
//!   { "front": "Euler", "back": "$e^{i\\pi} + 1 = 0$" }
//! ]
//! ```
//!
//! Fields other than `front` and `back` are ignored. A missing or `null` face
//! is read as an empty string.

use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::types::{Card, Deck};

/// Parse a raw deck payload into a validated, non-empty deck.
pub fn parse_deck(payload: &[u8]) -> Result<Deck> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::NotAList {
                found: json_kind(&other),
            })
        }
    };

    let cards = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_card(index, item))
        .collect::<Result<Vec<_>>>()?;

    Deck::new(cards)
}

fn parse_card(index: usize, item: &Value) -> Result<Card> {
    let object = item.as_object().ok_or_else(|| ValidationError::InvalidCard {
        index,
        reason: format!("expected an object, found {}", json_kind(item)),
    })?;

    Ok(Card {
        front: face_text(index, object, "front")?,
        back: face_text(index, object, "back")?,
    })
}

fn face_text(index: usize, object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(ValidationError::InvalidCard {
            index,
            reason: format!("`{}` must be a string, found {}", field, json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
