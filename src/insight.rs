//! Recover a display string from an insight response body.
//!
//! The insight endpoint has no fixed contract. Observed bodies are a JSON
//! object carrying `insight` or `message`, a JSON string that wraps another
//! JSON document, and plain text. Interpretation never fails: anything
//! unusable collapses to [`NO_INSIGHT_FOUND`].

use serde_json::{Map, Value};
use tracing::debug;

/// Shown when a response carries nothing displayable.
pub const NO_INSIGHT_FOUND: &str = "No AI insight found.";
/// Shown when the request itself failed.
pub const INSIGHT_ERROR: &str = "Error getting AI insight.";
/// Placeholder while a chart-point request is in flight.
pub const INSIGHT_LOADING: &str = "Loading AI insight...";

/// Where the displayed text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightSource {
    /// The `insight` field of a decoded object.
    InsightField,
    /// The `message` field of a decoded object.
    MessageField,
    /// Textual form of a decoded value with neither field.
    DecodedValue,
    /// A decoded JSON string used literally.
    DecodedString,
    /// The body was not JSON and is shown verbatim.
    RawText,
    /// Nothing usable; [`NO_INSIGHT_FOUND`].
    Fallback,
}

/// Outcome of interpreting one body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpretation {
    pub text: String,
    pub source: InsightSource,
}

impl Interpretation {
    fn new(text: impl Into<String>, source: InsightSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    fn fallback() -> Self {
        Self::new(NO_INSIGHT_FOUND, InsightSource::Fallback)
    }
}

/// One decode attempt.
enum Layer {
    Object(Map<String, Value>),
    Text(String),
    Scalar(Value),
    Null,
    Undecodable,
}

fn decode(text: &str) -> Layer {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Layer::Object(map),
        Ok(Value::String(inner)) => Layer::Text(inner),
        Ok(Value::Null) => Layer::Null,
        Ok(other) => Layer::Scalar(other),
        Err(_) => Layer::Undecodable,
    }
}

/// Interpret `body` and return only the display text.
pub fn interpret_insight(body: &str) -> String {
    interpret(body).text
}

/// Interpret `body`, reporting which branch produced the text.
///
/// A string result is decoded once more; a string found at that second level
/// is shown literally rather than decoded again.
pub fn interpret(body: &str) -> Interpretation {
    if body.trim().is_empty() {
        return Interpretation::fallback();
    }

    let layer = match decode(body) {
        Layer::Text(inner) => match decode(&inner) {
            Layer::Undecodable => return literal(inner),
            Layer::Text(again) => return literal(again),
            next => next,
        },
        first => first,
    };

    match layer {
        Layer::Object(map) => from_object(&map),
        Layer::Text(inner) => literal(inner),
        Layer::Scalar(value) => Interpretation::new(value.to_string(), InsightSource::DecodedValue),
        Layer::Null => Interpretation::fallback(),
        Layer::Undecodable => {
            debug!("Insight response is not JSON, showing it verbatim");
            Interpretation::new(body, InsightSource::RawText)
        }
    }
}

fn from_object(map: &Map<String, Value>) -> Interpretation {
    if let Some(text) = field_text(map, "insight") {
        return Interpretation::new(text, InsightSource::InsightField);
    }
    if let Some(text) = field_text(map, "message") {
        return Interpretation::new(text, InsightSource::MessageField);
    }
    if map.is_empty() {
        return Interpretation::fallback();
    }
    Interpretation::new(Value::Object(map.clone()).to_string(), InsightSource::DecodedValue)
}

/// Non-blank string fields are used as-is, other non-null scalars by their JSON text.
fn field_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn literal(text: String) -> Interpretation {
    if text.trim().is_empty() {
        return Interpretation::fallback();
    }
    Interpretation::new(text, InsightSource::DecodedString)
}
