//! Structured-data recovery from free oracle text.
//!
//! The oracle is a generative text service: it wraps output in prose and
//! markdown fences, emits wrapper objects, or returns disjoint objects
//! with no enclosing array. Extraction is therefore layered rather than
//! a single strict parse:
//!
//! 1. Strip code-fence markers and try a direct parse.
//! 2. Scan every `[` with a string-aware depth counter and parse the
//!    first complete array found.
//! 3. Parse the first complete `{...}` and look for an array under a
//!    well-known wrapper key, then under any property.
//! 4. Sweep the text for a sequence of top-level `{...}` objects and
//!    return them as a list.
//!
//! Extraction is pure: the same text always yields the same output.

use serde_json::Value;
use thiserror::Error;

/// Extraction failure: the text contained no usable structured data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No parseable JSON array (or object sequence) was found.
    #[error("no parseable JSON array in oracle text")]
    NoArray,
    /// No parseable JSON object was found.
    #[error("no parseable JSON object in oracle text")]
    NoObject,
}

/// Wrapper keys checked before falling back to any array-valued property.
const WRAPPER_KEYS: [&str; 7] = [
    "results",
    "items",
    "data",
    "entries",
    "schedule",
    "timetable",
    "assignments",
];

/// Extracts a list of records from free text.
pub fn extract_array(text: &str) -> Result<Vec<Value>, ExtractionError> {
    let stripped = strip_fences(text);
    let trimmed = stripped.trim();

    // Direct parse of the whole text.
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(items);
    }

    // First complete, independently parseable array.
    for start in positions_of(trimmed, '[') {
        if let Some(span) = balanced_span(trimmed, start, '[', ']') {
            if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(span) {
                return Ok(items);
            }
        }
    }

    // Wrapper object with an array-valued property.
    if let Some(obj) = first_object(trimmed) {
        if let Some(items) = array_in_wrapper(&obj) {
            return Ok(items);
        }
    }

    // Sequence of top-level objects with no enclosing array.
    let objects = sweep_objects(trimmed);
    if !objects.is_empty() {
        return Ok(objects);
    }

    Err(ExtractionError::NoArray)
}

/// Extracts a single record from free text.
pub fn extract_object(text: &str) -> Result<Value, ExtractionError> {
    let stripped = strip_fences(text);
    let trimmed = stripped.trim();

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    first_object(trimmed).ok_or(ExtractionError::NoObject)
}

/// Removes markdown code-fence markers, keeping the fenced content.
fn strip_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
}

/// Byte offsets of every occurrence of `needle`.
fn positions_of(text: &str, needle: char) -> Vec<usize> {
    text.char_indices()
        .filter(|(_, c)| *c == needle)
        .map(|(i, _)| i)
        .collect()
}

/// Returns the span from `start` (which must sit on `open`) through the
/// matching `close`, counting depth while ignoring brackets inside string
/// literals and honoring escape sequences.
fn balanced_span(text: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// First complete, parseable top-level object in the text.
fn first_object(text: &str) -> Option<Value> {
    for start in positions_of(text, '{') {
        if let Some(span) = balanced_span(text, start, '{', '}') {
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(span) {
                return Some(value);
            }
        }
    }
    None
}

/// Array nested inside a wrapper object: well-known keys first, then any
/// array-valued property with at least one element.
fn array_in_wrapper(obj: &Value) -> Option<Vec<Value>> {
    let map = obj.as_object()?;
    for key in WRAPPER_KEYS {
        if let Some(Value::Array(items)) = map.get(key) {
            return Some(items.clone());
        }
    }
    map.values().find_map(|v| match v {
        Value::Array(items) if !items.is_empty() => Some(items.clone()),
        _ => None,
    })
}

/// Collects every top-level `{...}` object in reading order.
fn sweep_objects(text: &str) -> Vec<Value> {
    let mut objects = Vec::new();
    let mut cursor = 0usize;

    while let Some(rel) = text[cursor..].find('{') {
        let start = cursor + rel;
        match balanced_span(text, start, '{', '}') {
            Some(span) => {
                if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(span) {
                    cursor = start + span.len();
                    objects.push(value);
                } else {
                    cursor = start + 1;
                }
            }
            None => break,
        }
    }
    objects
}
