//! Tolerant parsing of model output into annotation records.
//!
//! Each submodule implements exactly one transformation step, keeping
//! the stages independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! text ──▶ normalize ──▶ Payload ──▶ extract ──▶ (coords, labels)
//! (raw)    (repairs)    (tagged)    (points|boxes)
//! ```
//!
//! 1. [`normalize`] — isolate a ```json fence, repair quoting, strip
//!    trailing commas, parse; failures degrade to [`Payload::Absent`]
//! 2. [`extract`]   — walk the payload and keep the well-formed records,
//!    silently skipping the rest
//!
//! Both stages are pure functions of their input: no shared state, no
//! I/O, safe to call concurrently.

pub mod extract;
pub mod normalize;

pub use extract::{extract_boxes, extract_points};
pub use normalize::normalize;

use serde_json::{Map, Value};

/// Shape of a parsed annotation payload.
///
/// Models answer either with a single record object or with an array of
/// them. Rather than duck-typing at every use site, the shape is decided
/// once at the parse boundary. `Absent` covers both "nothing parseable"
/// and top-level values that cannot hold records (strings, numbers,
/// booleans, null) and behaves identically to empty input everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Top-level JSON object: one candidate record.
    Single(Map<String, Value>),
    /// Top-level JSON array: candidate records, still untyped — elements
    /// that are not objects are the extractor's concern.
    Many(Vec<Value>),
    /// No usable payload.
    Absent,
}

impl Payload {
    /// Classify a parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Payload::Single(map),
            Value::Array(items) => Payload::Many(items),
            _ => Payload::Absent,
        }
    }

    /// True when there is no payload to extract from.
    pub fn is_absent(&self) -> bool {
        matches!(self, Payload::Absent)
    }
}

/// Parse point records straight from raw model text.
///
/// Convenience wrapper chaining [`normalize`] and [`extract_points`].
/// Returns two parallel sequences of equal length, both empty when the
/// text holds nothing usable.
pub fn decode_points(text: &str) -> (Vec<[f64; 2]>, Vec<String>) {
    extract_points(&normalize(text))
}

/// Parse bounding-box records straight from raw model text.
///
/// See [`decode_points`]; same contract with 4-element coordinates.
pub fn decode_boxes(text: &str) -> (Vec<[f64; 4]>, Vec<String>) {
    extract_boxes(&normalize(text))
}
