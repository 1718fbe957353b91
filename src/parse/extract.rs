//! Record extraction: walk a [`Payload`] and keep the well-formed records.
//!
//! Both extractors share one contract: two parallel sequences of equal
//! length, in acceptance order, both empty for [`Payload::Absent`]. A
//! malformed element — missing key, wrong arity, non-numeric coordinate —
//! is skipped entirely: no partial record, no slot consumed, no report.
//! The synthesized fallback labels (`point_3`, `bbox_1`) therefore number
//! the *accepted* records, not the input positions.
//!
//! Nothing here validates geometry. Coordinates outside `[0, 1]` and
//! boxes with `x_max < x_min` pass through untouched; what to do with
//! them is the renderer's decision.

use serde_json::{Map, Value};
use tracing::debug;

use crate::parse::Payload;

/// Key carrying a 2-element `[x, y]` coordinate pair.
const POINT_KEY: &str = "point_2d";
/// Key carrying a 4-element `[x_min, y_min, x_max, y_max]` array.
const BOX_KEY: &str = "bbox_2d";
/// Optional record label, any JSON scalar.
const LABEL_KEY: &str = "label";

/// Extract point records from a payload.
///
/// Returns `(points, labels)` with `points[i]` as normalized `[x, y]`
/// and `labels[i]` its label — explicit when the record has one,
/// `point_<k>` (1-indexed over accepted records) otherwise.
pub fn extract_points(payload: &Payload) -> (Vec<[f64; 2]>, Vec<String>) {
    let mut points: Vec<[f64; 2]> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for record in candidate_records(payload) {
        let Some(coords) = record.get(POINT_KEY).and_then(read_coords::<2>) else {
            continue;
        };
        points.push(coords);
        labels.push(label_for(record, "point", points.len()));
    }

    debug!("extracted {} point records", points.len());
    (points, labels)
}

/// Extract bounding-box records from a payload.
///
/// Same contract as [`extract_points`], with 4-element coordinates under
/// `bbox_2d` and `bbox_<k>` fallback labels. No ordering is enforced
/// among the four values.
pub fn extract_boxes(payload: &Payload) -> (Vec<[f64; 4]>, Vec<String>) {
    let mut boxes: Vec<[f64; 4]> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for record in candidate_records(payload) {
        let Some(coords) = record.get(BOX_KEY).and_then(read_coords::<4>) else {
            continue;
        };
        boxes.push(coords);
        labels.push(label_for(record, "bbox", boxes.len()));
    }

    debug!("extracted {} box records", boxes.len());
    (boxes, labels)
}

/// Iterate the candidate records of a payload: `Single` is a one-element
/// sequence, `Many` yields its object elements, `Absent` yields nothing.
fn candidate_records(payload: &Payload) -> Box<dyn Iterator<Item = &Map<String, Value>> + '_> {
    match payload {
        Payload::Single(map) => Box::new(std::iter::once(map)),
        Payload::Many(items) => Box::new(items.iter().filter_map(Value::as_object)),
        Payload::Absent => Box::new(std::iter::empty()),
    }
}

/// Read an exactly-N-element coordinate array.
///
/// A coordinate coerces from a JSON number or a string that parses as
/// `f64`; booleans and null do not coerce. Any failure rejects the whole
/// array.
fn read_coords<const N: usize>(value: &Value) -> Option<[f64; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut coords = [0.0; N];
    for (slot, item) in coords.iter_mut().zip(items) {
        *slot = as_coord(item)?;
    }
    Some(coords)
}

fn as_coord(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The record's explicit label, or the synthesized `<kind>_<count>`.
///
/// `count` is the 1-based number of records accepted so far, including
/// the one being labelled. A non-string scalar label is rendered as its
/// JSON text (`"3"`, `"true"`).
fn label_for(record: &Map<String, Value>, kind: &str, count: usize) -> String {
    match record.get(LABEL_KEY) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => format!("{kind}_{count}"),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
