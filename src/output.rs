//! Output types: what an annotate call hands back.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// The records that survived extraction, as parallel sequences.
///
/// Coordinates and labels stay in separate vectors of equal length, in
/// the order the records were accepted from the payload. The vectors are
/// what the renderer consumes; serialising a `RecordSet` (e.g. for the
/// CLI's `--json` mode) emits the coordinates and labels, never pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RecordSet {
    /// `point_2d` records: normalized `[x, y]` pairs.
    Points {
        coords: Vec<[f64; 2]>,
        labels: Vec<String>,
    },
    /// `bbox_2d` records: normalized `[x_min, y_min, x_max, y_max]`.
    Boxes {
        coords: Vec<[f64; 4]>,
        labels: Vec<String>,
    },
}

impl RecordSet {
    /// Number of records in the set.
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Points { labels, .. } | RecordSet::Boxes { labels, .. } => labels.len(),
        }
    }

    /// True when no record survived extraction — a normal outcome for
    /// unparseable or empty model output, not an error.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The labels, one per record, in acceptance order.
    pub fn labels(&self) -> &[String] {
        match self {
            RecordSet::Points { labels, .. } | RecordSet::Boxes { labels, .. } => labels,
        }
    }
}

/// Result of an annotate call: the drawn image plus what was parsed.
#[derive(Debug, Clone)]
pub struct Annotated {
    /// The input image with overlays drawn on it. Unchanged pixels when
    /// `records` is empty.
    pub image: DynamicImage,
    /// The extracted records that were drawn.
    pub records: RecordSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_set_len_counts_labels() {
        let set = RecordSet::Points {
            coords: vec![[0.1, 0.2], [0.3, 0.4]],
            labels: vec!["a".into(), "b".into()],
        };
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn empty_set_is_normal() {
        let set = RecordSet::Boxes {
            coords: vec![],
            labels: vec![],
        };
        assert!(set.is_empty());
        assert_eq!(set.labels(), &[] as &[String]);
    }

    #[test]
    fn record_set_json_round_trip() {
        let set = RecordSet::Boxes {
            coords: vec![[0.0, 0.0, 1.0, 1.0]],
            labels: vec!["cat".into()],
        };
        let json = serde_json::to_string(&set).expect("must serialise");
        assert!(json.contains("\"kind\":\"boxes\""), "got: {json}");
        let back: RecordSet = serde_json::from_str(&json).expect("must deserialise");
        assert_eq!(back, set);
    }
}
