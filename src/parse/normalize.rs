//! Text normalisation: coerce free-form model output into valid JSON.
//!
//! ## Why is normalisation necessary?
//!
//! Even well-prompted models wrap the requested JSON in artefacts that
//! break a strict parser:
//!
//! - ` ```json ... ``` ` fences, despite the prompt saying "JSON only"
//! - Reasoning prose before and after the payload
//! - Python-flavoured single quotes: `{'label': 'cat'}`
//! - Trailing commas: `[{"point_2d": [0.5, 0.5]},]`
//!
//! Three cheap regex repairs run in a fixed order, then exactly one
//! parse attempt is made. The repairs are textual, not grammar-aware —
//! the quote rewrite will corrupt a double-quoted string that contains
//! two apostrophes (`"it's o'clock"`). That blunt behaviour is kept
//! intentionally: a tokenizer-grade repair would accept different inputs
//! than the reference tooling this crate mirrors.
//!
//! ## Rule Order
//!
//! Fence extraction runs first so the repairs only see the payload, not
//! the surrounding prose. Quote repair and comma stripping follow in the
//! reference order; each is applied once, and the single parse attempt
//! comes last.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::parse::Payload;

// ── Rule 1: Isolate the first fenced block ───────────────────────────────────

static RE_JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());

fn isolate_fenced_block(input: &str) -> &str {
    match RE_JSON_FENCE.captures(input) {
        Some(caps) => caps.get(1).map_or(input, |m| m.as_str()),
        None => input,
    }
}

// ── Rule 2: Rewrite single-quoted spans ──────────────────────────────────────

static RE_SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([^']*)'").unwrap());

fn repair_quotes(input: &str) -> String {
    RE_SINGLE_QUOTED.replace_all(input, "\"$1\"").to_string()
}

// ── Rule 3: Strip trailing commas ────────────────────────────────────────────

static RE_TRAILING_COMMA_OBJ: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());
static RE_TRAILING_COMMA_ARR: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());

fn strip_trailing_commas(input: &str) -> String {
    let s = RE_TRAILING_COMMA_OBJ.replace_all(input, "}");
    RE_TRAILING_COMMA_ARR.replace_all(&s, "]").to_string()
}

/// Coerce arbitrary model text into a parsed [`Payload`].
///
/// Applies the repair rules in order, then makes exactly one parse
/// attempt. A parse failure is logged at WARN and returned as
/// [`Payload::Absent`] — it is never an error to the caller, who must
/// treat it identically to empty input.
pub fn normalize(text: &str) -> Payload {
    let working = isolate_fenced_block(text);
    if working.len() != text.len() {
        debug!("isolated fenced block ({} of {} bytes)", working.len(), text.len());
    }

    let repaired = repair_quotes(working);
    let repaired = strip_trailing_commas(&repaired);

    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => Payload::from_value(value),
        Err(e) => {
            warn!("JSON parse failed: {e}");
            Payload::Absent
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
