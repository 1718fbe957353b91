//! # vlm-annotate
//!
//! Draw point and bounding-box annotations produced by Vision Language
//! Models (VLMs) onto images.
//!
//! ## Why this crate?
//!
//! Grounding-capable VLMs (Qwen-VL, Gemini, GPT-4V with the right prompt)
//! answer "where is the cat?" with JSON-ish text — but only *ish*. The
//! payload arrives wrapped in code fences, surrounded by reasoning prose,
//! single-quoted, or with trailing commas. A strict JSON parser rejects a
//! large fraction of otherwise-usable answers. This crate repairs the text
//! with a fixed sequence of cheap heuristics, extracts the well-formed
//! records, skips the rest, and draws the survivors as overlays.
//!
//! ## Pipeline Overview
//!
//! ```text
//! model text
//!  │
//!  ├─ 1. Normalize  isolate ```json fence, fix quotes, strip trailing commas
//!  ├─ 2. Extract    walk the payload, keep well-formed point/box records
//!  └─ 3. Overlay    scale to pixels, draw markers + labels (image/imageproc)
//! ```
//!
//! Stages 1–2 never fail: unrecoverable text degrades to an empty record
//! set, and drawing nothing is a normal outcome. Only file I/O and font
//! loading return errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vlm_annotate::{annotate_to_file, Mode, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Single quotes and the trailing comma are repaired automatically;
//!     // fenced payloads and surrounding prose are handled too.
//!     let reply = "[{'bbox_2d': [0.12, 0.30, 0.45, 0.78], 'label': 'cat'},]";
//!     let config = RenderConfig::default();
//!     let out = annotate_to_file("photo.png", reply, Mode::Boxes, "photo.annotated.png", &config)?;
//!     eprintln!("drew {} records", out.records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Record Format
//!
//! A record is a JSON object carrying `point_2d` (`[x, y]`) or `bbox_2d`
//! (`[x_min, y_min, x_max, y_max]`) in normalized image coordinates, plus
//! an optional `label`. The payload may be a single object or an array of
//! objects. Anything malformed is skipped, not reported.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `vlm-annotate` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! vlm-annotate = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod annotate;
pub mod config;
pub mod error;
pub mod output;
pub mod parse;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use annotate::{annotate, annotate_image, annotate_to_file};
pub use config::{Mode, RenderConfig, RenderConfigBuilder};
pub use error::OverlayError;
pub use output::{Annotated, RecordSet};
pub use parse::{decode_boxes, decode_points, extract_boxes, extract_points, normalize, Payload};
