//! Overlay rendering: scale normalized records to pixels and draw them.
//!
//! This is a consumer of the parse stage with no feedback into it — the
//! extractors hand over two parallel sequences and the renderer walks
//! them once. Drawing primitives come from `imageproc`, label text from
//! `ab_glyph`; both clip at the image bounds, so malformed geometry can
//! at worst draw nothing.

pub mod overlay;
pub mod palette;

pub use overlay::{draw_boxes, draw_points};
pub use palette::{color_for, PALETTE};
