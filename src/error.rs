//! Error types for the vlm-annotate library.
//!
//! Only *fatal* conditions are represented here: the image cannot be
//! opened, the label font cannot be loaded, the output file cannot be
//! written. Everything on the text side — unparseable JSON, malformed
//! records, an empty result — is deliberately *not* an error. Model
//! output is unreliable by nature, so the parsing layer degrades to an
//! empty record set and the renderer draws nothing. Callers that need to
//! distinguish "nothing found" check [`crate::output::RecordSet::is_empty`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the vlm-annotate library.
///
/// Parse failures never appear here; they are logged at WARN and surface
/// as empty extractions.
#[derive(Debug, Error)]
pub enum OverlayError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input image was not found at the given path.
    #[error("Image file not found: '{path}'\nCheck the path exists and is readable.")]
    ImageNotFound { path: PathBuf },

    /// The file exists but could not be decoded as an image.
    #[error("Failed to decode image '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Font errors ───────────────────────────────────────────────────────
    /// The configured label font could not be read or parsed.
    #[error("Failed to load label font '{path}': {detail}\nProvide a TrueType/OpenType file, e.g. DejaVuSans.ttf.")]
    FontLoad { path: PathBuf, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Encoding the overlay image to the output format failed.
    #[error("Failed to encode overlay image: {0}")]
    ImageEncode(#[from] image::ImageError),

    /// Could not create or write the output image file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
