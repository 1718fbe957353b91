//! Top-level entry points: decode model text and draw it on an image.
//!
//! Three tiers, each a thin layer over the previous:
//!
//! * [`annotate_image`] — pure in-memory: decode + draw, no I/O
//! * [`annotate`]       — load the image from disk first
//! * [`annotate_to_file`] — also write the overlay out (atomic rename)
//!
//! Unusable model text is not an error at any tier: the result then
//! carries the unchanged image and an empty [`RecordSet`].

use crate::config::{Mode, RenderConfig};
use crate::error::OverlayError;
use crate::output::{Annotated, RecordSet};
use crate::{parse, render};
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, info};

/// Decode annotation records from `text` and draw them onto a copy of `img`.
///
/// The input image is not modified; drawing happens on an RGBA copy.
///
/// # Errors
/// Only font loading can fail here. Unparseable text yields an empty
/// record set and an unchanged image.
pub fn annotate_image(
    img: &DynamicImage,
    text: &str,
    mode: Mode,
    config: &RenderConfig,
) -> Result<Annotated, OverlayError> {
    let payload = parse::normalize(text);
    let mut canvas = img.to_rgba8();

    let records = match mode {
        Mode::Points => {
            let (coords, labels) = parse::extract_points(&payload);
            render::draw_points(&mut canvas, &coords, &labels, config)?;
            RecordSet::Points { coords, labels }
        }
        Mode::Boxes => {
            let (coords, labels) = parse::extract_boxes(&payload);
            render::draw_boxes(&mut canvas, &coords, &labels, config)?;
            RecordSet::Boxes { coords, labels }
        }
    };

    if records.is_empty() {
        info!("no records extracted; image returned unchanged");
    } else {
        info!("drew {} records", records.len());
    }

    Ok(Annotated {
        image: DynamicImage::ImageRgba8(canvas),
        records,
    })
}

/// Load the image at `path`, then decode and draw as [`annotate_image`].
///
/// # Errors
/// [`OverlayError::ImageNotFound`] / [`OverlayError::ImageDecode`] for
/// input problems, plus anything [`annotate_image`] can return.
pub fn annotate(
    path: impl AsRef<Path>,
    text: &str,
    mode: Mode,
    config: &RenderConfig,
) -> Result<Annotated, OverlayError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(OverlayError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path).map_err(|e| OverlayError::ImageDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(
        "loaded image '{}' ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );

    annotate_image(&img, text, mode, config)
}

/// Annotate the image at `input` and write the overlay to `output`.
///
/// Uses atomic write (temp file + rename) so a crash mid-encode never
/// leaves a truncated image behind. The output format follows the
/// `output` extension, defaulting to PNG when it is missing or unknown.
pub fn annotate_to_file(
    input: impl AsRef<Path>,
    text: &str,
    mode: Mode,
    output: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<Annotated, OverlayError> {
    let annotated = annotate(input, text, mode, config)?;
    write_image_atomic(&annotated.image, output.as_ref())?;
    Ok(annotated)
}

/// Encode `img` next to `path` and rename into place.
fn write_image_atomic(img: &DynamicImage, path: &Path) -> Result<(), OverlayError> {
    let format = image::ImageFormat::from_path(path).unwrap_or(image::ImageFormat::Png);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| OverlayError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp_path = path.with_extension("overlay.tmp");

    // JPEG has no alpha channel; flatten before encoding.
    let encode_result = match format {
        image::ImageFormat::Jpeg => {
            DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(&tmp_path, format)
        }
        _ => img.save_with_format(&tmp_path, format),
    };
    encode_result.map_err(OverlayError::ImageEncode)?;

    std::fs::rename(&tmp_path, path).map_err(|e| OverlayError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("wrote overlay to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([10, 10, 10, 255])))
    }

    #[test]
    fn annotate_image_preserves_dimensions() {
        let img = test_image();
        let out = annotate_image(
            &img,
            r#"[{"bbox_2d": [0.1, 0.1, 0.9, 0.9], "label": "cat"}]"#,
            Mode::Boxes,
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(out.image.width(), 64);
        assert_eq!(out.image.height(), 64);
        assert_eq!(out.records.labels(), &["cat".to_string()]);
    }

    #[test]
    fn garbage_text_returns_unchanged_image() {
        let img = test_image();
        let out = annotate_image(&img, "no json here", Mode::Points, &RenderConfig::default())
            .unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.image.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn annotate_missing_file_is_image_not_found() {
        let err = annotate(
            "/no/such/image.png",
            "[]",
            Mode::Points,
            &RenderConfig::default(),
        );
        assert!(matches!(err, Err(OverlayError::ImageNotFound { .. })));
    }

    #[test]
    fn annotate_non_image_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not_an_image.png");
        std::fs::write(&bogus, b"plain text").unwrap();

        let err = annotate(&bogus, "[]", Mode::Points, &RenderConfig::default());
        assert!(matches!(err, Err(OverlayError::ImageDecode { .. })));
    }

    #[test]
    fn write_is_atomic_and_readable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        test_image().save(&input).unwrap();
        let output = dir.path().join("out.png");

        let out = annotate_to_file(
            &input,
            r#"{"point_2d": [0.5, 0.5]}"#,
            Mode::Points,
            &output,
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(out.records.len(), 1);

        let reloaded = image::open(&output).unwrap();
        assert_eq!(reloaded.width(), 64);
        // No temp file left behind.
        assert!(!output.with_extension("overlay.tmp").exists());
    }

    #[test]
    fn jpeg_output_is_flattened_not_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        test_image().save(&input).unwrap();
        let output = dir.path().join("out.jpg");

        annotate_to_file(
            &input,
            r#"{"bbox_2d": [0.2, 0.2, 0.8, 0.8]}"#,
            Mode::Boxes,
            &output,
            &RenderConfig::default(),
        )
        .unwrap();
        assert!(output.exists());
    }
}
