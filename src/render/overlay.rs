//! Drawing: point markers, hollow boxes, and label text.
//!
//! Coordinates arrive normalized; they are scaled by the image
//! dimensions and clamped into the canvas before any primitive is
//! touched. Scaling can produce anything — negative positions, inverted
//! boxes, centres far off-canvas — because the extractors pass geometry
//! through unvalidated. The rule here is: clamp, never panic, and let
//! the `imageproc` primitives clip whatever still hangs over the edge.

use ab_glyph::{FontVec, PxScale};
use image::RgbaImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::OverlayError;
use crate::render::palette;

// Label offsets relative to the marker, in pixels.
const POINT_LABEL_DX: i32 = -20;
const POINT_LABEL_DY: i32 = 6;
const BOX_LABEL_RAISE: i32 = 15;
const BOX_LABEL_DROP: i32 = 5;

/// Load the configured label font, if any.
///
/// `Ok(None)` means "no font configured" — markers are drawn without
/// label text. An unreadable or invalid font file is a fatal error, not
/// a silent downgrade.
pub(crate) fn load_font(config: &RenderConfig) -> Result<Option<FontVec>, OverlayError> {
    let Some(ref path) = config.font_path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path).map_err(|e| OverlayError::FontLoad {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| OverlayError::FontLoad {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    Ok(Some(font))
}

/// Draw one disc marker per point, with its label beside it.
///
/// `points` and `labels` are the parallel sequences produced by
/// [`crate::parse::extract_points`]; records are drawn in order, cycling
/// the palette. An empty slice is a no-op.
pub fn draw_points(
    img: &mut RgbaImage,
    points: &[[f64; 2]],
    labels: &[String],
    config: &RenderConfig,
) -> Result<(), OverlayError> {
    let font = load_font(config)?;
    if font.is_none() && !points.is_empty() {
        debug!("no label font configured; drawing markers only");
    }

    let (width, height) = img.dimensions();
    let scale = PxScale::from(config.font_size);

    for (i, (point, label)) in points.iter().zip(labels).enumerate() {
        let color = palette::color_for(i);
        let cx = to_pixel(point[0], width);
        let cy = to_pixel(point[1], height);

        draw_filled_circle_mut(img, (cx, cy), config.point_radius, color);

        if let Some(ref font) = font {
            let tx = (cx + POINT_LABEL_DX).max(0);
            let ty = (cy + POINT_LABEL_DY).max(0);
            draw_text_mut(img, color, tx, ty, scale, font, label);
        }
    }

    Ok(())
}

/// Draw one hollow rectangle per box, with its label above the top edge.
///
/// Same contract as [`draw_points`] with the sequences from
/// [`crate::parse::extract_boxes`]. Inverted or degenerate boxes collapse
/// to a 1-px rectangle at their anchor rather than failing.
pub fn draw_boxes(
    img: &mut RgbaImage,
    boxes: &[[f64; 4]],
    labels: &[String],
    config: &RenderConfig,
) -> Result<(), OverlayError> {
    let font = load_font(config)?;
    if font.is_none() && !boxes.is_empty() {
        debug!("no label font configured; drawing boxes only");
    }

    let (width, height) = img.dimensions();
    let scale = PxScale::from(config.font_size);

    for (i, (bbox, label)) in boxes.iter().zip(labels).enumerate() {
        let color = palette::color_for(i);
        let [x_min, y_min, x_max, y_max] = *bbox;

        let x0 = to_pixel(x_min, width);
        let y0 = to_pixel(y_min, height);
        let x1 = to_pixel(x_max, width);
        let y1 = to_pixel(y_max, height);

        let w = (x1 - x0).max(1);
        let h = (y1 - y0).max(1);

        // Nested rings, shrinking inwards, until the stroke is used up
        // or the rectangle would vanish.
        for t in 0..config.stroke_width as i32 {
            let rw = w - 2 * t;
            let rh = h - 2 * t;
            if rw < 1 || rh < 1 {
                break;
            }
            let rect = Rect::at(x0 + t, y0 + t).of_size(rw as u32, rh as u32);
            draw_hollow_rect_mut(img, rect, color);
        }

        if let Some(ref font) = font {
            // Above the top edge, unless the box touches the image top.
            let ty = if y0 > BOX_LABEL_RAISE {
                y0 - BOX_LABEL_RAISE
            } else {
                y0 + BOX_LABEL_DROP
            };
            draw_text_mut(img, color, x0, ty, scale, font, label);
        }
    }

    Ok(())
}

/// Scale a normalized coordinate by a dimension and clamp into bounds.
fn to_pixel(normalized: f64, dimension: u32) -> i32 {
    // `as` saturates, so even absurd coordinates stay finite.
    let px = (normalized * dimension as f64) as i32;
    px.clamp(0, dimension as i32 - 1)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn point_marker_colors_the_centre_pixel() {
        let mut img = blank(100, 100);
        let config = RenderConfig::default();
        draw_points(&mut img, &[[0.5, 0.5]], &["p".to_string()], &config).unwrap();
        assert_eq!(*img.get_pixel(50, 50), palette::color_for(0));
    }

    #[test]
    fn box_border_pixels_are_colored_interior_untouched() {
        let mut img = blank(100, 100);
        let config = RenderConfig::builder().stroke_width(1).build().unwrap();
        draw_boxes(
            &mut img,
            &[[0.1, 0.1, 0.9, 0.9]],
            &["b".to_string()],
            &config,
        )
        .unwrap();
        assert_eq!(*img.get_pixel(10, 10), palette::color_for(0));
        assert_eq!(*img.get_pixel(50, 10), palette::color_for(0));
        assert_eq!(*img.get_pixel(50, 50), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn second_record_uses_second_palette_color() {
        let mut img = blank(100, 100);
        let config = RenderConfig::default();
        draw_points(
            &mut img,
            &[[0.1, 0.1], [0.9, 0.9]],
            &["a".to_string(), "b".to_string()],
            &config,
        )
        .unwrap();
        assert_eq!(*img.get_pixel(10, 10), palette::color_for(0));
        assert_eq!(*img.get_pixel(90, 90), palette::color_for(1));
    }

    #[test]
    fn empty_records_leave_image_untouched() {
        let mut img = blank(20, 20);
        let before = img.clone();
        let config = RenderConfig::default();
        draw_points(&mut img, &[], &[], &config).unwrap();
        draw_boxes(&mut img, &[], &[], &config).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn out_of_range_coordinates_never_panic() {
        let mut img = blank(50, 50);
        let config = RenderConfig::default();
        draw_points(
            &mut img,
            &[[-3.0, 0.5], [7.5, -2.0]],
            &["a".to_string(), "b".to_string()],
            &config,
        )
        .unwrap();
        draw_boxes(
            &mut img,
            &[[5.0, 5.0, -1.0, -1.0]],
            &["c".to_string()],
            &config,
        )
        .unwrap();
    }

    #[test]
    fn inverted_box_collapses_to_anchor() {
        let mut img = blank(100, 100);
        let config = RenderConfig::builder().stroke_width(1).build().unwrap();
        // x_max < x_min, y_max < y_min — a 1-px rectangle at (90, 90).
        draw_boxes(
            &mut img,
            &[[0.9, 0.9, 0.1, 0.1]],
            &["b".to_string()],
            &config,
        )
        .unwrap();
        assert_eq!(*img.get_pixel(90, 90), palette::color_for(0));
    }

    #[test]
    fn missing_font_is_fatal() {
        let config = RenderConfig::builder()
            .font_path("/definitely/not/a/font.ttf")
            .build()
            .unwrap();
        let mut img = blank(10, 10);
        let err = draw_points(&mut img, &[[0.5, 0.5]], &["p".to_string()], &config);
        assert!(matches!(err, Err(OverlayError::FontLoad { .. })));
    }

    #[test]
    fn to_pixel_clamps_into_bounds() {
        assert_eq!(to_pixel(0.5, 100), 50);
        assert_eq!(to_pixel(-0.2, 100), 0);
        assert_eq!(to_pixel(1.7, 100), 99);
        assert_eq!(to_pixel(f64::INFINITY, 100), 99);
    }
}
