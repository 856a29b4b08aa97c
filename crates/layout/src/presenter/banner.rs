//! Text on shapes: tag banners across the card and figures in corner circles.

use super::{Canvas, TextMetrics};
use crate::error::LayoutError;
use crate::wrap::{WrapOptions, wrap};
use cbg_style::font::FontWeight;
use cbg_style::wardrobe::{ACCENT, CONTRAST};
use cbg_style::{ModeOverride, Wardrobe};
use cbg_svg::shapes;
use cbg_types::{Corner, Point};

const EMPTY_BANNER_DASHES: &str = "3, 3";

/// The wardrobe in bold contrast mode, for text set on a colored shape.
fn bold_contrast(wardrobe: &Wardrobe) -> Result<Wardrobe, LayoutError> {
    let mut bold = wardrobe.copy_modes(&ModeOverride {
        weight: Some(FontWeight::Bold),
        ..Default::default()
    });
    bold.set_mode(CONTRAST)?;
    Ok(bold)
}

/// A thick line across the card with the text on top of it. Without text,
/// the line is thin and dashed.
pub fn present_banner(
    canvas: &mut Canvas<'_>,
    text: &str,
    wardrobe: &mut Wardrobe,
    name: &str,
) -> Result<(), LayoutError> {
    let bold = bold_contrast(wardrobe)?;
    let metrics = TextMetrics::of(&bold, name)?;
    let n_lines = wrap(text, &WrapOptions::new(metrics.characters_per_line(&canvas.size))).len();

    let extra = canvas.size.inner;
    let box_height = n_lines as f64 * metrics.font.line_height() + extra;

    // Find the middle of the box without moving.
    let cursor = canvas.cursor();
    cursor.slide(box_height / 2.0);
    let level = cursor.slide(0.0);
    cursor.slide(-box_height / 2.0);

    let a = canvas.origin + Point::new(canvas.size.outer, level);
    let b = canvas.origin + Point::new(canvas.size.width() - canvas.size.outer, level);
    wardrobe.set_mode(ACCENT)?;
    let dashes = (n_lines == 0).then_some(EMPTY_BANNER_DASHES);
    let mut line = shapes::line(a, b);
    line.extend_attrs(wardrobe.line_attributes(box_height, dashes));
    canvas.append(line);
    wardrobe.reset();

    if n_lines > 0 {
        canvas.cursor().slide(extra / 2.0);
        canvas.insert_text(&bold, &metrics, text, None)?;
        canvas.cursor().slide(extra / 2.0);
    } else {
        canvas.cursor().slide(extra);
    }
    let inner = canvas.size.inner;
    canvas.cursor().slide(inner);
    Ok(())
}

/// A filled circle in a corner, with short text centred on it.
pub fn present_circle(
    canvas: &mut Canvas<'_>,
    text: &str,
    corner: Corner,
    wardrobe: &mut Wardrobe,
    name: &str,
) -> Result<(), LayoutError> {
    if text.is_empty() {
        return Ok(());
    }
    let metrics = TextMetrics::of(wardrobe, name)?;
    let radius = metrics.font.base;
    let center = canvas.origin + canvas.size.footprint.corner(corner).displaced((radius, radius));

    let mut circle = shapes::circle(center, radius);
    wardrobe.apply_to(&mut circle, Some(center));
    canvas.append(circle);

    let bold = bold_contrast(wardrobe)?;
    let position = center + Point::new(0.0, radius / 4.0);
    let mut label = shapes::text(position);
    bold.apply_to(&mut label, Some(position));
    canvas.append(label.with_text(text));
    Ok(())
}
