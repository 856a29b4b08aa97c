//! Maps of square tiles, such as an area of effect.

use super::Canvas;
use crate::error::LayoutError;
use cbg_content::{AreaOfEffect, Cell};
use cbg_style::Wardrobe;
use cbg_style::wardrobe::{ACCENT, INACTIVE};
use cbg_svg::{Element, Filter, shapes};
use cbg_types::{Point, Rectangle};

/// Side of one square tile.
pub const SQUARE: f64 = 3.0;
/// Border inside each tile.
pub const SQUARE_BORDER: f64 = 0.4;
/// Offset of the grid from the card origin and the cursor.
const INDENT: Point = Point::new(6.0, 5.0);
const CLIP_PATH_PREFIX: &str = "cP";

fn square(origin: Point, wardrobe: &Wardrobe) -> Element {
    let position = origin + Point::splat(SQUARE_BORDER / 2.0);
    let size = Rectangle::new(SQUARE - SQUARE_BORDER, SQUARE - SQUARE_BORDER);
    let mut rect = shapes::rect(position, size, None);
    wardrobe.apply_to(&mut rect, Some(position));
    rect
}

/// One square per cell, affected cells in the accent mode and the rest
/// inactive. With feathering, the grid is blurred at its edges and clipped
/// to its own bounds.
pub fn present_grid(
    canvas: &mut Canvas<'_>,
    map: &AreaOfEffect,
    wardrobe: &mut Wardrobe,
    feather: Option<f64>,
) -> Result<(), LayoutError> {
    if map.is_empty() {
        return Ok(());
    }

    let top_left = canvas.origin + Point::new(INDENT.x, canvas.cursor().offset() + INDENT.y);
    let mut grid = shapes::group();
    for ((row, col), cell) in map.cells() {
        wardrobe.set_mode(match cell {
            Cell::Empty => INACTIVE,
            Cell::Affected => ACCENT,
        })?;
        let origin = top_left + Point::new(col as f64 * SQUARE, row as f64 * SQUARE);
        grid.push(square(origin, wardrobe));
    }
    wardrobe.reset();

    let (rows, cols) = map.shape();
    if let Some(radius) = feather {
        let filter = Filter::feather(radius, None);
        canvas.document.define(filter.to_element())?;

        let id = canvas.document.new_id(CLIP_PATH_PREFIX);
        let bounds = Rectangle::new(cols as f64 * SQUARE, rows as f64 * SQUARE);
        let clip = Element::new("clipPath")
            .with_attr("id", id.as_str())
            .with_child(shapes::rect(top_left, bounds, None));
        canvas.document.define(clip)?;

        grid.set_attr("clip-path", id.url());
        grid.set_attr("filter", filter.url());
    }
    canvas.append(grid);

    canvas.cursor().slide(INDENT.y + rows as f64 * SQUARE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mini;
    use cbg_style::samples::card_frame;
    use cbg_svg::SvgDocument;
    use serde_json::json;

    fn map() -> AreaOfEffect {
        AreaOfEffect::from_value(&json!([[0, 0], [1, 0]])).unwrap()
    }

    #[test]
    fn test_squares() {
        let mut doc = SvgDocument::new(Rectangle::new(100.0, 100.0));
        let mut canvas = Canvas::new(mini(), Point::new(1.0, 2.0), &mut doc);
        canvas.cursor().jump(10.0);
        let mut wardrobe = card_frame();
        present_grid(&mut canvas, &map(), &mut wardrobe, None).unwrap();
        let offset = canvas.cursor().offset();
        let group = canvas.into_group();

        let grid = &group.children[0];
        // Three rows of four columns, padding included.
        assert_eq!(grid.children.len(), 12);
        let first = &grid.children[0];
        assert_eq!(first.attr("x"), Some("7.2"));
        assert_eq!(first.attr("y"), Some("17.2"));
        assert_eq!(first.attr("width"), Some("2.6"));
        // Row 1, column 1 is affected.
        let affected = &grid.children[5];
        assert_eq!(affected.attr("x"), Some("10.2"));
        assert_eq!(affected.attr("y"), Some("20.2"));
        assert_ne!(affected.attr("style"), first.attr("style"));
        assert_eq!(grid.attr("filter"), None);
        assert_eq!(offset, 10.0 + 5.0 + 9.0);
    }

    #[test]
    fn test_feathered_grid_is_clipped() {
        let mut doc = SvgDocument::new(Rectangle::new(100.0, 100.0));
        let mut canvas = Canvas::new(mini(), Point::zero(), &mut doc);
        present_grid(&mut canvas, &map(), &mut card_frame(), Some(0.5)).unwrap();
        let group = canvas.into_group();
        let grid = &group.children[0];
        assert_eq!(grid.attr("clip-path"), Some("url(#cP1)"));
        assert!(grid.attr("filter").unwrap().starts_with("url(#f_"));
        assert_eq!(doc.defs().len(), 2);
        assert_eq!(doc.defs()[1].name, "clipPath");
    }

    #[test]
    fn test_empty_map_draws_nothing() {
        let mut doc = SvgDocument::new(Rectangle::new(100.0, 100.0));
        let mut canvas = Canvas::new(mini(), Point::zero(), &mut doc);
        present_grid(&mut canvas, &AreaOfEffect::default(), &mut card_frame(), None).unwrap();
        assert_eq!(canvas.cursor().offset(), 0.0);
        assert!(canvas.into_group().children.is_empty());
    }
}
