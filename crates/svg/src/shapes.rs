//! Constructors for the basic SVG shapes, geometry only.
//!
//! Presentation attributes are added by the caller.

use crate::element::Element;
use crate::number::rounded;
use cbg_types::{Point, Rectangle};

pub fn rect(position: Point, size: Rectangle, rounding: Option<f64>) -> Element {
    let mut e = Element::new("rect")
        .with_attr("x", rounded(position.x))
        .with_attr("y", rounded(position.y))
        .with_attr("width", rounded(size.width))
        .with_attr("height", rounded(size.height));
    if let Some(r) = rounding {
        e.set_attr("rx", rounded(r));
        e.set_attr("ry", rounded(r));
    }
    e
}

pub fn line(a: Point, b: Point) -> Element {
    Element::new("line")
        .with_attr("x1", rounded(a.x))
        .with_attr("y1", rounded(a.y))
        .with_attr("x2", rounded(b.x))
        .with_attr("y2", rounded(b.y))
}

pub fn circle(center: Point, radius: f64) -> Element {
    Element::new("circle")
        .with_attr("cx", rounded(center.x))
        .with_attr("cy", rounded(center.y))
        .with_attr("r", rounded(radius))
}

/// A text element with whitespace preserved, as wrapped lines require.
pub fn text(position: Point) -> Element {
    Element::new("text")
        .with_attr("x", rounded(position.x))
        .with_attr("y", rounded(position.y))
        .with_attr("xml:space", "preserve")
}

pub fn group() -> Element {
    Element::new("g")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_rounding() {
        let r = rect(Point::new(1.0, 1.0), Rectangle::new(57.0, 90.0), Some(2.0));
        assert_eq!(r.attr("rx"), Some("2"));
        assert_eq!(r.attr("ry"), Some("2"));
        let plain = rect(Point::zero(), Rectangle::new(1.0, 1.0), None);
        assert_eq!(plain.attr("rx"), None);
    }

    #[test]
    fn test_text_preserves_space() {
        let t = text(Point::new(3.0, 4.25));
        assert_eq!(t.attr("xml:space"), Some("preserve"));
        assert_eq!(t.attr("y"), Some("4.25"));
    }
}
