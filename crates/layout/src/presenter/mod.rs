//! Presenters draw one side of a card, field by field, into an SVG group.

pub mod banner;
pub mod card;
pub mod grid;
pub mod table;
pub mod text;

pub use card::{Side, present_card};
pub use table::{adapt_to_space, line_break, requirements_by_column};
pub use text::TextMetrics;

use crate::cursor::Cursor;
use crate::error::LayoutError;
use crate::wrap::{WrapOptions, wrap};
use cbg_content::Edge;
use cbg_style::Wardrobe;
use cbg_svg::{Element, SvgDocument, shapes};
use cbg_types::{CardSize, Point};
use log::error;
use std::collections::HashMap;

/// Every wardrobe of a game, by name.
pub type Wardrobes = HashMap<String, Wardrobe>;

/// A working copy of a named wardrobe, in its main mode.
pub fn lookup(wardrobes: &Wardrobes, name: &str) -> Result<Wardrobe, LayoutError> {
    let mut wardrobe = wardrobes
        .get(name)
        .cloned()
        .ok_or_else(|| LayoutError::NoSuchWardrobe(name.to_string()))?;
    wardrobe.reset();
    Ok(wardrobe)
}

/// The drawing surface for one side of one card.
///
/// Holds the card's group element, one cursor from each edge, and the
/// document that receives shared definitions such as clip paths.
pub struct Canvas<'a> {
    pub size: CardSize,
    pub origin: Point,
    top: Cursor,
    bottom: Cursor,
    edge: Edge,
    group: Element,
    pub document: &'a mut SvgDocument,
}

impl<'a> Canvas<'a> {
    pub fn new(size: CardSize, origin: Point, document: &'a mut SvgDocument) -> Self {
        Self {
            size,
            origin,
            top: Cursor::from_top(),
            bottom: Cursor::from_bottom(size.height()),
            edge: Edge::Top,
            group: shapes::group(),
            document,
        }
    }

    pub fn use_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    /// The cursor for the edge in use.
    pub fn cursor(&mut self) -> &mut Cursor {
        match self.edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    pub fn cursor_at(&mut self, edge: Edge) -> &mut Cursor {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }

    pub fn append(&mut self, element: Element) {
        self.group.push(element);
    }

    pub fn into_group(self) -> Element {
        self.group
    }

    /// Insert a paragraph, wrapped to the card's interior and read top to
    /// bottom whichever edge it grows from. A lead is set in bold at the
    /// start of the paragraph.
    pub fn insert_text(
        &mut self,
        wardrobe: &Wardrobe,
        metrics: &TextMetrics,
        content: &str,
        lead: Option<&str>,
    ) -> Result<(), LayoutError> {
        let lead = lead.filter(|l| !l.is_empty());
        let margin = self.size.outer + 2.0 * self.size.inner;
        let x = wardrobe.horizontal_anchor(self.size.width(), margin);

        let text = format!("{}{}", lead.unwrap_or_default(), content);
        let width = metrics.characters_per_line(&self.size);
        let mut lines: Vec<(usize, String)> =
            wrap(&text, &WrapOptions::new(width)).into_iter().enumerate().collect();
        if self.cursor().flip_line_order() {
            lines.reverse();
        }

        for (index, line) in lines {
            let y = self.cursor().text(metrics.font.base, metrics.font.line_height(), 1);
            let position = self.origin + Point::new(x, y);
            let mut element = shapes::text(position);
            wardrobe.apply_to(&mut element, Some(position));
            let element = match lead {
                Some(lead) if index == 0 => with_bold_lead(element, &line, lead)?,
                _ => element.with_text(line),
            };
            self.append(element);
        }

        self.cursor().slide(metrics.font.after_paragraph());
        Ok(())
    }
}

fn with_bold_lead(element: Element, line: &str, lead: &str) -> Result<Element, LayoutError> {
    let Some((_, tail)) = line.split_once(lead) else {
        error!(
            "Failed to split line \"{}\" after paragraph lead \"{}\".",
            line, lead
        );
        return Err(LayoutError::Generic(format!(
            "Paragraph lead \"{}\" too long to fit on a line.",
            lead
        )));
    };
    let span = Element::new("tspan")
        .with_attr("style", "font-weight:bold")
        .with_text(lead)
        .with_tail(tail);
    Ok(element.with_child(span))
}
