use super::banner::{present_banner, present_circle};
use super::grid::present_grid;
use super::table::present_table;
use super::text::{paragraphs, present_text};
use super::{Canvas, Wardrobes, lookup};
use crate::error::LayoutError;
use cbg_content::{Card, Field, FieldContent, PresenterKind};
use cbg_style::wardrobe::BACKGROUND;
use cbg_svg::{Element, SvgDocument, shapes};
use cbg_types::Point;
use log::error;
use std::fmt;

/// Starting depth of the bottom cursor on a card front, in outer borders.
const BOTTOM_START: f64 = 1.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Obverse,
    Reverse,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Obverse => "obverse",
            Side::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draw one side of a card with its top left corner at `origin`.
///
/// Returns `None` if the card's type draws nothing on that side.
pub fn present_card(
    card: &Card,
    side: Side,
    origin: Point,
    wardrobes: &Wardrobes,
    document: &mut SvgDocument,
) -> Result<Option<Element>, LayoutError> {
    let card_type = &card.card_type;
    let drawn = match side {
        Side::Obverse => card_type.has_front(),
        Side::Reverse => card_type.has_back(),
    };
    if !drawn {
        return Ok(None);
    }

    let result = draw(card, side, origin, wardrobes, document);
    if result.is_err() {
        error!("An error occurred while presenting the {} of \"{}\".", side, card);
    }
    result.map(Some)
}

fn draw(
    card: &Card,
    side: Side,
    origin: Point,
    wardrobes: &Wardrobes,
    document: &mut SvgDocument,
) -> Result<Element, LayoutError> {
    let size = card.card_type.size;
    let mut frame = lookup(wardrobes, &card.card_type.frame_wardrobe)?;
    let mut canvas = Canvas::new(size, origin, document);
    // The main mode's thickness sizes the frame on both sides.
    let t = frame.mode().thickness;

    frame.set_mode(BACKGROUND)?;
    let (position, footprint, rounding) = match side {
        Side::Obverse => (origin + Point::splat(t / 2.0), size.footprint - t, t),
        Side::Reverse => (origin, size.footprint, 1.5 * t),
    };
    let mut background = shapes::rect(position, footprint, Some(rounding));
    frame.apply_to(&mut background, Some(position));
    canvas.append(background);
    frame.reset();

    match side {
        Side::Obverse => {
            canvas.cursor_at(cbg_content::Edge::Bottom).jump(BOTTOM_START * size.outer);
            canvas.cursor_at(cbg_content::Edge::Top).jump(size.outer);
        }
        Side::Reverse => {
            canvas.cursor_at(cbg_content::Edge::Top).jump(size.height() / 3.0);
        }
    }

    for field in &card.fields {
        present_field(&mut canvas, card, field, side, wardrobes)?;
    }

    if side == Side::Obverse {
        let mut border = shapes::rect(position, footprint, Some(rounding));
        frame.apply_to(&mut border, Some(position));
        canvas.append(border);
    }
    Ok(canvas.into_group())
}

fn present_field(
    canvas: &mut Canvas<'_>,
    card: &Card,
    field: &Field,
    side: Side,
    wardrobes: &Wardrobes,
) -> Result<(), LayoutError> {
    let Some(def) = card.field_def(field) else {
        return Err(LayoutError::Generic(format!(
            "Field \"{}\" is not in the plan of card type \"{}\".",
            field.key, card.card_type.name
        )));
    };
    let presenter = match side {
        Side::Obverse => &def.front,
        Side::Reverse => &def.back,
    };
    if presenter.is_none() {
        return Ok(());
    }

    let name = match presenter {
        PresenterKind::Grid { .. } => def
            .wardrobe
            .as_deref()
            .unwrap_or(&card.card_type.frame_wardrobe),
        _ => card.card_type.field_wardrobe(def),
    };
    let mut wardrobe = lookup(wardrobes, name)?;
    let mismatch = || {
        LayoutError::Generic(format!(
            "Field \"{}\" cannot be drawn as {:?}.",
            field.key, presenter
        ))
    };

    match presenter {
        PresenterKind::None => {}
        PresenterKind::Text {
            from,
            lead_delimiter,
        } => {
            canvas.use_edge(*from);
            present_text(canvas, &field.content, &mut wardrobe, name, lead_delimiter.as_deref())?;
        }
        PresenterKind::TagBanner { from } => {
            canvas.use_edge(*from);
            present_banner(canvas, &field.content.to_string(), &mut wardrobe, name)?;
        }
        PresenterKind::Circle { corner } => {
            let text = paragraphs(&field.content).into_iter().next().unwrap_or_default();
            present_circle(canvas, &text, *corner, &mut wardrobe, name)?;
        }
        PresenterKind::Grid { feather } => {
            let FieldContent::AreaOfEffect(map) = &field.content else {
                return Err(mismatch());
            };
            canvas.use_edge(cbg_content::Edge::Top);
            present_grid(canvas, map, &mut wardrobe, *feather)?;
        }
        PresenterKind::Table { from } => {
            let FieldContent::Table(table) = &field.content else {
                return Err(mismatch());
            };
            canvas.use_edge(*from);
            present_table(canvas, table, &mut wardrobe, name)?;
        }
    }
    Ok(())
}
