use super::Canvas;
use crate::error::LayoutError;
use crate::wrap::characters_per_line;
use cbg_content::FieldContent;
use cbg_style::Wardrobe;
use cbg_types::{CardSize, FontSize};

/// Font measurements for laying out text in a wardrobe's current mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub font: FontSize,
    pub character_width: f64,
}

impl TextMetrics {
    pub fn of(wardrobe: &Wardrobe, name: &str) -> Result<Self, LayoutError> {
        match (wardrobe.font_size, wardrobe.character_width()) {
            (Some(font), Some(character_width)) => Ok(Self {
                font,
                character_width,
            }),
            _ => Err(LayoutError::Illiterate(name.to_string())),
        }
    }

    pub fn characters_per_line(&self, size: &CardSize) -> usize {
        characters_per_line(size.interior_width(), self.character_width)
    }
}

/// The printable paragraphs of a field.
pub fn paragraphs(content: &FieldContent) -> Vec<String> {
    match content {
        FieldContent::Text(t) => t.paragraphs.iter().map(|p| p.string.clone()).collect(),
        other if other.is_empty() => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Split a paragraph after the first occurrence of the delimiter.
fn split_lead<'a>(paragraph: &'a str, delimiter: Option<&str>) -> (Option<&'a str>, &'a str) {
    match delimiter.and_then(|d| paragraph.find(d).map(|i| i + d.len())) {
        Some(end) => (Some(&paragraph[..end]), &paragraph[end..]),
        None => (None, paragraph),
    }
}

pub fn present_text(
    canvas: &mut Canvas<'_>,
    content: &FieldContent,
    wardrobe: &mut Wardrobe,
    name: &str,
    lead_delimiter: Option<&str>,
) -> Result<(), LayoutError> {
    for paragraph in paragraphs(content) {
        wardrobe.reset();
        let metrics = TextMetrics::of(wardrobe, name)?;
        let (lead, body) = split_lead(&paragraph, lead_delimiter);
        canvas.insert_text(wardrobe, &metrics, body, lead)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{body_wardrobe, mini};
    use cbg_content::TextField;
    use cbg_style::Wardrobe;
    use cbg_svg::SvgDocument;
    use cbg_types::{Point, Rectangle};
    use serde_json::json;

    #[test]
    fn test_split_lead() {
        assert_eq!(split_lead("Fast: go", Some(":")), (Some("Fast:"), " go"));
        assert_eq!(split_lead("Fast go", Some(":")), (None, "Fast go"));
        assert_eq!(split_lead("Fast: go", None), (None, "Fast: go"));
    }

    #[test]
    fn test_illiterate_wardrobe() {
        assert!(matches!(
            TextMetrics::of(&Wardrobe::default(), "frame"),
            Err(LayoutError::Illiterate(n)) if n == "frame"
        ));
        let m = TextMetrics::of(&body_wardrobe(), "text").unwrap();
        assert_eq!(m.characters_per_line(&mini()), 22);
    }

    #[test]
    fn test_one_element_group_per_line() {
        let mut doc = SvgDocument::new(Rectangle::new(100.0, 100.0));
        let mut canvas = Canvas::new(mini(), Point::zero(), &mut doc);
        let content = FieldContent::Text(TextField::from_value(&json!(["One.", "Two."])).unwrap());
        present_text(&mut canvas, &content, &mut body_wardrobe(), "text", None).unwrap();
        assert_eq!(canvas.into_group().children.len(), 2);
    }
}
