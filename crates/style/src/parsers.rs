//! Low-level nom parser functions for style values given on the command
//! line or in game files.

use crate::error::StyleError;
use crate::font::{Anchor, FontStyle, FontVariant, FontWeight};
use cbg_types::{PageSize, Point, size};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, digit1, space0, space1},
    combinator::{map, map_res, opt, recognize, rest},
    multi::separated_list1,
    sequence::{delimited, pair, separated_pair, terminated},
};

// --- Helper Parsers ---

fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, 10, |c: char| c.is_ascii_digit()).parse(input)
}

fn parse_f64(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digits, opt(pair(char('.'), digits)))),
                recognize(pair(char('.'), digits)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

/// Millimetres per unit.
fn parse_unit(input: &str) -> IResult<&str, f64> {
    alt((
        map(tag_no_case("mm"), |_| 1.0),
        map(tag_no_case("cm"), |_| 10.0),
        map(tag_no_case("in"), |_| 25.4),
        map(tag_no_case("pt"), |_| 25.4 / 72.0),
    ))
    .parse(input)
}

/// Parses a length with an optional unit into millimetres. Bare numbers
/// are millimetres.
pub fn parse_length(input: &str) -> IResult<&str, f64> {
    let (input, value) = parse_f64(input)?;
    let (input, factor) = opt(parse_unit).parse(input)?;
    Ok((input, value * factor.unwrap_or(1.0)))
}

/// Parses margins: one value for both axes, or horizontal then vertical.
pub fn parse_margins(input: &str) -> Result<Point, StyleError> {
    match separated_list1(space1, parse_length).parse(input.trim()) {
        Ok(("", parts)) => match parts.as_slice() {
            [both] => Ok(Point::splat(*both)),
            [x, y] => Ok(Point::new(*x, *y)),
            _ => Err(StyleError::Parse(format!(
                "Invalid number of values for margins: got {}, expected 1 or 2.",
                parts.len()
            ))),
        },
        _ => Err(StyleError::Parse(format!(
            "Failed to parse margins value: '{}'",
            input
        ))),
    }
}

fn parse_dimensions(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(parse_length, ws(alt((char('x'), char('X'), char('×')))), parse_length)
        .parse(input)
}

/// Parses a page size: a named paper size or `WIDTHxHEIGHT`. Margins are
/// kept from A4 for named sizes and zero for custom ones.
pub fn parse_page_size(s: &str) -> Result<PageSize, StyleError> {
    if s.trim().eq_ignore_ascii_case("a4") {
        return Ok(size::A4);
    }
    let (w, h) = run_parser(parse_dimensions, s).map_err(|_| StyleError::InvalidValue {
        property: "page-size".to_string(),
        value: s.to_string(),
    })?;
    Ok(PageSize::new(w, h, 0.0, 0.0))
}

/// Helper to run a nom parser and require that it consumes all input.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleError::Parse(e.to_string())),
    }
}

// --- Selection ---

/// Parses a card selection restriction, `[N:]pattern`. The count is `None`
/// when the restriction should leave copy counts unchanged.
pub fn parse_restriction(input: &str) -> Result<(Option<usize>, String), StyleError> {
    let result: IResult<&str, (Option<usize>, &str)> = pair(
        opt(terminated(map_res(digit1, |d: &str| d.parse::<usize>()), char(':'))),
        rest,
    )
    .parse(input);
    match result {
        Ok((_, (_, ""))) | Err(_) => Err(StyleError::InvalidValue {
            property: "restriction".to_string(),
            value: input.to_string(),
        }),
        Ok((_, (count, pattern))) => Ok((count, pattern.to_string())),
    }
}

// --- Keyword Parsers ---

pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleError> {
    match s.trim().to_lowercase().as_str() {
        "italic" => Ok(FontStyle::Italic),
        "oblique" => Ok(FontStyle::Oblique),
        _ => Err(StyleError::InvalidValue {
            property: "font-style".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleError> {
    match s.trim().to_lowercase().as_str() {
        "bold" => Ok(FontWeight::Bold),
        "bolder" => Ok(FontWeight::Bolder),
        "lighter" => Ok(FontWeight::Lighter),
        _ => Err(StyleError::InvalidValue {
            property: "font-weight".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_font_variant(s: &str) -> Result<FontVariant, StyleError> {
    match s.trim().to_lowercase().replace('_', "-").as_str() {
        "small-caps" => Ok(FontVariant::SmallCaps),
        _ => Err(StyleError::InvalidValue {
            property: "font-variant".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_anchor(s: &str) -> Result<Anchor, StyleError> {
    match s.trim().to_lowercase().as_str() {
        "start" => Ok(Anchor::Start),
        "middle" => Ok(Anchor::Middle),
        "end" => Ok(Anchor::End),
        _ => Err(StyleError::InvalidValue {
            property: "text-anchor".to_string(),
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(run_parser(parse_length, "12").unwrap(), 12.0);
        assert_eq!(run_parser(parse_length, " 2cm ").unwrap(), 20.0);
        assert!(approx(run_parser(parse_length, "1in").unwrap(), 25.4));
        assert!(approx(run_parser(parse_length, "72pt").unwrap(), 25.4));
        assert_eq!(run_parser(parse_length, "-.5mm").unwrap(), -0.5);
        assert!(run_parser(parse_length, "abc").is_err());
        assert!(run_parser(parse_length, "3km").is_err());
    }

    #[test]
    fn test_parse_margins() {
        assert_eq!(parse_margins("5").unwrap(), Point::new(5.0, 5.0));
        assert_eq!(parse_margins("16 9").unwrap(), Point::new(16.0, 9.0));
        assert!(parse_margins("1 2 3").is_err());
        assert!(parse_margins("wide").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("A4").unwrap(), size::A4);
        let p = parse_page_size("100x150").unwrap();
        assert_eq!(p.footprint.width, 100.0);
        assert_eq!(p.footprint.height, 150.0);
        assert_eq!(p.margins, Point::zero());
        assert!(parse_page_size("100").is_err());
    }

    #[test]
    fn test_parse_restriction() {
        assert_eq!(parse_restriction("2:^Fire").unwrap(), (Some(2), "^Fire".to_string()));
        assert_eq!(parse_restriction("tag=spell").unwrap(), (None, "tag=spell".to_string()));
        assert_eq!(parse_restriction("0:x").unwrap(), (Some(0), "x".to_string()));
        // A bare count is a pattern of digits.
        assert_eq!(parse_restriction("12").unwrap(), (None, "12".to_string()));
        assert!(parse_restriction("3:").is_err());
        assert!(parse_restriction("").is_err());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_anchor("Middle").unwrap(), Anchor::Middle);
        assert_eq!(parse_font_variant("small_caps").unwrap(), FontVariant::SmallCaps);
        assert!(matches!(
            parse_font_weight("heavy"),
            Err(StyleError::InvalidValue { property, .. }) if property == "font-weight"
        ));
    }
}
