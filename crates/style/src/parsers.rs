//! nom parsers for the textual forms of style values: lengths with units,
//! margin shorthands, borders and page size names.

use crate::border::Border;
use crate::dimension::{Margins, PageSize};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{space0, space1};
use nom::combinator::{all_consuming, map, opt};
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use quire_types::Color;
use quire_types::units::{POINTS_PER_CM, POINTS_PER_INCH, POINTS_PER_MM};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("in"), |_| POINTS_PER_INCH),
        map(tag_no_case("cm"), |_| POINTS_PER_CM),
        map(tag_no_case("mm"), |_| POINTS_PER_MM),
    ))
    .parse(input)
}

/// Parses a length with an optional unit ("12pt", "2cm", "0.5in"); bare numbers are points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = float(input)?;
    let (input, unit) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit.unwrap_or(1.0)))
}

/// Parses a complete length string, rejecting trailing garbage.
pub fn length_from_str(input: &str) -> Result<f32, StyleParseError> {
    all_consuming(delimited(space0, parse_length, space0))
        .parse(input)
        .map(|(_, v)| v)
        .map_err(|_| StyleParseError::InvalidValue {
            property: "length".to_string(),
            value: input.to_string(),
        })
}

/// Parses CSS shorthand margins (1, 2 or 4 values).
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parts = all_consuming(separated_list1(space1, parse_length))
        .parse(input.trim())
        .map(|(_, parts)| parts)
        .map_err(|_| StyleParseError::Parse(format!("Failed to parse margins value: '{}'", input)))?;

    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [vertical, horizontal] => Ok(Margins::symmetric(*vertical, *horizontal)),
        [top, right, bottom, left] => Ok(Margins {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(StyleParseError::Parse(format!(
            "Invalid number of values for margin shorthand: got {}, expected 1, 2, or 4.",
            parts.len()
        ))),
    }
}

/// Parses "<width> [<color>]", e.g. "0.5pt #1e293b". The colour defaults to black.
pub fn parse_border(input: &str) -> Result<Border, StyleParseError> {
    let (_, (width, color)) = all_consuming((
        delimited(space0, parse_length, space0),
        opt(take_while1(|c: char| !c.is_whitespace())),
    ))
    .parse(input.trim())
    .map_err(|_| StyleParseError::InvalidValue {
        property: "border".to_string(),
        value: input.to_string(),
    })?;

    let color = match color {
        Some(c) => c.parse::<Color>().map_err(|e| StyleParseError::InvalidValue {
            property: "border-color".to_string(),
            value: e,
        })?,
        None => Color::BLACK,
    };
    Ok(Border::new(width, color))
}

pub fn parse_page_size(input: &str) -> Result<PageSize, StyleParseError> {
    match input.trim().to_lowercase().as_str() {
        "a4" => Ok(PageSize::A4),
        "letter" => Ok(PageSize::Letter),
        "legal" => Ok(PageSize::Legal),
        _ => Err(StyleParseError::InvalidValue {
            property: "page-size".to_string(),
            value: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_with_units() {
        assert_eq!(length_from_str("12").unwrap(), 12.0);
        assert_eq!(length_from_str("12pt").unwrap(), 12.0);
        assert!((length_from_str("1in").unwrap() - 72.0).abs() < 1e-4);
        assert!((length_from_str(" 2cm ").unwrap() - 2.0 * POINTS_PER_CM).abs() < 1e-3);
        assert!((length_from_str("5mm").unwrap() - 5.0 * POINTS_PER_MM).abs() < 1e-3);
        assert!(length_from_str("12px wide").is_err());
    }

    #[test]
    fn test_margin_shorthand() {
        assert_eq!(parse_shorthand_margins("10").unwrap(), Margins::all(10.0));
        assert_eq!(
            parse_shorthand_margins("10 20").unwrap(),
            Margins::symmetric(10.0, 20.0)
        );
        let four = parse_shorthand_margins("1 2 3 4").unwrap();
        assert_eq!((four.top, four.right, four.bottom, four.left), (1.0, 2.0, 3.0, 4.0));
        assert!(parse_shorthand_margins("1 2 3").is_err());
    }

    #[test]
    fn test_border_values() {
        let b = parse_border("0.5pt #1e293b").unwrap();
        assert_eq!(b.width, 0.5);
        assert_eq!(b.color, Color::rgb(0x1e, 0x29, 0x3b));

        assert_eq!(parse_border("2").unwrap(), Border::new(2.0, Color::BLACK));
        assert!(parse_border("thick").is_err());
    }

    #[test]
    fn test_page_size_names() {
        assert_eq!(parse_page_size("a4").unwrap(), PageSize::A4);
        assert!(parse_page_size("tabloid").is_err());
    }
}
