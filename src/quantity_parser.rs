//! # Quantity Parser Module
//!
//! Bidirectional mapping between numeric literals found in ingredient text
//! and floating-point values. Handles integers, decimals, ASCII fractions
//! ("1/2"), mixed numbers ("1 1/2") and Unicode vulgar fractions ("½", "1½").
//!
//! Formatting picks the most readable literal for a value: a bare integer, a
//! vulgar-fraction glyph, a mixed number with a glyph, or a decimal rounded
//! to two places.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_measure::quantity_parser::{parse, format};
//!
//! assert_eq!(parse("1 1/2").unwrap(), 1.5);
//! assert_eq!(format(0.5), "½");
//! assert_eq!(format(2.0), "2");
//! ```

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::fmt;

/// Vulgar-fraction glyphs accepted on parse, with their values
pub const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅐', 1.0 / 7.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
    ('⅑', 1.0 / 9.0),
    ('⅒', 0.1),
];

/// Glyph class of every accepted vulgar fraction, for embedding in regexes
pub const VULGAR_FRACTION_GLYPHS: &str = "½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞⅑⅒";

/// The common fractions `format` is willing to emit. The rarer glyphs are
/// accepted on parse but a value near 1/7 reads better as a decimal.
const FRIENDLY_FRACTIONS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('⅓', 1.0 / 3.0),
    ('½', 0.5),
    ('⅔', 2.0 / 3.0),
    ('¾', 0.75),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// How close a fractional remainder must be to a friendly fraction to format
/// as its glyph
const FRACTION_TOLERANCE: f64 = 0.01;

lazy_static! {
    // Mixed numbers ("1 1/2") and plain fractions ("3/4")
    static ref FRACTION_REGEX: Regex =
        Regex::new(r"^(?:(\d+)\s+)?(\d+)/(\d+)$").expect("Fraction pattern should be valid");
}

/// Errors that can occur while parsing a quantity literal
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The text is not a recognized numeric literal
    InvalidNumber(String),
    /// A fraction with a zero denominator
    DivisionByZero,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidNumber(text) => write!(f, "Invalid number format: '{}'", text),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
        }
    }
}

impl std::error::Error for ParseError {}

fn vulgar_fraction_value(glyph: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(c, _)| *c == glyph)
        .map(|(_, value)| *value)
}

/// Parse a numeric literal into a value
///
/// Accepted forms, checked in order: a vulgar fraction with an optional
/// leading integer ("½", "1½", "1 ½"), a plain integer or decimal ("2",
/// "2.5"), a plain ASCII fraction ("3/4"), and a mixed number ("1 1/2").
/// Vulgar-fraction forms are tried first since "1½" is not a valid decimal
/// literal.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] for anything else and
/// [`ParseError::DivisionByZero`] for a zero denominator.
pub fn parse(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }

    // Vulgar fraction, optionally preceded by a whole number
    if let Some(glyph) = text.chars().next_back() {
        if let Some(fraction) = vulgar_fraction_value(glyph) {
            let prefix = text[..text.len() - glyph.len_utf8()].trim();
            if prefix.is_empty() {
                return Ok(fraction);
            }
            return match prefix.parse::<u32>() {
                Ok(whole) => Ok(f64::from(whole) + fraction),
                Err(_) => Err(ParseError::InvalidNumber(text.to_string())),
            };
        }
    }

    // Plain integer or decimal. Only digit-and-dot literals qualify; the
    // float parser alone would also accept signs, exponents and "inf"/"NaN"
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        if let Ok(value) = text.parse::<f64>() {
            return Ok(value);
        }
    }

    // ASCII fraction or mixed number
    if let Some(captures) = FRACTION_REGEX.captures(text) {
        let whole: f64 = captures
            .get(1)
            .map_or(Ok(0.0), |m| m.as_str().parse::<f64>())
            .map_err(|_| ParseError::InvalidNumber(text.to_string()))?;
        let numerator: f64 = captures[2]
            .parse()
            .map_err(|_| ParseError::InvalidNumber(text.to_string()))?;
        let denominator: f64 = captures[3]
            .parse()
            .map_err(|_| ParseError::InvalidNumber(text.to_string()))?;

        if denominator == 0.0 {
            return Err(ParseError::DivisionByZero);
        }

        return Ok(whole + numerator / denominator);
    }

    Err(ParseError::InvalidNumber(text.to_string()))
}

/// Format a value as the most readable quantity literal
///
/// Whole numbers print without a decimal point. Values below 10 whose
/// fractional part sits within tolerance of a friendly fraction print as a
/// glyph ("½") or mixed glyph ("1½"). Everything else rounds to two decimals
/// with trailing zeros dropped.
///
/// Not a perfect inverse of [`parse`]: a value that never matches a friendly
/// fraction comes back as its rounded decimal.
pub fn format(value: f64) -> String {
    if value.fract() == 0.0 {
        return (value as i64).to_string();
    }

    if value < 10.0 {
        let whole = value.trunc();
        let fraction = value - whole;
        for &(glyph, fraction_value) in FRIENDLY_FRACTIONS {
            if (fraction - fraction_value).abs() < FRACTION_TOLERANCE {
                trace!("Formatted {} as fraction glyph '{}'", value, glyph);
                return if whole == 0.0 {
                    glyph.to_string()
                } else {
                    format!("{}{}", whole as i64, glyph)
                };
            }
        }
    }

    // Decimal fallback, rounded to two places with no trailing zeros
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        (rounded as i64).to_string()
    } else {
        rounded.to_string()
    }
}
