//! # Measurement Patterns Module
//!
//! This module builds the regex patterns used for measurement scanning. One
//! pattern exists per scan class: the four system/type unit classes are built
//! from the unit catalog, and the bare-quantity pattern matches a numeric
//! token on its own.
//!
//! The `regex` crate has no lookaround, so none of these patterns enforce
//! word boundaries around dotted abbreviations or exclude unit words after a
//! bare number; the scanner checks both programmatically.

use lazy_static::lazy_static;
use regex::Regex;

use crate::quantity_parser::VULGAR_FRACTION_GLYPHS;
use crate::unit_catalog::{units, MeasurementSystem, MeasurementType};

/// Build the quantity-token subpattern: an optional integer followed by a
/// vulgar-fraction glyph, or an integer optionally extended by a mixed
/// fraction, plain fraction or decimal part.
fn quantity_pattern() -> String {
    format!(
        r"(?:\d+\s?)?[{glyphs}]|\d+(?:\s\d+/\d+|/\d+|\.\d+)?",
        glyphs = VULGAR_FRACTION_GLYPHS
    )
}

/// Build the pattern for one unit class: a quantity token, optional
/// whitespace, then any spelling of any catalog unit in the class. Longer
/// spellings come first so "tablespoons" wins over "tablespoon".
fn unit_class_pattern(system: MeasurementSystem, measurement_type: MeasurementType) -> String {
    let mut spellings: Vec<String> = Vec::new();
    for unit in units() {
        if unit.system != system || unit.measurement_type != measurement_type {
            continue;
        }
        for spelling in [unit.name, unit.plural_name]
            .iter()
            .chain(unit.abbreviations.iter())
        {
            let escaped = regex::escape(spelling);
            if !spellings.contains(&escaped) {
                spellings.push(escaped);
            }
        }
    }
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    format!(
        r"(?i)({quantity})\s*({spellings})",
        quantity = quantity_pattern(),
        spellings = spellings.join("|")
    )
}

lazy_static! {
    pub static ref IMPERIAL_VOLUME_REGEX: Regex = Regex::new(&unit_class_pattern(
        MeasurementSystem::Imperial,
        MeasurementType::Volume
    ))
    .expect("Imperial volume pattern should be valid");
    pub static ref IMPERIAL_WEIGHT_REGEX: Regex = Regex::new(&unit_class_pattern(
        MeasurementSystem::Imperial,
        MeasurementType::Weight
    ))
    .expect("Imperial weight pattern should be valid");
    pub static ref METRIC_VOLUME_REGEX: Regex = Regex::new(&unit_class_pattern(
        MeasurementSystem::Metric,
        MeasurementType::Volume
    ))
    .expect("Metric volume pattern should be valid");
    pub static ref METRIC_WEIGHT_REGEX: Regex = Regex::new(&unit_class_pattern(
        MeasurementSystem::Metric,
        MeasurementType::Weight
    ))
    .expect("Metric weight pattern should be valid");
    pub static ref BARE_QUANTITY_REGEX: Regex =
        Regex::new(&format!("({})", quantity_pattern()))
            .expect("Bare quantity pattern should be valid");
}
