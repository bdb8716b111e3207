//! # Measurement Scanner Module
//!
//! This module scans free-text ingredient strings for quantity+unit
//! occurrences, using one regex pattern per scan class.
//!
//! ## Features
//!
//! - Five pattern classes scanned in a fixed, documented priority order
//! - Quantity literals in integer, decimal, fraction, mixed-number and
//!   Unicode vulgar-fraction form
//! - **Bare-quantity support**: recognizes quantities with no unit word
//!   (e.g. "6 eggs"), as a best-effort fallback class
//! - Byte-offset spans for in-place text replacement

use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::measurement_patterns::{
    BARE_QUANTITY_REGEX, IMPERIAL_VOLUME_REGEX, IMPERIAL_WEIGHT_REGEX, METRIC_VOLUME_REGEX,
    METRIC_WEIGHT_REGEX,
};
use crate::quantity_parser;
use crate::unit_catalog::find_unit;

/// A detected measurement in text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementMatch {
    /// The parsed numeric value
    pub value: f64,
    /// The raw matched unit substring ("" for a bare quantity)
    pub unit_text: String,
    /// Byte offset where the match starts in the source string
    pub start_pos: usize,
    /// Byte offset just past the numeric portion of the match
    pub quantity_end_pos: usize,
    /// Byte offset just past the whole match
    pub end_pos: usize,
}

/// The pattern classes the scanner applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternClass {
    ImperialVolume,
    ImperialWeight,
    MetricVolume,
    MetricWeight,
    /// A quantity token with no unit word immediately following
    BareQuantity,
}

/// The priority order classes are scanned in. Every class runs over the whole
/// string; on overlapping spans the earlier class wins, so ambiguous text
/// always resolves the same way.
pub const SCAN_ORDER: [PatternClass; 5] = [
    PatternClass::ImperialVolume,
    PatternClass::ImperialWeight,
    PatternClass::MetricVolume,
    PatternClass::MetricWeight,
    PatternClass::BareQuantity,
];

/// Scanner for quantity+unit occurrences in ingredient text
pub struct MeasurementScanner {
    imperial_volume: Regex,
    imperial_weight: Regex,
    metric_volume: Regex,
    metric_weight: Regex,
    bare_quantity: Regex,
}

impl MeasurementScanner {
    /// Create a scanner with the catalog-derived patterns
    pub fn new() -> Self {
        Self {
            imperial_volume: IMPERIAL_VOLUME_REGEX.clone(),
            imperial_weight: IMPERIAL_WEIGHT_REGEX.clone(),
            metric_volume: METRIC_VOLUME_REGEX.clone(),
            metric_weight: METRIC_WEIGHT_REGEX.clone(),
            bare_quantity: BARE_QUANTITY_REGEX.clone(),
        }
    }

    fn pattern_for(&self, class: PatternClass) -> &Regex {
        match class {
            PatternClass::ImperialVolume => &self.imperial_volume,
            PatternClass::ImperialWeight => &self.imperial_weight,
            PatternClass::MetricVolume => &self.metric_volume,
            PatternClass::MetricWeight => &self.metric_weight,
            PatternClass::BareQuantity => &self.bare_quantity,
        }
    }

    /// Find all measurements in the given text
    ///
    /// Scans every pattern class in [`SCAN_ORDER`] over the whole string,
    /// merges the results, drops lower-priority matches whose spans overlap
    /// an accepted one, and returns the matches ordered by position.
    ///
    /// Returns `None` when no measurement is present at all. A candidate
    /// whose numeric portion fails to parse is dropped on its own without
    /// failing the scan.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_measure::measurement_scanner::MeasurementScanner;
    ///
    /// let scanner = MeasurementScanner::new();
    /// let matches = scanner.extract_measurements("2 cups flour").unwrap();
    ///
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].value, 2.0);
    /// assert_eq!(matches[0].unit_text, "cups");
    /// ```
    pub fn extract_measurements(&self, text: &str) -> Option<Vec<MeasurementMatch>> {
        let mut matches: Vec<MeasurementMatch> = Vec::new();

        for class in SCAN_ORDER {
            for captures in self.pattern_for(class).captures_iter(text) {
                let full = captures.get(0).expect("match has a full capture");
                let quantity = captures.get(1).expect("match has a quantity capture");

                if !has_clean_boundaries(text, full.start(), full.end()) {
                    trace!(
                        "Rejected '{}' at {}: embedded in a larger word",
                        full.as_str(),
                        full.start()
                    );
                    continue;
                }
                if overlaps_existing(&matches, full.start(), full.end()) {
                    trace!(
                        "Dropped '{}' at {}: span claimed by a higher-priority class",
                        full.as_str(),
                        full.start()
                    );
                    continue;
                }
                if class == PatternClass::BareQuantity && unit_word_follows(text, full.end()) {
                    trace!(
                        "Rejected bare quantity '{}' at {}: unit word follows",
                        full.as_str(),
                        full.start()
                    );
                    continue;
                }

                let value = match quantity_parser::parse(quantity.as_str()) {
                    Ok(value) => value,
                    Err(err) => {
                        // One unparsable candidate never fails the whole scan
                        debug!("Dropping candidate '{}': {}", quantity.as_str(), err);
                        continue;
                    }
                };

                let unit_text = captures
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();

                debug!(
                    "Found measurement '{}' ({:?}) at {}..{}",
                    full.as_str(),
                    class,
                    full.start(),
                    full.end()
                );

                matches.push(MeasurementMatch {
                    value,
                    unit_text,
                    start_pos: full.start(),
                    quantity_end_pos: quantity.end(),
                    end_pos: full.end(),
                });
            }
        }

        if matches.is_empty() {
            return None;
        }
        matches.sort_by_key(|m| m.start_pos);
        Some(matches)
    }

    /// Check whether the text contains at least one measurement
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_measure::measurement_scanner::MeasurementScanner;
    ///
    /// let scanner = MeasurementScanner::new();
    /// assert!(scanner.has_measurements("2 cups flour"));
    /// assert!(scanner.has_measurements("6 eggs")); // bare quantity
    /// assert!(!scanner.has_measurements("salt to taste"));
    /// ```
    pub fn has_measurements(&self, text: &str) -> bool {
        self.extract_measurements(text).is_some()
    }

    /// Return the lines of a multi-line text that contain measurements,
    /// with their line numbers
    pub fn extract_measurement_lines(&self, text: &str) -> Vec<(usize, String)> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| self.has_measurements(line))
            .map(|(i, line)| (i, line.to_string()))
            .collect()
    }
}

impl Default for MeasurementScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// A match embedded in a larger word or number is not a measurement
/// ("cupboard", "A1"). The patterns cannot assert this themselves since the
/// regex crate has no lookaround.
fn has_clean_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric() && c != '.');
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

fn overlaps_existing(matches: &[MeasurementMatch], start: usize, end: usize) -> bool {
    matches.iter().any(|m| start < m.end_pos && m.start_pos < end)
}

/// Check whether the word right after a bare quantity is a catalog unit.
/// Overlap dedup already drops most of these; this guards the leftovers,
/// e.g. a unit spelling a class pattern rejected on boundary grounds.
fn unit_word_follows(text: &str, from: usize) -> bool {
    let rest = text[from..].trim_start();
    let token = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(|c: char| !c.is_alphanumeric() && c != '.');
    !token.is_empty() && find_unit(token).is_some()
}
