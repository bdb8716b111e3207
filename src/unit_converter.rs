//! # Unit Converter Module
//!
//! Rewrites every convertible measurement in an ingredient string from one
//! measurement system to the other. Conversion pivots through the base unit
//! of the measurement type (milliliters or grams), reselects the best-fit
//! target unit for the converted magnitude, and re-serializes the quantity
//! with the correct singular or plural display form.
//!
//! Anything the converter cannot handle passes through verbatim: bare
//! quantities, unrecognized units, and measurements already in the target
//! system.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_measure::unit_converter::UnitConverter;
//! use recipe_measure::unit_catalog::MeasurementSystem;
//!
//! let converter = UnitConverter::new();
//! let metric = converter.convert("2 cups flour", MeasurementSystem::Metric);
//! assert_eq!(metric, "473.18 ml flour");
//! ```

use log::{debug, trace};

use crate::measurement_scanner::MeasurementScanner;
use crate::quantity_parser;
use crate::unit_catalog::{
    find_equivalent, find_unit, MeasurementSystem, MeasurementType, UnitDefinition,
};

/// Stateless conversion service; construct once and share
pub struct UnitConverter {
    scanner: MeasurementScanner,
}

impl UnitConverter {
    pub fn new() -> Self {
        Self {
            scanner: MeasurementScanner::new(),
        }
    }

    /// Convert every cross-system measurement in the text to the target system
    ///
    /// Matches are rewritten in reverse span order so earlier replacements
    /// never invalidate later offsets. A match is left unchanged when it has
    /// no unit, its unit is not in the catalog, no equivalent exists, or it
    /// is already in the target system.
    pub fn convert(&self, text: &str, target_system: MeasurementSystem) -> String {
        let Some(matches) = self.scanner.extract_measurements(text) else {
            trace!("No measurements in '{}'", text);
            return text.to_string();
        };

        let mut result = text.to_string();
        for m in matches.iter().rev() {
            if m.unit_text.is_empty() {
                // Bare quantities are never unit-converted
                continue;
            }
            let Some(source_unit) = find_unit(&m.unit_text) else {
                trace!("Skipping unrecognized unit '{}'", m.unit_text);
                continue;
            };
            if find_equivalent(source_unit, target_system).is_none() {
                trace!("No {:?} equivalent for '{}'", target_system, source_unit.name);
                continue;
            }
            if source_unit.system == target_system {
                // Conversion only crosses systems; never re-express in place
                continue;
            }

            let base_value = m.value * source_unit.conversion_factor;
            let Some((target_unit, display_value)) =
                best_unit_for(base_value, source_unit.measurement_type, target_system)
            else {
                continue;
            };

            let formatted = quantity_parser::format(display_value);
            // Pluralize on the value the reader sees, not the raw quotient
            let displayed = (display_value * 100.0).round() / 100.0;
            let replacement = format!("{} {}", formatted, display_form(target_unit, displayed));
            debug!(
                "Converted '{}' -> '{}'",
                &text[m.start_pos..m.end_pos],
                replacement
            );
            result.replace_range(m.start_pos..m.end_pos, &replacement);
        }
        result
    }

    /// Element-wise [`convert`](Self::convert) over a list of ingredient strings
    pub fn convert_many(&self, texts: &[String], target_system: MeasurementSystem) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.convert(text, target_system))
            .collect()
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the most human-appropriate unit for a base-unit magnitude, returning
/// it with the value expressed in that unit. Thresholds are on the base-unit
/// value (ml or g).
fn best_unit_for(
    base_value: f64,
    measurement_type: MeasurementType,
    system: MeasurementSystem,
) -> Option<(&'static UnitDefinition, f64)> {
    let name = match (system, measurement_type) {
        (MeasurementSystem::Imperial, MeasurementType::Volume) => {
            if base_value >= 3785.0 {
                "gallon"
            } else if base_value >= 946.0 {
                "quart"
            } else if base_value >= 473.0 {
                "pint"
            } else if base_value >= 59.0 {
                "cup"
            } else if base_value >= 14.8 {
                "tablespoon"
            } else {
                "teaspoon"
            }
        }
        (MeasurementSystem::Metric, MeasurementType::Volume) => {
            if base_value >= 1000.0 {
                "liter"
            } else {
                "milliliter"
            }
        }
        (MeasurementSystem::Imperial, MeasurementType::Weight) => {
            if base_value >= 453.6 {
                "pound"
            } else {
                "ounce"
            }
        }
        (MeasurementSystem::Metric, MeasurementType::Weight) => {
            if base_value >= 1000.0 {
                "kilogram"
            } else {
                "gram"
            }
        }
    };
    let unit = find_unit(name)?;
    Some((unit, base_value / unit.conversion_factor))
}

/// Display form for a converted measurement: metric units always show their
/// preferred abbreviation, imperial units pluralize the full name when the
/// displayed value is strictly greater than one.
fn display_form(unit: &'static UnitDefinition, value: f64) -> &'static str {
    match unit.system {
        MeasurementSystem::Metric => unit.abbreviations[0],
        MeasurementSystem::Imperial => {
            if value > 1.0 {
                unit.plural_name
            } else {
                unit.name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_converter() -> UnitConverter {
        UnitConverter::new()
    }

    #[test]
    fn test_convert_cups_to_metric() {
        let converter = create_converter();
        let result = converter.convert("2 cups flour", MeasurementSystem::Metric);

        assert_eq!(result, "473.18 ml flour");
    }

    #[test]
    fn test_convert_pounds_to_metric() {
        let converter = create_converter();
        let result = converter.convert("1 pound beef", MeasurementSystem::Metric);

        assert_eq!(result, "453.59 g beef");
        assert!(!result.contains("pound"));
        assert!(!result.contains("lb"));
    }

    #[test]
    fn test_convert_selects_larger_metric_unit() {
        let converter = create_converter();

        // 1 gallon = 3785.41 ml, over the liter threshold
        let result = converter.convert("1 gallon water", MeasurementSystem::Metric);
        assert_eq!(result, "3.79 l water");

        // 5 pounds = 2267.96 g, over the kilogram threshold
        let result = converter.convert("5 lbs potatoes", MeasurementSystem::Metric);
        assert_eq!(result, "2.27 kg potatoes");
    }

    #[test]
    fn test_convert_metric_to_imperial_reselects_unit() {
        let converter = create_converter();

        // 1000 ml lands on the quart threshold, not fluid ounces
        let result = converter.convert("1000 ml water", MeasurementSystem::Imperial);
        assert_eq!(result, "1.06 quarts water");

        // 118 ml is within half-cup territory and formats as a fraction
        let result = converter.convert("118 ml milk", MeasurementSystem::Imperial);
        assert_eq!(result, "½ cup milk");
    }

    #[test]
    fn test_imperial_singular_at_one_or_less() {
        let converter = create_converter();

        // 236.588 ml is exactly one cup
        let result = converter.convert("236.588 ml milk", MeasurementSystem::Imperial);
        assert_eq!(result, "1 cup milk");
    }

    #[test]
    fn test_same_system_measurement_is_untouched() {
        let converter = create_converter();

        let result = converter.convert("2 cups flour", MeasurementSystem::Imperial);
        assert_eq!(result, "2 cups flour");

        let result = converter.convert("500g sugar", MeasurementSystem::Metric);
        assert_eq!(result, "500g sugar");
    }

    #[test]
    fn test_unrecognized_unit_passes_through() {
        let converter = create_converter();

        let result = converter.convert("2 pinches of salt", MeasurementSystem::Metric);
        assert_eq!(result, "2 pinches of salt");
    }

    #[test]
    fn test_bare_quantity_passes_through() {
        let converter = create_converter();

        let result = converter.convert("3 eggs", MeasurementSystem::Metric);
        assert_eq!(result, "3 eggs");
    }

    #[test]
    fn test_non_measurement_text_is_preserved() {
        let converter = create_converter();

        let text = "Fold in 2 cups flour, then rest the dough";
        let result = converter.convert(text, MeasurementSystem::Metric);
        assert!(result.starts_with("Fold in "));
        assert!(result.ends_with(" flour, then rest the dough"));
        assert!(result.contains("ml"));
        assert!(!result.contains("cups"));
    }

    #[test]
    fn test_multiple_measurements_convert_independently() {
        let converter = create_converter();

        let result = converter.convert(
            "2 cups flour and 1 lb butter and 3 eggs",
            MeasurementSystem::Metric,
        );
        assert_eq!(result, "473.18 ml flour and 453.59 g butter and 3 eggs");
    }

    #[test]
    fn test_round_trip_preserves_non_measurement_text() {
        let converter = create_converter();

        let text = "Stir 2 cups broth into the pan";
        let metric = converter.convert(text, MeasurementSystem::Metric);
        let back = converter.convert(&metric, MeasurementSystem::Imperial);

        // Lossy on the numbers, byte-for-byte on everything else
        assert!(back.starts_with("Stir "));
        assert!(back.ends_with(" broth into the pan"));
    }

    #[test]
    fn test_convert_many_is_element_wise() {
        let converter = create_converter();
        let texts = vec![
            "2 cups flour".to_string(),
            "salt to taste".to_string(),
            "1 lb butter".to_string(),
        ];

        let converted = converter.convert_many(&texts, MeasurementSystem::Metric);

        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0], "473.18 ml flour");
        assert_eq!(converted[1], "salt to taste");
        assert_eq!(converted[2], "453.59 g butter");
    }

    #[test]
    fn test_best_unit_thresholds() {
        let gallon = best_unit_for(
            4000.0,
            MeasurementType::Volume,
            MeasurementSystem::Imperial,
        )
        .unwrap();
        assert_eq!(gallon.0.name, "gallon");

        let quart =
            best_unit_for(950.0, MeasurementType::Volume, MeasurementSystem::Imperial).unwrap();
        assert_eq!(quart.0.name, "quart");

        let pint =
            best_unit_for(500.0, MeasurementType::Volume, MeasurementSystem::Imperial).unwrap();
        assert_eq!(pint.0.name, "pint");

        let cup =
            best_unit_for(100.0, MeasurementType::Volume, MeasurementSystem::Imperial).unwrap();
        assert_eq!(cup.0.name, "cup");

        let tablespoon =
            best_unit_for(20.0, MeasurementType::Volume, MeasurementSystem::Imperial).unwrap();
        assert_eq!(tablespoon.0.name, "tablespoon");

        let teaspoon =
            best_unit_for(5.0, MeasurementType::Volume, MeasurementSystem::Imperial).unwrap();
        assert_eq!(teaspoon.0.name, "teaspoon");

        let liter =
            best_unit_for(1500.0, MeasurementType::Volume, MeasurementSystem::Metric).unwrap();
        assert_eq!(liter.0.name, "liter");

        let kilogram =
            best_unit_for(2000.0, MeasurementType::Weight, MeasurementSystem::Metric).unwrap();
        assert_eq!(kilogram.0.name, "kilogram");

        let pound =
            best_unit_for(500.0, MeasurementType::Weight, MeasurementSystem::Imperial).unwrap();
        assert_eq!(pound.0.name, "pound");

        let ounce =
            best_unit_for(100.0, MeasurementType::Weight, MeasurementSystem::Imperial).unwrap();
        assert_eq!(ounce.0.name, "ounce");
    }
}
