//! # Unit Catalog Module
//!
//! This module holds the static table of measurement unit definitions used by
//! the scanner, converter and scaling services. Every unit carries its
//! conversion factor to a shared base unit (milliliters for volume, grams for
//! weight), so any two units of the same measurement type can be converted
//! through the base unit regardless of system.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_measure::unit_catalog::{find_unit, find_equivalent, MeasurementSystem};
//!
//! let cup = find_unit("cups").unwrap();
//! let metric = find_equivalent(cup, MeasurementSystem::Metric).unwrap();
//! assert_eq!(metric.name, "milliliter");
//! ```

use serde::{Deserialize, Serialize};

/// Whether a unit measures volume or weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementType {
    /// Volume units (cups, milliliters, ...)
    Volume,
    /// Weight units (pounds, grams, ...)
    Weight,
}

/// The measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementSystem {
    /// US customary units
    Imperial,
    /// Metric units
    Metric,
}

/// Definition of a single measurement unit
///
/// The plural display form lives on the definition itself so that callers
/// never have to dispatch on unit names to pluralize output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    /// Canonical singular name (e.g. "cup")
    pub name: &'static str,
    /// Display form used when the quantity is greater than one (e.g. "cups")
    pub plural_name: &'static str,
    /// Recognized spellings; the first entry is the preferred display form
    pub abbreviations: &'static [&'static str],
    /// Volume or weight
    pub measurement_type: MeasurementType,
    /// Imperial or metric
    pub system: MeasurementSystem,
    /// Base units (ml or g) per one of this unit
    pub conversion_factor: f64,
    /// Name of the metric unit to seed a conversion to metric with
    pub metric_equivalent: &'static str,
    /// Name of the imperial unit to seed a conversion to imperial with
    pub imperial_equivalent: &'static str,
}

/// The unit table. Factors are base units (ml for volume, g for weight) per
/// one of the unit. Same-system equivalents point back at the unit itself so
/// `find_equivalent` is total over the table.
const UNITS: &[UnitDefinition] = &[
    // Imperial volume
    UnitDefinition {
        name: "cup",
        plural_name: "cups",
        abbreviations: &["cup", "cups", "c."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 236.588,
        metric_equivalent: "milliliter",
        imperial_equivalent: "cup",
    },
    UnitDefinition {
        name: "tablespoon",
        plural_name: "tablespoons",
        abbreviations: &["tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbs."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 14.7868,
        metric_equivalent: "milliliter",
        imperial_equivalent: "tablespoon",
    },
    UnitDefinition {
        name: "teaspoon",
        plural_name: "teaspoons",
        abbreviations: &["teaspoon", "teaspoons", "tsp", "tsps", "tsp."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 4.92892,
        metric_equivalent: "milliliter",
        imperial_equivalent: "teaspoon",
    },
    UnitDefinition {
        name: "fluid ounce",
        plural_name: "fluid ounces",
        abbreviations: &["fluid ounce", "fluid ounces", "fl oz", "fl.oz."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 29.5735,
        metric_equivalent: "milliliter",
        imperial_equivalent: "fluid ounce",
    },
    UnitDefinition {
        name: "quart",
        plural_name: "quarts",
        abbreviations: &["quart", "quarts", "qt", "qt."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 946.353,
        metric_equivalent: "liter",
        imperial_equivalent: "quart",
    },
    UnitDefinition {
        name: "pint",
        plural_name: "pints",
        abbreviations: &["pint", "pints", "pt", "pt."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 473.176,
        metric_equivalent: "milliliter",
        imperial_equivalent: "pint",
    },
    UnitDefinition {
        name: "gallon",
        plural_name: "gallons",
        abbreviations: &["gallon", "gallons", "gal", "gal."],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Imperial,
        conversion_factor: 3785.41,
        metric_equivalent: "liter",
        imperial_equivalent: "gallon",
    },
    // Imperial weight
    UnitDefinition {
        name: "pound",
        plural_name: "pounds",
        abbreviations: &["pound", "pounds", "lb", "lbs", "lb."],
        measurement_type: MeasurementType::Weight,
        system: MeasurementSystem::Imperial,
        conversion_factor: 453.592,
        metric_equivalent: "gram",
        imperial_equivalent: "pound",
    },
    UnitDefinition {
        name: "ounce",
        plural_name: "ounces",
        abbreviations: &["ounce", "ounces", "oz", "oz."],
        measurement_type: MeasurementType::Weight,
        system: MeasurementSystem::Imperial,
        conversion_factor: 28.3495,
        metric_equivalent: "gram",
        imperial_equivalent: "ounce",
    },
    // Metric volume
    UnitDefinition {
        name: "milliliter",
        plural_name: "milliliters",
        abbreviations: &["ml", "milliliter", "milliliters", "mL"],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Metric,
        conversion_factor: 1.0,
        metric_equivalent: "milliliter",
        imperial_equivalent: "fluid ounce",
    },
    UnitDefinition {
        name: "liter",
        plural_name: "liters",
        abbreviations: &["l", "liter", "liters", "L"],
        measurement_type: MeasurementType::Volume,
        system: MeasurementSystem::Metric,
        conversion_factor: 1000.0,
        metric_equivalent: "liter",
        imperial_equivalent: "quart",
    },
    // Metric weight
    UnitDefinition {
        name: "gram",
        plural_name: "grams",
        abbreviations: &["g", "gram", "grams", "g."],
        measurement_type: MeasurementType::Weight,
        system: MeasurementSystem::Metric,
        conversion_factor: 1.0,
        metric_equivalent: "gram",
        imperial_equivalent: "ounce",
    },
    UnitDefinition {
        name: "kilogram",
        plural_name: "kilograms",
        abbreviations: &["kg", "kilogram", "kilograms", "kg."],
        measurement_type: MeasurementType::Weight,
        system: MeasurementSystem::Metric,
        conversion_factor: 1000.0,
        metric_equivalent: "kilogram",
        imperial_equivalent: "pound",
    },
];

/// All unit definitions in the catalog
pub fn units() -> &'static [UnitDefinition] {
    UNITS
}

/// Look up a unit by name, plural name or abbreviation
///
/// Matching is case-insensitive and exact; there is no fuzzy matching.
///
/// # Examples
///
/// ```rust
/// use recipe_measure::unit_catalog::find_unit;
///
/// assert!(find_unit("TBSP").is_some());
/// assert!(find_unit("pinch").is_none());
/// ```
pub fn find_unit(text: &str) -> Option<&'static UnitDefinition> {
    let text = text.trim();
    UNITS.iter().find(|unit| {
        unit.name.eq_ignore_ascii_case(text)
            || unit.plural_name.eq_ignore_ascii_case(text)
            || unit
                .abbreviations
                .iter()
                .any(|abbr| abbr.eq_ignore_ascii_case(text))
    })
}

/// Resolve the unit to seed a cross-system conversion with
///
/// Returns the catalog entry named by the unit's metric or imperial
/// equivalent, depending on the target system. The result is only a seed:
/// the converter reselects the final unit by magnitude.
pub fn find_equivalent(
    unit: &UnitDefinition,
    target_system: MeasurementSystem,
) -> Option<&'static UnitDefinition> {
    let name = match target_system {
        MeasurementSystem::Metric => unit.metric_equivalent,
        MeasurementSystem::Imperial => unit.imperial_equivalent,
    };
    find_unit(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_unit_by_name_and_abbreviation() {
        assert_eq!(find_unit("cup").unwrap().name, "cup");
        assert_eq!(find_unit("cups").unwrap().name, "cup");
        assert_eq!(find_unit("c.").unwrap().name, "cup");
        assert_eq!(find_unit("tbsp").unwrap().name, "tablespoon");
        assert_eq!(find_unit("fl oz").unwrap().name, "fluid ounce");
        assert_eq!(find_unit("lbs").unwrap().name, "pound");
        assert_eq!(find_unit("mL").unwrap().name, "milliliter");
    }

    #[test]
    fn test_find_unit_is_case_insensitive() {
        assert_eq!(find_unit("CUPS").unwrap().name, "cup");
        assert_eq!(find_unit("Tablespoon").unwrap().name, "tablespoon");
        assert_eq!(find_unit("KG").unwrap().name, "kilogram");
        assert_eq!(find_unit("L").unwrap().name, "liter");
    }

    #[test]
    fn test_find_unit_rejects_unknown_and_fuzzy() {
        assert!(find_unit("pinch").is_none());
        assert!(find_unit("cupboard").is_none());
        assert!(find_unit("").is_none());
        assert!(find_unit("cu").is_none());
    }

    #[test]
    fn test_find_equivalent_crosses_systems() {
        let cup = find_unit("cup").unwrap();
        let metric = find_equivalent(cup, MeasurementSystem::Metric).unwrap();
        assert_eq!(metric.name, "milliliter");
        assert_eq!(metric.system, MeasurementSystem::Metric);

        let gram = find_unit("gram").unwrap();
        let imperial = find_equivalent(gram, MeasurementSystem::Imperial).unwrap();
        assert_eq!(imperial.name, "ounce");
        assert_eq!(imperial.system, MeasurementSystem::Imperial);
    }

    #[test]
    fn test_cross_system_links_are_well_formed() {
        // Every unit's opposite-system equivalent must exist, keep the same
        // measurement type and actually sit in the opposite system.
        for unit in units() {
            let other = match unit.system {
                MeasurementSystem::Imperial => MeasurementSystem::Metric,
                MeasurementSystem::Metric => MeasurementSystem::Imperial,
            };
            let equivalent = find_equivalent(unit, other)
                .unwrap_or_else(|| panic!("missing equivalent for {}", unit.name));
            assert_eq!(equivalent.measurement_type, unit.measurement_type);
            assert_ne!(equivalent.system, unit.system, "unit {}", unit.name);
        }
    }

    #[test]
    fn test_conversion_factors_are_positive() {
        for unit in units() {
            assert!(unit.conversion_factor > 0.0, "unit {}", unit.name);
        }
    }

    #[test]
    fn test_base_units_have_factor_one() {
        assert_eq!(find_unit("milliliter").unwrap().conversion_factor, 1.0);
        assert_eq!(find_unit("gram").unwrap().conversion_factor, 1.0);
    }
}
