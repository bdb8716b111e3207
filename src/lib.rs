//! # Recipe Measure
//!
//! Measurement extraction, unit conversion and recipe scaling for free-text
//! ingredient strings. The crate scans text for quantity+unit occurrences,
//! converts them between imperial and metric with human-appropriate target
//! units, and rescales ingredient lists by fixed or derived factors.
//!
//! All core operations are pure, synchronous computations over immutable
//! inputs; the only stateful type is the per-session
//! [`scaling::RecipeScalingManager`].

pub mod measurement_patterns;
pub mod measurement_scanner;
pub mod quantity_parser;
pub mod scaling;
pub mod unit_catalog;
pub mod unit_converter;

pub use measurement_scanner::{MeasurementMatch, MeasurementScanner};
pub use scaling::{RecipeScalingManager, ScalingEngine, ScalingError, ScalingState};
pub use unit_catalog::{
    find_equivalent, find_unit, MeasurementSystem, MeasurementType, UnitDefinition,
};
pub use unit_converter::UnitConverter;
