//! # Recipe Scaling Module
//!
//! Applies a multiplier to every measurement in an ingredient string or list.
//! Scaling only ever rewrites the numeric portion of a match; the unit word
//! and surrounding punctuation stay exactly as the author wrote them.
//!
//! The module has two layers: the pure [`ScalingEngine`] functions, and
//! [`RecipeScalingManager`], a per-editing-session wrapper that keeps the
//! original ingredient list as an immutable baseline, derives the scaled list
//! from it, and notifies registered observers on every change.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_measure::scaling::ScalingEngine;
//!
//! let engine = ScalingEngine::new();
//! assert_eq!(engine.scale_one("2 cups flour", 2.0), "4 cups flour");
//! assert_eq!(engine.scale_one("1 cup sugar", 0.5), "½ cup sugar");
//! ```

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::measurement_scanner::MeasurementScanner;
use crate::quantity_parser;

/// Errors that can occur while deriving a scaling factor
#[derive(Debug, Clone, PartialEq)]
pub enum ScalingError {
    /// The ingredient text contains no measurement to scale against
    NoMeasurementFound,
    /// The first measurement is zero, so no factor is derivable
    ZeroQuantity,
}

impl fmt::Display for ScalingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingError::NoMeasurementFound => write!(f, "No measurement found in text"),
            ScalingError::ZeroQuantity => {
                write!(f, "Cannot derive a factor from a zero quantity")
            }
        }
    }
}

impl std::error::Error for ScalingError {}

/// Stateless scaling service; construct once and share
pub struct ScalingEngine {
    scanner: MeasurementScanner,
}

impl ScalingEngine {
    pub fn new() -> Self {
        Self {
            scanner: MeasurementScanner::new(),
        }
    }

    /// Multiply every measurement in the text by the factor
    ///
    /// Only the numeric portion of each match is replaced; units and
    /// punctuation pass through verbatim. Text without measurements, and any
    /// factor of exactly 1.0, return the input unchanged.
    pub fn scale_one(&self, text: &str, factor: f64) -> String {
        if factor == 1.0 {
            return text.to_string();
        }
        let Some(matches) = self.scanner.extract_measurements(text) else {
            trace!("Nothing to scale in '{}'", text);
            return text.to_string();
        };

        let mut result = text.to_string();
        for m in matches.iter().rev() {
            let formatted = quantity_parser::format(m.value * factor);
            debug!(
                "Scaling '{}' by {} -> '{}'",
                &text[m.start_pos..m.quantity_end_pos],
                factor,
                formatted
            );
            result.replace_range(m.start_pos..m.quantity_end_pos, &formatted);
        }
        result
    }

    /// Element-wise [`scale_one`](Self::scale_one) over a list of ingredient strings
    pub fn scale_many(&self, texts: &[String], factor: f64) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.scale_one(text, factor))
            .collect()
    }

    /// Derive the factor that brings the first measurement in the text to
    /// the target value
    ///
    /// # Errors
    ///
    /// [`ScalingError::NoMeasurementFound`] when the text has no measurement,
    /// [`ScalingError::ZeroQuantity`] when the first measurement is zero.
    pub fn factor_from_target(&self, text: &str, target_value: f64) -> Result<f64, ScalingError> {
        let matches = self
            .scanner
            .extract_measurements(text)
            .ok_or(ScalingError::NoMeasurementFound)?;
        let first = &matches[0];
        if first.value == 0.0 {
            return Err(ScalingError::ZeroQuantity);
        }
        Ok(target_value / first.value)
    }
}

impl Default for ScalingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scaling state for one recipe-editing session
///
/// `scaled_quantities` is always the pointwise scaling of
/// `original_quantities` by `current_factor`; it is never edited on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingState {
    /// Immutable baseline ingredient strings
    pub original_quantities: Vec<String>,
    /// The factor currently applied
    pub current_factor: f64,
    /// Derived: baseline with every measurement multiplied by the factor
    pub scaled_quantities: Vec<String>,
    /// Whether the factor was derived from a custom target quantity
    pub is_custom_scaling: bool,
    /// Index of the ingredient the custom target applies to
    pub custom_target_index: Option<usize>,
    /// The custom target quantity
    pub custom_target_value: Option<f64>,
}

impl Default for ScalingState {
    fn default() -> Self {
        Self {
            original_quantities: Vec::new(),
            current_factor: 1.0,
            scaled_quantities: Vec::new(),
            is_custom_scaling: false,
            custom_target_index: None,
            custom_target_value: None,
        }
    }
}

type Observer = Box<dyn Fn(&ScalingState)>;

/// Session wrapper around [`ScalingEngine`] with observable state
///
/// UI layers register callbacks via [`on_change`](Self::on_change) and render
/// `scaled_quantities` as-is; the manager never depends on any UI framework.
/// One manager belongs to one editing session and one logical owner; callers
/// serialize concurrent mutation themselves.
pub struct RecipeScalingManager {
    engine: ScalingEngine,
    state: ScalingState,
    observers: Vec<Observer>,
}

impl RecipeScalingManager {
    pub fn new() -> Self {
        Self {
            engine: ScalingEngine::new(),
            state: ScalingState::default(),
            observers: Vec::new(),
        }
    }

    /// Current session state
    pub fn state(&self) -> &ScalingState {
        &self.state
    }

    /// The scaled ingredient strings for display
    pub fn scaled_quantities(&self) -> &[String] {
        &self.state.scaled_quantities
    }

    /// Register a callback fired after every state change
    pub fn on_change(&mut self, observer: impl Fn(&ScalingState) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replace the baseline ingredient list and reset scaling
    pub fn set_original(&mut self, ingredients: Vec<String>) {
        self.state.scaled_quantities = ingredients.clone();
        self.state.original_quantities = ingredients;
        self.state.current_factor = 1.0;
        self.clear_custom_flags();
        self.notify();
    }

    /// Apply a uniform factor to the baseline
    pub fn apply_factor(&mut self, factor: f64) {
        self.state.current_factor = factor;
        self.clear_custom_flags();
        self.recompute();
        self.notify();
    }

    /// Derive the factor from a target quantity for one ingredient
    ///
    /// A bad index or an ingredient without a usable first measurement leaves
    /// the state completely unchanged.
    pub fn apply_custom_scaling(&mut self, index: usize, target_value: f64) {
        let Some(ingredient) = self.state.original_quantities.get(index) else {
            // Caller bug, not recipe-data variability
            warn!(
                "Custom scaling index {} out of range ({} ingredients)",
                index,
                self.state.original_quantities.len()
            );
            return;
        };
        let factor = match self.engine.factor_from_target(ingredient, target_value) {
            Ok(factor) => factor,
            Err(err) => {
                debug!("Custom scaling not applicable to '{}': {}", ingredient, err);
                return;
            }
        };

        self.state.current_factor = factor;
        self.state.is_custom_scaling = true;
        self.state.custom_target_index = Some(index);
        self.state.custom_target_value = Some(target_value);
        self.recompute();
        self.notify();
    }

    /// Cancel scaling: factor back to 1.0, scaled list back to the baseline
    pub fn reset(&mut self) {
        self.state.current_factor = 1.0;
        self.clear_custom_flags();
        self.state.scaled_quantities = self.state.original_quantities.clone();
        self.notify();
    }

    fn clear_custom_flags(&mut self) {
        self.state.is_custom_scaling = false;
        self.state.custom_target_index = None;
        self.state.custom_target_value = None;
    }

    fn recompute(&mut self) {
        self.state.scaled_quantities = self
            .engine
            .scale_many(&self.state.original_quantities, self.state.current_factor);
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.state);
        }
    }
}

impl Default for RecipeScalingManager {
    fn default() -> Self {
        Self::new()
    }
}
