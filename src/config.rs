//! Configuration values of the [Engine](crate::Engine).

use crate::efmt::{FormatterConfig, UNICODE_FMT_CFG};

/// Largest number of variables accepted by default.
///
/// Karnaugh maps are limited to 5 variables and a table over 5 variables has 32 rows.
pub const DEFAULT_MAX_VARIABLES: usize = 5;

/// Deepest nesting of operators accepted when building expression trees.
///
/// Evaluation, truth tables and circuits do not build trees and are not limited.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Settings shared by all operations of an [Engine](crate::Engine).
///
/// ```
/// use lokit::{EngineConfig, efmt::ASCII_FMT_CFG};
///
/// let config = EngineConfig::default()
///     .with_strict_variables(true)
///     .with_formatter(&ASCII_FMT_CFG);
/// assert_eq!(config.max_variables, 5);
/// ```
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Reject unbound variables during evaluation instead of reading them as false
    pub strict_variables: bool,

    /// Reject expressions using more variables when building truth tables
    pub max_variables: usize,

    /// Glyphs used to write canonical forms and rewritten expressions
    pub formatter: &'static FormatterConfig<'static>,

    /// Geometry of compiled circuits
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            max_variables: DEFAULT_MAX_VARIABLES,
            formatter: &UNICODE_FMT_CFG,
            layout: LayoutConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    pub fn with_max_variables(mut self, max: usize) -> Self {
        self.max_variables = max;
        self
    }

    pub fn with_formatter(mut self, formatter: &'static FormatterConfig<'static>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Placement of the gates of a circuit.
///
/// Inputs are stacked in the first column, each level of gates takes the next column
/// and the output is placed after the deepest level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub start_x: f64,
    pub start_y: f64,
    /// Vertical distance between two inputs
    pub input_spacing: f64,
    /// Vertical distance between two gates of the same level
    pub vertical_spacing: f64,
    /// Horizontal distance between two levels
    pub horizontal_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            start_y: 150.0,
            input_spacing: 80.0,
            vertical_spacing: 100.0,
            horizontal_spacing: 150.0,
        }
    }
}
