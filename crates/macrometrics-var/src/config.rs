//! Model construction settings.

use macrometrics_types::{MacroError, Result, SpacingConfig};
use serde::{Deserialize, Serialize};

/// Default tolerance for the covariance symmetry and definiteness checks.
pub const DEFAULT_COVARIANCE_TOLERANCE: f64 = 1e-8;

/// Settings applied when a [`VarModel`](crate::VarModel) is constructed.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides:
///
/// ```
/// use macrometrics_var::VarConfig;
///
/// let config = VarConfig::from_json(r#"{ "spacing": { "unit": "quarter" } }"#).unwrap();
/// assert!(config.check_covariance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarConfig {
    /// How observation spacing is measured.
    pub spacing: SpacingConfig,
    /// Tolerance, relative to the largest variance, for the covariance checks.
    pub covariance_tolerance: f64,
    /// Whether every covariance draw is checked for symmetry and definiteness.
    pub check_covariance: bool,
}

impl VarConfig {
    /// Parses a config from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::Config`] if the JSON is malformed, or
    /// [`MacroError::InvalidArgument`] if a tolerance is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with the given spacing settings.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: SpacingConfig) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns a copy with the covariance checks turned off.
    #[must_use]
    pub const fn without_covariance_check(mut self) -> Self {
        self.check_covariance = false;
        self
    }

    /// Checks that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`MacroError::InvalidArgument`] otherwise.
    pub fn validate(&self) -> Result<()> {
        self.spacing.validate()?;
        if !self.covariance_tolerance.is_finite() || self.covariance_tolerance < 0.0 {
            return Err(MacroError::InvalidArgument(format!(
                "covariance tolerance must be finite and non-negative, got {}",
                self.covariance_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            spacing: SpacingConfig::default(),
            covariance_tolerance: DEFAULT_COVARIANCE_TOLERANCE,
            check_covariance: true,
        }
    }
}
