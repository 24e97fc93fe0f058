//! Conversion parameters.

use loopweld_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// What to do with a loop whose joined vertices do not form a valid polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateLoopPolicy {
    /// Drop the loop and record it in [`Conversion::dropped`](crate::Conversion::dropped).
    /// A dropped outer loop drops its whole face.
    #[default]
    Skip,
    /// Fail the conversion.
    Fail,
}

/// B-rep conversion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Linear tolerance for endpoint matching and polygon checks (model units).
    pub tolerance: f64,
    /// Sort each loop's segments by ascending length before joining.
    pub sort_by_length: bool,
    /// Handling of degenerate loops.
    pub degenerate_loops: DegenerateLoopPolicy,
    /// Reverse faces that point into the solid.
    pub orient_faces: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT.linear,
            sort_by_length: true,
            degenerate_loops: DegenerateLoopPolicy::Skip,
            orient_faces: true,
        }
    }
}

impl ConversionSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !Tolerance::new(self.tolerance).is_valid() {
            return Err(SettingsError::Invalid(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// The tolerance as a [`Tolerance`].
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.tolerance)
    }

    /// Parse settings from TOML and validate them. Missing keys take defaults.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }
}
