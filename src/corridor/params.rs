use serde::{Deserialize, Serialize};

use crate::error::{CorridorError, Result};
use crate::operations::smooth::MIN_RESOLUTION;

/// Buffer width used when none is given.
pub const DEFAULT_WIDTH: f64 = 0.02;

/// Number of smoothed boundary samples used when none is given.
pub const DEFAULT_RESOLUTION: usize = 50;

/// Construction parameters of a corridor.
///
/// Deserialization runs the same validation as [`CorridorParams::new`], so
/// a parameter file can never produce an unusable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParamsRepr")]
pub struct CorridorParams {
    width: f64,
    resolution: usize,
}

#[derive(Deserialize)]
struct ParamsRepr {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_resolution")]
    resolution: usize,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

impl TryFrom<ParamsRepr> for CorridorParams {
    type Error = CorridorError;

    fn try_from(repr: ParamsRepr) -> Result<Self> {
        Self::new(repr.width, repr.resolution)
    }
}

impl CorridorParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `CorridorError::InvalidInput` if `width` is not positive and
    /// finite, or `resolution` is below 4.
    pub fn new(width: f64, resolution: usize) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(CorridorError::InvalidInput(format!(
                "buffer width must be positive and finite, got {width}"
            )));
        }
        if resolution < MIN_RESOLUTION {
            return Err(CorridorError::InvalidInput(format!(
                "smoothing resolution must be at least {MIN_RESOLUTION}, got {resolution}"
            )));
        }
        Ok(Self { width, resolution })
    }

    /// Parameters with the given width and the default resolution.
    ///
    /// # Errors
    ///
    /// Same as [`CorridorParams::new`].
    pub fn with_width(width: f64) -> Result<Self> {
        Self::new(width, DEFAULT_RESOLUTION)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

impl Default for CorridorParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = CorridorParams::default();
        assert!((params.width() - 0.02).abs() < f64::EPSILON);
        assert_eq!(params.resolution(), 50);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(CorridorParams::new(0.0, 50).is_err());
        assert!(CorridorParams::new(-0.1, 50).is_err());
        assert!(CorridorParams::new(f64::INFINITY, 50).is_err());
        assert!(CorridorParams::new(0.1, 3).is_err());
        assert!(CorridorParams::new(0.1, 4).is_ok());
    }

    #[test]
    fn deserializes_with_defaults_and_validation() {
        let params: CorridorParams = serde_json::from_str(r#"{"width": 0.5}"#).unwrap();
        assert!((params.width() - 0.5).abs() < f64::EPSILON);
        assert_eq!(params.resolution(), DEFAULT_RESOLUTION);

        let bad = serde_json::from_str::<CorridorParams>(r#"{"width": -1.0, "resolution": 10}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_fields() {
        let json = serde_json::to_value(CorridorParams::new(0.25, 12).unwrap()).unwrap();
        assert_eq!(json["width"], 0.25);
        assert_eq!(json["resolution"], 12);
    }
}
