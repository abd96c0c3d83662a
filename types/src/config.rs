//! Controller configuration with eager validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Construction-time contract violation. Nothing at runtime is fallible;
/// a bad configuration is rejected before the machine exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoomConfigError {
    #[error("warp threshold {0} outside [0, 1]")]
    ThresholdOutOfRange(f64),
    #[error("scroll sensitivity {0} must be finite and positive")]
    InvalidSensitivity(f64),
    #[error("warp delay must be non-zero")]
    ZeroWarpDelay,
}

/// Tunables for the zoom/warp interaction.
///
/// Defaults match the reference interaction: the warp fires at 85% zoom,
/// one wheel notch (raw delta 100) moves zoom by 0.3, and the warp
/// transition runs for 1.8 seconds before the nucleus is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Zoom level at which the warp transition is scheduled.
    pub warp_threshold: f64,
    /// Scale applied to raw wheel deltas. Deltas are sign-inverted before
    /// scaling: the host's "scroll forward" is opposite to "zoom in".
    pub scroll_sensitivity: f64,
    /// How long the warp transition stays in flight.
    pub warp_delay: Duration,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            warp_threshold: 0.85,
            scroll_sensitivity: 0.003,
            warp_delay: Duration::from_millis(1800),
        }
    }
}

impl ZoomConfig {
    /// Check the construction-time contract.
    pub fn validate(&self) -> Result<(), ZoomConfigError> {
        if !self.warp_threshold.is_finite() || !(0.0..=1.0).contains(&self.warp_threshold) {
            return Err(ZoomConfigError::ThresholdOutOfRange(self.warp_threshold));
        }
        if !self.scroll_sensitivity.is_finite() || self.scroll_sensitivity <= 0.0 {
            return Err(ZoomConfigError::InvalidSensitivity(self.scroll_sensitivity));
        }
        if self.warp_delay.is_zero() {
            return Err(ZoomConfigError::ZeroWarpDelay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomConfig, ZoomConfigError};
    use std::time::Duration;

    #[test]
    fn defaults_are_valid() {
        let config = ZoomConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.warp_threshold - 0.85).abs() < f64::EPSILON);
        assert!((config.scroll_sensitivity - 0.003).abs() < f64::EPSILON);
        assert_eq!(config.warp_delay, Duration::from_millis(1800));
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let config = ZoomConfig {
                warp_threshold: bad,
                ..ZoomConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ZoomConfigError::ThresholdOutOfRange(_))
            ));
        }
    }

    #[test]
    fn boundary_thresholds_accepted() {
        for edge in [0.0, 1.0] {
            let config = ZoomConfig {
                warp_threshold: edge,
                ..ZoomConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn non_positive_sensitivity_rejected() {
        for bad in [0.0, -0.003, f64::NAN] {
            let config = ZoomConfig {
                scroll_sensitivity: bad,
                ..ZoomConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ZoomConfigError::InvalidSensitivity(_))
            ));
        }
    }

    #[test]
    fn zero_delay_rejected() {
        let config = ZoomConfig {
            warp_delay: Duration::ZERO,
            ..ZoomConfig::default()
        };
        assert_eq!(config.validate(), Err(ZoomConfigError::ZeroWarpDelay));
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let config: ZoomConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ZoomConfig::default());
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let config: ZoomConfig = serde_json::from_str(r#"{"warp_threshold": 0.5}"#).unwrap();
        assert!((config.warp_threshold - 0.5).abs() < f64::EPSILON);
        assert!((config.scroll_sensitivity - 0.003).abs() < f64::EPSILON);
    }
}
