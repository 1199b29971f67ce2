//! Game balance constants
//!
//! Every gameplay number lives here so a page can override it through a
//! JSON blob. Missing fields keep their defaults.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of one simulation tick in milliseconds
    pub tick_ms: f64,
    /// Horizontal distance the player moves per key press (px)
    pub player_speed: f32,
    /// Gap between the player sprite and the bottom of the canvas (px)
    pub player_bottom_margin: f32,
    /// Player size used when the sprite never reports one
    pub fallback_player_width: f32,
    pub fallback_player_height: f32,
    /// Obstacle height (px)
    pub obstacle_height: f32,
    /// Obstacle fall distance per tick (px)
    pub obstacle_speed: f32,
    /// Time between obstacle spawns (ms)
    pub obstacle_interval_ms: f64,
    /// Score awarded for every obstacle that leaves the screen
    pub points_per_obstacle: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Browsers clamp a 1ms interval to roughly 4ms
            tick_ms: 4.0,
            player_speed: 10.0,
            player_bottom_margin: 20.0,
            fallback_player_width: 50.0,
            fallback_player_height: 100.0,
            obstacle_height: 20.0,
            obstacle_speed: 1.0,
            obstacle_interval_ms: 1500.0,
            points_per_obstacle: 10,
        }
    }
}

/// Reasons a tuning blob is rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl Display for TuningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning is not valid JSON: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "tuning field `{}` {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON object and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("tick_ms", self.tick_ms)?;
        positive("player_speed", self.player_speed as f64)?;
        positive("fallback_player_width", self.fallback_player_width as f64)?;
        positive("fallback_player_height", self.fallback_player_height as f64)?;
        positive("obstacle_height", self.obstacle_height as f64)?;
        positive("obstacle_speed", self.obstacle_speed as f64)?;
        positive("obstacle_interval_ms", self.obstacle_interval_ms)?;

        if !(self.player_bottom_margin.is_finite() && self.player_bottom_margin >= 0.0) {
            return Err(TuningError::Invalid {
                field: "player_bottom_margin",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        // One spawn interval is a whole number of ticks
        assert_eq!(tuning.obstacle_interval_ms / tuning.tick_ms, 375.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 25.0, "points_per_obstacle": 1 }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.player_speed, 25.0);
        assert_eq!(tuning.points_per_obstacle, 1);
        assert_eq!(tuning.obstacle_height, Tuning::default().obstacle_height);
        assert_eq!(tuning.obstacle_interval_ms, 1500.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ tick_ms: 4").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning is not valid JSON"));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = Tuning::from_json(r#"{ "obstacle_speed": "fast" }"#).unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let err = Tuning::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "tick_ms",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "obstacle_speed": -1.0 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "tuning field `obstacle_speed` must be a positive number"
        );

        let err = Tuning::from_json(r#"{ "player_bottom_margin": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "player_bottom_margin",
                ..
            }
        ));
    }
}
