use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted `score_per_line`, so four rows in one tick still fit an `i64` reward
pub const MAX_SCORE_PER_LINE: u64 = i64::MAX as u64 / 4;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Gradual gravity acceleration driven by the level timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeedUpConfig {
    /// Level time between two accelerations
    pub interval_secs: f64,
    /// Amount subtracted from the fall speed on each acceleration
    pub step_secs: f64,
    /// Fall speed never drops below this
    pub min_fall_speed_secs: f64,
}

/// Tunables of the Tetris simulation
///
/// Every field has a default, so a TOML file only needs to name what it changes:
///
/// ```toml
/// fall_speed_secs = 0.2
///
/// [speed_up]
/// interval_secs = 5.0
/// step_secs = 0.005
/// min_fall_speed_secs = 0.12
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TetrisConfig {
    /// Fall time after which gravity moves the piece down one row
    pub fall_speed_secs: f64,
    /// Fixed tick rate used by `Game::step`
    pub ticks_per_second: u32,
    /// Score per cleared row
    pub score_per_line: u64,
    /// Disabled when absent
    pub speed_up: Option<SpeedUpConfig>,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            fall_speed_secs: 0.27,
            ticks_per_second: 350,
            score_per_line: 10,
            speed_up: None,
        }
    }
}

impl TetrisConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: TetrisConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fall_speed_secs.is_finite() && self.fall_speed_secs > 0.0) {
            return Err(ConfigError::Invalid("fall_speed_secs must be greater than 0".to_string()));
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be greater than 0".to_string()));
        }

        if self.score_per_line > MAX_SCORE_PER_LINE {
            return Err(ConfigError::Invalid(format!(
                "score_per_line must be at most {}",
                MAX_SCORE_PER_LINE
            )));
        }

        if let Some(speed_up) = &self.speed_up {
            let positive = |value: f64| value.is_finite() && value > 0.0;
            if !positive(speed_up.interval_secs) || !positive(speed_up.step_secs) {
                return Err(ConfigError::Invalid(
                    "speed_up interval_secs and step_secs must be greater than 0".to_string(),
                ));
            }
            if !positive(speed_up.min_fall_speed_secs) || speed_up.min_fall_speed_secs > self.fall_speed_secs {
                return Err(ConfigError::Invalid(
                    "speed_up min_fall_speed_secs must be in (0, fall_speed_secs]".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn fall_speed(&self) -> Duration {
        Duration::from_secs_f64(self.fall_speed_secs)
    }

    /// Elapsed time credited to each fixed tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TetrisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fall_speed(), Duration::from_millis(270));
        assert_eq!(config.score_per_line, 10);
        assert!(config.speed_up.is_none());
        assert_eq!(config.tick_interval(), Duration::from_nanos(2_857_142));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TetrisConfig::from_toml_str("score_per_line = 40\n").unwrap();
        assert_eq!(config.score_per_line, 40);
        assert_eq!(config.ticks_per_second, 350);
    }

    #[test]
    fn test_speed_up_table() {
        let source = r#"
            fall_speed_secs = 0.3

            [speed_up]
            interval_secs = 5.0
            step_secs = 0.005
            min_fall_speed_secs = 0.12
        "#;
        let config = TetrisConfig::from_toml_str(source).unwrap();
        let speed_up = config.speed_up.unwrap();
        assert_eq!(speed_up.interval_secs, 5.0);
        assert_eq!(speed_up.min_fall_speed_secs, 0.12);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            TetrisConfig::from_toml_str("fall_speed_secs = 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            TetrisConfig::from_toml_str("ticks_per_second = 0"),
            Err(ConfigError::Invalid(_))
        ));

        let config = TetrisConfig {
            speed_up: Some(SpeedUpConfig {
                interval_secs: 5.0,
                step_secs: 0.01,
                min_fall_speed_secs: 1.0,
            }),
            ..TetrisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_score_per_line_bound() {
        let config = TetrisConfig {
            score_per_line: MAX_SCORE_PER_LINE,
            ..TetrisConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = TetrisConfig {
            score_per_line: MAX_SCORE_PER_LINE + 1,
            ..TetrisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            TetrisConfig::from_toml_str(&format!("score_per_line = {}", u64::MAX)),
            Err(ConfigError::Invalid(_)) | Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(TetrisConfig::from_toml_str("fall_speed_secs = \"fast\""), Err(ConfigError::Parse(_))));
        assert!(matches!(TetrisConfig::from_toml_str("unknown = 1"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(TetrisConfig::load("/nonexistent/tetris.toml"), Err(ConfigError::Io(_))));
    }
}
