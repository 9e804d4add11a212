use crate::core::utils::geometry::Axis;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_STEP_DEGREES: i32 = 5;
pub const DEFAULT_STEPS: usize = 72;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Parameters of a rotation batch: `steps` rotations per axis, `step_degrees` apart.
///
/// Step `i` of every axis is rotated by `i * step_degrees` (normalized into
/// `[0, 360)`). The default is 72 steps of 5 degrees, a full turn per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpinConfig {
    pub step_degrees: i32,
    pub steps: usize,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            step_degrees: DEFAULT_STEP_DEGREES,
            steps: DEFAULT_STEPS,
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "steps",
                reason: "at least one step is required".to_string(),
            });
        }
        if self.total_molecules().is_none() {
            return Err(ConfigError::InvalidValue {
                parameter: "steps",
                reason: format!(
                    "{} steps per axis overflows the batch size",
                    self.steps
                ),
            });
        }
        if self.step_degrees == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "step_degrees",
                reason: "a zero step would produce identical rotations".to_string(),
            });
        }
        Ok(())
    }

    /// Number of clones a batch with this configuration holds, or `None` on overflow.
    pub fn total_molecules(&self) -> Option<usize> {
        self.steps.checked_mul(Axis::ALL.len())
    }

    /// Rotation angle of step `step`, in degrees within `[0, 360)`.
    pub fn angle_at(&self, step: usize) -> i32 {
        let raw = (step as i128) * i128::from(self.step_degrees);
        raw.rem_euclid(360) as i32
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Default)]
pub struct SpinConfigBuilder {
    step_degrees: Option<i32>,
    steps: Option<usize>,
}

impl SpinConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_degrees(mut self, degrees: i32) -> Self {
        self.step_degrees = Some(degrees);
        self
    }
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn build(self) -> Result<SpinConfig, ConfigError> {
        let config = SpinConfig {
            step_degrees: self
                .step_degrees
                .ok_or(ConfigError::MissingParameter("step_degrees"))?,
            steps: self.steps.ok_or(ConfigError::MissingParameter("steps"))?,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_seventy_two_five_degree_steps() {
        let config = SpinConfig::default();
        assert_eq!(config.steps, 72);
        assert_eq!(config.step_degrees, 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.angle_at(0), 0);
        assert_eq!(config.angle_at(71), 355);
    }

    #[test]
    fn angle_at_normalizes_into_a_single_turn() {
        let config = SpinConfig {
            step_degrees: -30,
            steps: 4,
        };
        assert_eq!(config.angle_at(1), 330);
        assert_eq!(config.angle_at(12), 0);

        let config = SpinConfig {
            step_degrees: 100,
            steps: 10,
        };
        assert_eq!(config.angle_at(4), 40);
    }

    #[test]
    fn rejects_step_counts_that_overflow_the_batch_size() {
        let result = SpinConfig::from_toml_str("steps = 9223372036854775807");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { parameter: "steps", .. })
        ));

        let config = SpinConfig {
            step_degrees: 5,
            steps: usize::MAX / 3 + 1,
        };
        assert_eq!(config.total_molecules(), None);
        assert!(config.validate().is_err());

        assert_eq!(SpinConfig::default().total_molecules(), Some(216));
    }

    #[test]
    fn builder_builds_valid_config() {
        let config = SpinConfigBuilder::new()
            .step_degrees(10)
            .steps(36)
            .build()
            .unwrap();
        assert_eq!(
            config,
            SpinConfig {
                step_degrees: 10,
                steps: 36
            }
        );
    }

    #[test]
    fn builder_reports_missing_parameters() {
        let result = SpinConfigBuilder::new().steps(3).build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingParameter("step_degrees"))
        ));

        let result = SpinConfigBuilder::new().step_degrees(3).build();
        assert!(matches!(result, Err(ConfigError::MissingParameter("steps"))));
    }

    #[test]
    fn builder_rejects_zero_values() {
        let result = SpinConfigBuilder::new().step_degrees(5).steps(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { parameter: "steps", .. })
        ));

        let result = SpinConfigBuilder::new().step_degrees(0).steps(10).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "step_degrees",
                ..
            })
        ));
    }

    #[test]
    fn from_toml_str_fills_missing_keys_with_defaults() {
        let config = SpinConfig::from_toml_str("steps = 8").unwrap();
        assert_eq!(config.steps, 8);
        assert_eq!(config.step_degrees, DEFAULT_STEP_DEGREES);

        let config = SpinConfig::from_toml_str("").unwrap();
        assert_eq!(config, SpinConfig::default());
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            SpinConfig::from_toml_str("spin_speed = 3"),
            Err(ConfigError::Toml { .. })
        ));
        assert!(matches!(
            SpinConfig::from_toml_str("step_degrees = 0"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn loads_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "step_degrees = 15\nsteps = 24\n").unwrap();

        let config = SpinConfig::load(file.path()).unwrap();

        assert_eq!(config.step_degrees, 15);
        assert_eq!(config.steps, 24);
    }

    #[test]
    fn returns_io_error_for_nonexistent_file() {
        let result = SpinConfig::load(Path::new("nonexistent_spin_config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn returns_toml_error_for_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "this is not valid toml").unwrap();

        let result = SpinConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }
}
