//! CLI configuration management.
//!
//! Handles loading configuration from a TOML file with environment variable
//! override support.
//!
//! ```toml
//! log_level = "info"
//! output_dir = "figures"
//! seed = 42
//!
//! [study]
//! starting_levels = [0.2, 80.0]
//!
//! [study.series]
//! annual_vols = [0.85, 0.18]
//! correlation = -0.75
//! samples = 500
//!
//! [render]
//! format = "html"
//!
//! [render.style]
//! theme = "ggplot"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use volviz_models::study::StudyConfig;
use volviz_render::sink::FigureFormat;
use volviz_render::style::{ChartTheme, FigureStyle};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in the config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more validation failures
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Style handed to every chart builder
    pub style: FigureStyle,
    /// On-disk format
    pub format: FigureFormat,
    /// Regression annotation position; placed at the top-left of the data when unset
    pub annotation: Option<[f64; 2]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: FigureStyle::default(),
            format: FigureFormat::Json,
            annotation: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolvizConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for figures and tables
    pub output_dir: PathBuf,
    /// Default seed
    pub seed: u64,
    /// Study parameters
    pub study: StudyConfig,
    /// Rendering options
    pub render: RenderConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VolvizConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_dir: PathBuf::from("figures"),
            seed: 42,
            study: StudyConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl VolvizConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("VOLVIZ_SEED").and_then(|v| v.parse().ok()) {
            self.seed = seed;
        }

        if let Some(samples) = lookup("VOLVIZ_SAMPLES").and_then(|v| v.parse().ok()) {
            self.study.series.samples = samples;
        }

        if let Some(output_dir) = lookup("VOLVIZ_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(log_level) = lookup("VOLVIZ_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(theme) = lookup("VOLVIZ_THEME").and_then(|v| v.parse::<ChartTheme>().ok()) {
            self.render.style.theme = theme;
        }

        self
    }

    /// Validate the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }

        if let Err(e) = self.study.validate() {
            errors.push(format!("study: {}", e));
        }

        if self.study.series.samples < 3 {
            errors.push(format!(
                "study.series.samples {} too small; at least 3 are needed to fit differences",
                self.study.series.samples
            ));
        }

        let style = &self.render.style;
        if style.width == 0 || style.height == 0 {
            errors.push("render.style width and height must be positive".to_string());
        }

        if let Some([x, y]) = self.render.annotation {
            if !x.is_finite() || !y.is_finite() {
                errors.push("render.annotation coordinates must be finite".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_is_valid() {
        assert!(VolvizConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = VolvizConfig::from_toml_str(
            r#"
            seed = 7

            [study.series]
            annual_vols = [0.5, 0.25]
            correlation = 0.3
            samples = 250

            [render]
            format = "html"

            [render.style]
            theme = "ggplot"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.study.series.samples, 250);
        assert_eq!(config.study.series.drift, [0.0, 0.0]);
        assert_eq!(config.study.starting_levels, [0.2, 80.0]);
        assert_eq!(config.render.format, FigureFormat::Html);
        assert_eq!(config.render.style.theme, ChartTheme::Ggplot);
        assert_eq!(config.render.style.width, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            VolvizConfig::from_toml_str("seed = \"not a number\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("VOLVIZ_SEED", "99"),
            ("VOLVIZ_SAMPLES", "120"),
            ("VOLVIZ_OUTPUT_DIR", "/tmp/out"),
            ("VOLVIZ_LOG_LEVEL", "debug"),
            ("VOLVIZ_THEME", "dark"),
        ]
        .into_iter()
        .collect();
        let config = VolvizConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.seed, 99);
        assert_eq!(config.study.series.samples, 120);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.render.style.theme, ChartTheme::Dark);
    }

    #[test]
    fn test_bad_override_ignored() {
        let config = VolvizConfig::default().with_overrides(|k| {
            (k == "VOLVIZ_SEED").then(|| "abc".to_string())
        });
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validation_collects_errors() {
        let mut config = VolvizConfig::default();
        config.log_level = "loud".to_string();
        config.study.series.correlation = 2.0;
        config.render.style.width = 0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3, "{:?}", errors);
                assert!(errors[0].contains("loud"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_samples() {
        let mut config = VolvizConfig::default();
        config.study.series.samples = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = VolvizConfig::load_or_default(Path::new("/nonexistent/volviz.toml")).unwrap();
        assert_eq!(config, VolvizConfig::default());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = VolvizConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(VolvizConfig::from_toml_str(&text).unwrap(), config);
    }
}
