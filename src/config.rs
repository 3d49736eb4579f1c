//! Reference ranges used by the derived metrics.
//!
//! Values come from built-in defaults, optionally overridden by a YAML file
//! and then by `SME_*` environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::metrics::{APOGEE_KM, DECLINATION_SPAN_DEG, PERIGEE_KM};

pub const ENV_PERIGEE_KM: &str = "SME_PERIGEE_KM";
pub const ENV_APOGEE_KM: &str = "SME_APOGEE_KM";
pub const ENV_DECLINATION_SPAN_DEG: &str = "SME_DECLINATION_SPAN_DEG";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Yaml(serde_yaml::Error),
    InvalidValue {
        key: String,
        value: String,
    },
    InvalidRange(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read config file {}: {}", path, source)
            }
            ConfigError::Yaml(e) => write!(f, "Failed to parse YAML: {}", e),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
            ConfigError::InvalidRange(msg) => write!(f, "Invalid reference range: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

/// Reference constants for distance and declination percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Perigee distance in km (100% distance)
    pub perigee_km: f64,
    /// Apogee distance in km (0% distance)
    pub apogee_km: f64,
    /// Half-width of the declination range in degrees
    pub declination_span_deg: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            perigee_km: PERIGEE_KM,
            apogee_km: APOGEE_KM,
            declination_span_deg: DECLINATION_SPAN_DEG,
        }
    }
}

impl MetricsConfig {
    /// Load a config from YAML. Keys left out keep their defaults.
    ///
    /// Not validated here; call [`MetricsConfig::validate`] once all
    /// overrides are applied.
    ///
    /// ```yaml
    /// perigee_km: 363300
    /// apogee_km: 405500
    /// declination_span_deg: 28.6
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: MetricsConfig = serde_yaml::from_str(&contents)?;

        tracing::debug!(path = %path.display(), ?config, "loaded metrics config");
        Ok(config)
    }

    /// Apply `SME_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment-variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut f64); 3] = [
            (ENV_PERIGEE_KM, &mut self.perigee_km),
            (ENV_APOGEE_KM, &mut self.apogee_km),
            (ENV_DECLINATION_SPAN_DEG, &mut self.declination_span_deg),
        ];

        for (key, target) in targets {
            if let Some(raw) = lookup(key) {
                *target = parse_number(key, &raw)?;
                tracing::debug!(key, value = *target, "config override");
            }
        }

        Ok(self)
    }

    /// Check that the ranges can produce meaningful percentages.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [self.perigee_km, self.apogee_km, self.declination_span_deg];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidRange("values must be finite".to_string()));
        }
        if self.apogee_km <= self.perigee_km {
            return Err(ConfigError::InvalidRange(format!(
                "apogee ({} km) must exceed perigee ({} km)",
                self.apogee_km, self.perigee_km
            )));
        }
        if self.declination_span_deg <= 0.0 {
            return Err(ConfigError::InvalidRange(format!(
                "declination span ({}°) must be positive",
                self.declination_span_deg
            )));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_matches_reference_constants() {
        let config = MetricsConfig::default();

        assert_eq!(config.perigee_km, 363300.0);
        assert_eq!(config.apogee_km, 405500.0);
        assert_eq!(config.declination_span_deg, 28.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apogee_km: 406700").unwrap();

        let config = MetricsConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.apogee_km, 406700.0);
        assert_eq!(config.perigee_km, 363300.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MetricsConfig::load_from_file("/nonexistent/metrics.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_inverted_file_range_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "perigee_km: 405500\napogee_km: 363300").unwrap();

        let config = MetricsConfig::load_from_file(file.path()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRange(_)));
    }

    #[test]
    fn test_override_repairs_file_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "perigee_km: 363300\napogee_km: 300000").unwrap();

        let config = MetricsConfig::load_from_file(file.path())
            .unwrap()
            .with_overrides(|key| (key == ENV_APOGEE_KM).then(|| "405500".to_string()))
            .unwrap();

        assert_eq!(config.apogee_km, 405500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_PERIGEE_KM, "356500"),
            (ENV_DECLINATION_SPAN_DEG, " 18.3 "),
        ]
        .into_iter()
        .collect();

        let config = MetricsConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.perigee_km, 356500.0);
        assert_eq!(config.apogee_km, 405500.0);
        assert_eq!(config.declination_span_deg, 18.3);
    }

    #[test]
    fn test_override_not_a_number() {
        let err = MetricsConfig::default()
            .with_overrides(|key| (key == ENV_APOGEE_KM).then(|| "far".to_string()))
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid value 'far' for SME_APOGEE_KM");
    }

    #[test]
    fn test_validate_span() {
        let config = MetricsConfig {
            declination_span_deg: 0.0,
            ..MetricsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
