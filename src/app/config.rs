//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Inference engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Per-channel smoothing settings
    #[serde(default)]
    pub filter: FilterConfig,
    /// Sensor stream settings
    #[serde(default)]
    pub stream: StreamConfig,
}

/// Inference engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sampling intervals per set during defuzzification
    pub defuzzify_samples: usize,
    /// Plateau width of the profile's triangular sets
    pub plateau_width: f64,
}

/// Kalman smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Smooth each channel before fuzzification
    pub enabled: bool,
    /// Process noise variance (q)
    pub process_noise: f64,
    /// Measurement noise variance (r)
    pub measurement_noise: f64,
}

/// Sensor stream configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Frame ring buffer size
    pub ring_buffer_size: usize,
    /// Expected sensor tick rate (Hz)
    pub tick_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defuzzify_samples: crate::fuzzy::variable::DEFAULT_DEFUZZIFY_SAMPLES,
            plateau_width: crate::fuzzy::membership::DEFAULT_PLATEAU_WIDTH,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            process_noise: 1e-3,
            measurement_noise: 0.1,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            ring_buffer_size: 1024,
            tick_hz: 50,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.engine.defuzzify_samples == 0 {
            return Err(crate::Error::Configuration(
                "defuzzify_samples must be > 0".to_string(),
            ));
        }
        if !self.engine.plateau_width.is_finite() || self.engine.plateau_width < 0.0 {
            return Err(crate::Error::Configuration(format!(
                "plateau_width must be finite and >= 0, got {}",
                self.engine.plateau_width
            )));
        }
        if !(self.filter.process_noise.is_finite() && self.filter.process_noise > 0.0) {
            return Err(crate::Error::Configuration(format!(
                "process_noise must be > 0, got {}",
                self.filter.process_noise
            )));
        }
        if !(self.filter.measurement_noise.is_finite() && self.filter.measurement_noise > 0.0) {
            return Err(crate::Error::Configuration(format!(
                "measurement_noise must be > 0, got {}",
                self.filter.measurement_noise
            )));
        }
        if !self.stream.ring_buffer_size.is_power_of_two() {
            return Err(crate::Error::Configuration(format!(
                "ring_buffer_size must be a power of 2, got {}",
                self.stream.ring_buffer_size
            )));
        }
        if self.stream.tick_hz == 0 {
            return Err(crate::Error::Configuration("tick_hz must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture_fuzzy").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Configuration(e.to_string()))
    }

    /// Look up a value by dotted key, e.g. `engine.defuzzify_samples`
    pub fn get_value(&self, key: &str) -> Result<toml::Value, crate::Error> {
        let root = self.to_value()?;
        let mut current = &root;
        for part in key.split('.') {
            current = current.get(part).ok_or_else(|| unknown_key(key))?;
        }
        Ok(current.clone())
    }

    /// Return a copy with the field at `key` replaced by `raw`.
    ///
    /// `raw` is parsed as a TOML value (`false`, `250`, `0.2`); anything that
    /// does not parse is taken as a plain string. Only existing leaf keys can
    /// be set, and the result must deserialize and pass [`Config::validate`].
    pub fn with_value(&self, key: &str, raw: &str) -> Result<Self, crate::Error> {
        let (section, leaf) = match key.rsplit_once('.') {
            Some((section, leaf)) => (Some(section), leaf),
            None => (None, key),
        };

        let mut root = self.to_value()?;
        let mut current = &mut root;
        for part in section.into_iter().flat_map(|s| s.split('.')) {
            current = current.get_mut(part).ok_or_else(|| unknown_key(key))?;
        }
        let table = current.as_table_mut().ok_or_else(|| unknown_key(key))?;
        match table.get_mut(leaf) {
            Some(slot) if !slot.is_table() => *slot = parse_raw_value(raw),
            _ => return Err(unknown_key(key)),
        }

        let config: Self = root
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Configuration(format!("{}: {}", key, e)))?;
        config.validate()?;
        Ok(config)
    }

    fn to_value(&self) -> Result<toml::Value, crate::Error> {
        toml::Value::try_from(self).map_err(|e| crate::Error::Configuration(e.to_string()))
    }
}

fn unknown_key(key: &str) -> crate::Error {
    crate::Error::Configuration(format!("unknown configuration key '{}'", key))
}

fn parse_raw_value(raw: &str) -> toml::Value {
    format!("value = {}", raw)
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.defuzzify_samples, 100);
        assert_eq!(config.engine.plateau_width, 0.1);
        assert!(config.filter.enabled);
        assert_eq!(config.stream.ring_buffer_size, 1024);
        assert_eq!(config.stream.tick_hz, 50);
    }

    #[test]
    fn test_config_serialization() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[engine]"));
        assert!(toml.contains("[filter]"));
        assert!(toml.contains("[stream]"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original = Config::default();
        original.engine.defuzzify_samples = 250;
        original.filter.enabled = false;
        original.stream.ring_buffer_size = 256;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.engine.defuzzify_samples, 250);
        assert!(!loaded.filter.enabled);
        assert_eq!(loaded.stream.ring_buffer_size, 256);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = Config::load(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_invalid_toml_parsing() {
        let result: Result<Config, _> = toml::from_str("this is not valid toml {{{}}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str(
            r#"
[engine]
defuzzify_samples = 50
plateau_width = 0.2
"#,
        )
        .expect("Partial config should deserialize");
        assert_eq!(config.engine.defuzzify_samples, 50);
        assert!(config.filter.enabled);
        assert_eq!(config.stream.tick_hz, 50);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_samples() {
        let mut config = Config::default();
        config.engine.defuzzify_samples = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_plateau() {
        let mut config = Config::default();
        config.engine.plateau_width = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_noise_must_be_positive() {
        let mut config = Config::default();
        config.filter.process_noise = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filter.measurement_noise = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ring_buffer_not_power_of_two() {
        let mut config = Config::default();
        config.stream.ring_buffer_size = 1000;
        assert!(config.validate().is_err());
        config.stream.ring_buffer_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tick_rate() {
        let mut config = Config::default();
        config.stream.tick_hz = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_get_value_by_dotted_key() {
        let config = Config::default();
        assert_eq!(
            config.get_value("engine.defuzzify_samples").unwrap(),
            toml::Value::Integer(100)
        );
        assert_eq!(
            config.get_value("filter.enabled").unwrap(),
            toml::Value::Boolean(true)
        );
        assert!(config.get_value("engine").unwrap().is_table());
        assert!(config.get_value("engine.missing").is_err());
        assert!(config.get_value("nope.defuzzify_samples").is_err());
    }

    #[test]
    fn test_set_value_round_trip_through_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("custom.toml");
        Config::default().save(&config_path).unwrap();

        let loaded = Config::load(&config_path).unwrap();
        let updated = loaded
            .with_value("engine.defuzzify_samples", "250")
            .unwrap()
            .with_value("filter.enabled", "false")
            .unwrap()
            .with_value("engine.plateau_width", "0.25")
            .unwrap();
        updated.save(&config_path).unwrap();

        let reloaded = Config::load(&config_path).unwrap();
        assert_eq!(reloaded.engine.defuzzify_samples, 250);
        assert!(!reloaded.filter.enabled);
        assert_eq!(reloaded.engine.plateau_width, 0.25);
        assert_eq!(
            reloaded.get_value("engine.defuzzify_samples").unwrap(),
            toml::Value::Integer(250)
        );
        // Untouched fields keep their values
        assert_eq!(reloaded.stream.tick_hz, 50);
    }

    #[test]
    fn test_set_integer_into_float_field() {
        let config = Config::default().with_value("engine.plateau_width", "1").unwrap();
        assert_eq!(config.engine.plateau_width, 1.0);
    }

    #[test]
    fn test_set_unknown_key() {
        let config = Config::default();
        assert!(config.with_value("engine.missing", "1").is_err());
        assert!(config.with_value("missing.defuzzify_samples", "1").is_err());
        assert!(config.with_value("engine", "1").is_err());
        assert!(config.with_value("defuzzify_samples", "1").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let config = Config::default();
        // Wrong type
        assert!(config.with_value("engine.defuzzify_samples", "lots").is_err());
        assert!(config.with_value("filter.enabled", "yes").is_err());
        // Parses but fails validation
        assert!(config.with_value("engine.defuzzify_samples", "0").is_err());
        assert!(config.with_value("stream.ring_buffer_size", "1000").is_err());
        // Original is untouched
        assert_eq!(config.engine.defuzzify_samples, 100);
    }

    #[test]
    fn test_load_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");
        std::fs::write(
            &config_path,
            r#"
[engine]
defuzzify_samples = 0
plateau_width = 0.1
"#,
        )
        .expect("Failed to write config");
        assert!(Config::load(&config_path).is_err());
    }
}
