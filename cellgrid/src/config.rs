//! Demo configuration stored as RON.
//!
//! Everything here is owned by the front ends and the runner: tick period,
//! frame rate, canvas scale and paint behaviour. The engine itself only
//! sees the grid size and the flow table.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::liquid::{LiquidVariant, Volume};

/// Life-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeSettings {
    /// Seed for the initial random board; `None` picks one at startup.
    pub seed: Option<u64>,
    /// Probability that a cell starts alive.
    pub density: f64,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self { seed: None, density: 0.5 }
    }
}

/// Liquid-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidSettings {
    pub variant: LiquidVariant,
    /// Volume added per pour.
    pub pour_amount: Volume,
}

impl Default for LiquidSettings {
    fn default() -> Self {
        Self { variant: LiquidVariant::Standard, pour_amount: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: usize,
    pub height: usize,
    /// Canvas pixels per cell.
    pub cell_size: f32,
    pub tick_interval_ms: u64,
    pub frames_per_second: u32,
    /// How often a held pointer re-paints its cell.
    pub paint_repeat_ms: u64,
    pub life: LifeSettings,
    pub liquid: LiquidSettings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::life()
    }
}

impl DemoConfig {
    /// Defaults for the life demo.
    pub fn life() -> Self {
        Self {
            width: 150,
            height: 75,
            cell_size: 7.0,
            tick_interval_ms: 80,
            frames_per_second: 30,
            paint_repeat_ms: 100,
            life: LifeSettings::default(),
            liquid: LiquidSettings::default(),
        }
    }

    /// Defaults for the liquid demo.
    pub fn liquid() -> Self {
        Self {
            width: 60,
            height: 60,
            cell_size: 10.0,
            tick_interval_ms: 50,
            frames_per_second: 30,
            paint_repeat_ms: 10,
            life: LifeSettings::default(),
            liquid: LiquidSettings::default(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frames_per_second.max(1)))
    }

    pub fn paint_repeat(&self) -> Duration {
        Duration::from_millis(self.paint_repeat_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::Invalid("frames_per_second must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.life.density) {
            return Err(ConfigError::Invalid(format!(
                "life.density must be within [0, 1], got {}",
                self.life.density
            )));
        }
        if self.liquid.pour_amount <= 0 {
            return Err(ConfigError::Invalid(format!(
                "liquid.pour_amount must be positive, got {}",
                self.liquid.pour_amount
            )));
        }
        Ok(())
    }

    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Loads `path`, falling back to `fallback` when it is missing or bad.
    pub fn load_or(path: impl AsRef<Path>, fallback: Self) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Failed to load config from {:?}: {}. Using defaults.", path, e);
                fallback
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        DemoConfig::life().validate().unwrap();
        DemoConfig::liquid().validate().unwrap();
        assert_eq!(DemoConfig::life().tick_interval(), Duration::from_millis(80));
        assert_eq!(DemoConfig::liquid().paint_repeat(), Duration::from_millis(10));
    }

    #[test]
    fn ron_round_trip_keeps_variant() {
        let mut config = DemoConfig::liquid();
        config.liquid.variant = LiquidVariant::Thick;
        let text = config.to_ron().unwrap();
        assert_eq!(DemoConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = std::env::temp_dir().join(format!("cellgrid_config_{}.ron", std::process::id()));
        let mut config = DemoConfig::life();
        config.life.seed = Some(42);
        config.width = 33;

        config.save(&path).unwrap();
        let loaded = DemoConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = DemoConfig::from_ron("(width: 20, height: 10)").unwrap();
        assert_eq!((config.width, config.height), (20, 10));
        assert_eq!(config.tick_interval_ms, DemoConfig::life().tick_interval_ms);
        assert_eq!(config.liquid.pour_amount, 100);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            DemoConfig::from_ron("(width: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DemoConfig::from_ron("(life: (density: 1.5))"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(DemoConfig::from_ron("(width: \"wide\")"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back() {
        let config = DemoConfig::load_or("/nonexistent/cellgrid.ron", DemoConfig::liquid());
        assert_eq!(config, DemoConfig::liquid());
    }
}
