//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Rect;
use crate::spatial::MAX_DEPTH;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Spatial index layout for one manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Region covered by the quadtree, in entity transform coordinates
    pub bounds: Rect,
    /// Fixed subdivision depth; the tree has `4^depth` leaves
    pub depth: u32,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 1280.0, 720.0),
            depth: 3,
        }
    }
}

/// Per-manager settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Rendering client (true) or headless server (false)
    pub has_graphics: bool,
    /// Spatial index layout
    pub spatial: SpatialConfig,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            has_graphics: true,
            spatial: SpatialConfig::default(),
        }
    }
}

impl ManagerConfig {
    /// Headless manager, as run by a dedicated server
    pub fn headless() -> Self {
        Self {
            has_graphics: false,
            ..Self::default()
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Defaults for managers built by the driver
    pub manager: ManagerConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check values that deserialize fine but cannot build a manager
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spatial = &self.manager.spatial;
        if !spatial.bounds.has_area() {
            log::warn!("Rejecting spatial bounds {:?}", spatial.bounds);
            return Err(ConfigError::Invalid(format!(
                "spatial bounds must have positive size, got {}x{}",
                spatial.bounds.width, spatial.bounds.height
            )));
        }
        if spatial.depth > MAX_DEPTH {
            log::warn!("Rejecting spatial depth {}", spatial.depth);
            return Err(ConfigError::Invalid(format!(
                "spatial depth {} exceeds maximum {}",
                spatial.depth, MAX_DEPTH
            )));
        }
        Ok(())
    }
}
