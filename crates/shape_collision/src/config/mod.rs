//! Configuration system
//!
//! The collision system reads one [`CollisionConfig`] at construction. It is
//! expected to be set once at startup by the owning application, either in
//! code through the builder methods or from a `.toml` / `.ron` file.

pub use serde::{Serialize, Deserialize};

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
}

/// How polygon vertex order is treated
///
/// Point-in-polygon and circle-vs-polygon rely on the sign of each edge's
/// face vector, which only points inward for clockwise (screen space, Y down)
/// vertex order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindingPolicy {
    /// Walk counter-clockwise polygons in reverse so every test sees clockwise order
    #[default]
    Normalize,
    /// Treat counter-clockwise polygons as malformed shapes
    Reject,
    /// Use the points as given; counter-clockwise polygons give wrong answers
    Trust,
}

/// # Collision Configuration
///
/// Failure policy and input checking for the collision system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Return an error for malformed shapes instead of logging and answering `false`
    pub raise_collision_exceptions: bool,
    /// Treat degenerate geometry (NaN, negative sizes, zero-length edges) as malformed
    pub validate_geometry: bool,
    /// Polygon winding treatment
    pub winding: WindingPolicy,
}

impl CollisionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            raise_collision_exceptions: false,
            validate_geometry: true,
            winding: WindingPolicy::Normalize,
        }
    }

    /// Raise errors for malformed shapes
    pub fn with_raise_exceptions(mut self, raise: bool) -> Self {
        self.raise_collision_exceptions = raise;
        self
    }

    /// Enable or disable degenerate geometry checks
    pub fn with_geometry_validation(mut self, enabled: bool) -> Self {
        self.validate_geometry = enabled;
        self
    }

    /// Set the polygon winding policy
    pub fn with_winding(mut self, winding: WindingPolicy) -> Self {
        self.winding = winding;
        self
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for CollisionConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("shape_collision_{}_{name}", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_defaults() {
        let config = CollisionConfig::default();

        assert!(!config.raise_collision_exceptions);
        assert!(config.validate_geometry);
        assert_eq!(config.winding, WindingPolicy::Normalize);
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("config.toml");
        let config = CollisionConfig::new()
            .with_raise_exceptions(true)
            .with_winding(WindingPolicy::Trust);

        config.save_to_file(&path).unwrap();
        let loaded = CollisionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(loaded.raise_collision_exceptions);
        assert_eq!(loaded.winding, WindingPolicy::Trust);
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("config.ron");
        let config = CollisionConfig::new().with_geometry_validation(false);

        config.save_to_file(&path).unwrap();
        let loaded = CollisionConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!loaded.validate_geometry);
        assert_eq!(loaded.winding, WindingPolicy::Normalize);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CollisionConfig = toml::from_str("raise_collision_exceptions = true").unwrap();

        assert!(config.raise_collision_exceptions);
        assert!(config.validate_geometry);
    }

    #[test]
    fn test_unsupported_format() {
        let result = CollisionConfig::default().save_to_file("collision.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
