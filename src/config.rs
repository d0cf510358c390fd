use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a deadjar analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class name prefixes excluded from reporting and aggregates
    pub excluded_prefixes: Vec<String>,

    /// The universal base object type; references to its members are
    /// never recorded
    pub object_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec![
                "java.".to_string(),
                "javax.".to_string(),
                "jdk.".to_string(),
                "sun.".to_string(),
                "com.sun.".to_string(),
            ],
            object_class: "java.lang.Object".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations in the working
    /// directory
    pub fn from_default_locations() -> Result<Self> {
        let default_names = [".deadjar.yml", ".deadjar.yaml", ".deadjar.toml"];

        for name in &default_names {
            let path = Path::new(name);
            if path.exists() {
                return Self::from_file(path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check whether a class falls under an excluded namespace prefix
    pub fn is_excluded(&self, class_name: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| class_name.starts_with(prefix.as_str()))
    }

    /// Check whether an owner type is the universal base object type
    pub fn is_object_class(&self, class_name: &str) -> bool {
        class_name == self.object_class
    }
}
