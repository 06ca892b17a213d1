use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Top-level configuration for Slugpath
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugpathConfig {
    pub resolver: ResolverConfig,
    pub entry: EntryConfig,
    pub format: PathFormat,
    pub logging: LoggingConfig,
}

/// How the resolver treats anomalies in the page hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Truncate or skip, and record the anomaly on the resolution
    #[default]
    Lenient,
    /// Fail on the first anomaly
    Strict,
}

/// Resolver settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub policy: Policy,
    /// Pass every segment through `slugify` before it enters the path
    pub normalize_slugs: bool,
}

/// Where slug and parent live on a localized CMS entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    pub locale: String,
    pub slug_field: String,
    pub parent_field: String,
}

/// Rendering of a slug chain into a URL path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFormat {
    pub separator: String,
    /// Prefix the path with the separator
    pub leading: bool,
    /// Suffix the path with the separator
    pub trailing: bool,
}

/// Logging and diagnostics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether to print the visited chain and anomalies with each result
    pub show_chain: bool,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            locale: "nl-NL".to_string(),
            slug_field: "slug".to_string(),
            parent_field: "parent".to_string(),
        }
    }
}

impl Default for PathFormat {
    fn default() -> Self {
        Self {
            separator: "/".to_string(),
            leading: true,
            trailing: false,
        }
    }
}

impl SlugpathConfig {
    /// Parse config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = SlugpathConfig::from_yaml("resolver:\n  policy: strict\n").unwrap();
        assert_eq!(config.resolver.policy, Policy::Strict);
        assert!(!config.resolver.normalize_slugs);
        assert_eq!(config.entry.locale, "nl-NL");
        assert_eq!(config.format, PathFormat::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = SlugpathConfig::default();
        config.entry.locale = "en-US".to_string();
        config.format.trailing = true;

        let yaml = config.to_yaml().unwrap();
        assert_eq!(SlugpathConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(SlugpathConfig::from_yaml("resolver:\n  policy: sloppy\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SlugpathConfig::load(Path::new("/nonexistent/slugpath.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
