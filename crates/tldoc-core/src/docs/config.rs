//! Generator configuration (`tldoc.toml`)
//!
//! ```toml
//! output-dir = "docs"
//! write-default-assets = true
//!
//! [assets]
//! stylesheet = "css/docs.css"
//! menu-separator = "img/arrow.svg"
//! ```
//!
//! Every key is optional; missing keys fall back to the built-in layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::paths::{relative_path, LinkBase, SitePath};

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("asset path for '{key}' must be relative to the output root, got '{path}'")]
    AbsoluteAssetPath { key: &'static str, path: String },
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DocsConfig {
    /// Root directory of the generated site
    pub output_dir: PathBuf,
    /// Write the bundled stylesheet and menu icon when they are missing
    pub write_default_assets: bool,
    pub assets: AssetPaths,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs"),
            write_default_assets: true,
            assets: AssetPaths::default(),
        }
    }
}

impl DocsConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.assets.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

/// Shared pages and static files every page links to, relative to the
/// output root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AssetPaths {
    pub stylesheet: SitePath,
    pub menu_separator: SitePath,
    pub index_all: SitePath,
    pub index_types: SitePath,
    pub index_methods: SitePath,
    pub index_constructors: SitePath,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            stylesheet: SitePath::new("css/docs.css"),
            menu_separator: SitePath::new("img/arrow.svg"),
            index_all: SitePath::new("core/index.html"),
            index_types: SitePath::new("types/index.html"),
            index_methods: SitePath::new("methods/index.html"),
            index_constructors: SitePath::new("constructors/index.html"),
        }
    }
}

impl AssetPaths {
    fn entries(&self) -> [(&'static str, &SitePath); 6] {
        [
            ("stylesheet", &self.stylesheet),
            ("menu-separator", &self.menu_separator),
            ("index-all", &self.index_all),
            ("index-types", &self.index_types),
            ("index-methods", &self.index_methods),
            ("index-constructors", &self.index_constructors),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in self.entries() {
            if path.path().starts_with('/') {
                return Err(ConfigError::AbsoluteAssetPath {
                    key,
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Every path rewritten relative to `base`, keys preserved
    pub fn relativize(&self, base: &LinkBase<'_>) -> AssetLinks {
        AssetLinks {
            stylesheet: relative_path(&self.stylesheet, base),
            menu_separator: relative_path(&self.menu_separator, base),
            index_all: relative_path(&self.index_all, base),
            index_types: relative_path(&self.index_types, base),
            index_methods: relative_path(&self.index_methods, base),
            index_constructors: relative_path(&self.index_constructors, base),
        }
    }
}

/// [`AssetPaths`] as links usable from one specific page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLinks {
    pub stylesheet: String,
    pub menu_separator: String,
    pub index_all: String,
    pub index_types: String,
    pub index_methods: String,
    pub index_constructors: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DocsConfig::from_toml_str("").unwrap();
        assert_eq!(config, DocsConfig::default());
        assert_eq!(config.assets.stylesheet.to_string(), "css/docs.css");
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_partial_config() {
        let config = DocsConfig::from_toml_str(
            r#"
output-dir = "site"
write-default-assets = false

[assets]
stylesheet = "static/site.css"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert!(!config.write_default_assets);
        assert_eq!(config.assets.stylesheet.to_string(), "static/site.css");
        assert_eq!(config.assets.menu_separator.to_string(), "img/arrow.svg");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = DocsConfig::from_toml_str("theme = \"dark\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_absolute_asset_path_is_rejected() {
        let err = DocsConfig::from_toml_str("[assets]\nstylesheet = \"/css/docs.css\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::AbsoluteAssetPath {
                key: "stylesheet",
                ..
            }
        ));
    }

    #[test]
    fn test_relativize_from_nested_page() {
        let page = SitePath::new("methods/auth/send_code.html");
        let links = AssetPaths::default().relativize(&LinkBase::File(&page));
        assert_eq!(links.stylesheet, "../../css/docs.css");
        assert_eq!(links.menu_separator, "../../img/arrow.svg");
        assert_eq!(links.index_all, "../../core/index.html");
        assert_eq!(links.index_methods, "../index.html");
        assert_eq!(links.index_constructors, "../../constructors/index.html");
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tldoc.toml");
        fs::write(&path, "output-dir = \"out\"\n").unwrap();
        let config = DocsConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));

        let missing = DocsConfig::load(&tmp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
