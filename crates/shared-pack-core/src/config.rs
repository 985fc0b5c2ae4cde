use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{CategoryDef, CategoryStore};
use crate::error::{Result, SharedPackError};

pub const CONFIG_FILE: &str = ".shared-pack.toml";

/// Environment variable naming an explicit shared package root.
pub const DESTINATION_ENV: &str = "SHARED_PACKAGE_PATH";

const DEFAULT_CANDIDATES: &[&str] = &["vendor/andyyou/do-shared", "../do-shared"];
const DEFAULT_MARKER: &str = "composer.json";
const DEFAULT_ROOTS: &[&str] = &["app", "database"];
const DEFAULT_EXTENSION: &str = "php";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# shared-pack configuration file
# Location: <project root>/.shared-pack.toml

[destination]
# Shared package locations, probed in order (relative to the project root).
# SHARED_PACKAGE_PATH is always probed after these.
candidates = ["vendor/andyyou/do-shared", "../do-shared"]

# File that must exist inside a candidate for it to count as the package root
marker = "composer.json"

[discovery]
# Only changed files under these directories are considered
roots = ["app", "database"]

# Only files with this extension are considered
extension = "php"

# Extra categories, or overrides of builtin ones (same name keeps its position).
# [[category]]
# name = "policy"
# prefixes = ["app/Policies"]
# make_command = "make:policy"
"#;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub destination: DestinationConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default, rename = "category", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategoryDef>,
}

/// Where the shared package may live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    #[serde(default = "default_marker")]
    pub marker: String,
}

/// Which changed files are eligible for packing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,

    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_roots() -> Vec<String> {
    DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            marker: default_marker(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            extension: default_extension(),
        }
    }
}

impl Config {
    /// Load config from the project root
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| SharedPackError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// Get config file path
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    ///
    /// An existing file is left untouched.
    pub fn init(project_root: &Path) -> Result<PathBuf> {
        let path = Self::path(project_root);

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Builtin categories merged with `[[category]]` entries
    pub fn category_store(&self) -> CategoryStore {
        CategoryStore::builtin().with_overrides(&self.categories)
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            (
                "destination.candidates".to_string(),
                format!("{:?}", self.destination.candidates),
            ),
            (
                "destination.marker".to_string(),
                self.destination.marker.clone(),
            ),
            (
                "discovery.roots".to_string(),
                format!("{:?}", self.discovery.roots),
            ),
            (
                "discovery.extension".to_string(),
                self.discovery.extension.clone(),
            ),
        ];
        for cat in &self.categories {
            entries.push((format!("category.{}", cat.name), format!("{:?}", cat.prefixes)));
        }
        entries
    }
}
