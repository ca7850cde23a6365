//! Container configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML text supplied by the caller (`[trict]` table wins over top-level keys)
//! 3. Environment variables: `TRICT_*` prefix
//!
//! No files are read; callers hand over configuration text they already hold.

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Separator, DEFAULT_MAX_DEPTH};
use crate::errors::{TrictError, TrictResult};

/// Immutable per-container configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrictConfig {
    /// Separator for string paths; `""` in configuration text disables it
    pub separator: Separator,
    /// Fail on absent paths in `get` instead of returning `None`
    pub strict_get: bool,
    /// Longest path `flatten` accepts
    pub max_depth: usize,
}

impl Default for TrictConfig {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            strict_get: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTrictConfig {
    pub separator: Option<String>,
    pub strict_get: Option<bool>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDocument {
    trict: Option<RawTrictConfig>,
    #[serde(flatten)]
    top_level: RawTrictConfig,
}

fn config_err(e: ConfigError) -> TrictError {
    TrictError::Config {
        message: e.to_string(),
    }
}

impl TrictConfig {
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_strict_get(mut self, strict_get: bool) -> Self {
        self.strict_get = strict_get;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawTrictConfig) -> Self {
        Self {
            separator: overlay
                .separator
                .clone()
                .map(Separator::from)
                .unwrap_or_else(|| self.separator.clone()),
            strict_get: overlay.strict_get.unwrap_or(self.strict_get),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
        }
    }

    /// Defaults overlaid with TOML text. Environment variables are not consulted.
    pub fn from_toml_str(content: &str) -> TrictResult<Self> {
        let raw: RawDocument = toml::from_str(content).map_err(|e| TrictError::Config {
            message: format!("parse toml: {}", e),
        })?;

        let mut current = Self::default().merge(&raw.top_level);
        if let Some(table) = &raw.trict {
            current = current.merge(table);
        }
        Ok(current)
    }

    /// Load with full precedence: defaults, optional TOML text, then `TRICT_*` env vars.
    pub fn load(toml: Option<&str>) -> TrictResult<Self> {
        let current = match toml {
            Some(content) => Self::from_toml_str(content)?,
            None => Self::default(),
        };
        let current = Self::apply_env_overrides(current)?;
        debug!("loaded config: {:?}", current);
        Ok(current)
    }

    /// Apply TRICT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TrictResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TRICT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        match config.get_string("separator") {
            Ok(val) => settings.separator = Separator::from(val),
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get_bool("strict_get") {
            Ok(val) => settings.strict_get = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        match config.get::<usize>("max_depth") {
            Ok(val) => settings.max_depth = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }
}
