//! Persisted extractor settings
//!
//! Resolver options, the record filter and export settings are stored
//! together in one JSON file. Command line flags are applied on top of the
//! loaded values.

use log::{debug, info};
use sceneport_error::{ConfigErrorKind, Result, SceneportError};
use sceneport_tracer::{ResolverOptions, RecordFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "export")]
use sceneport_export::ExportSettings;

/// File name looked up in the project root when no `--config` is given
pub const DEFAULT_CONFIG_NAME: &str = "sceneport.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub resolver: ResolverOptions,
    pub filter: RecordFilter,
    #[cfg(feature = "export")]
    pub export: ExportSettings,
}

impl ExtractorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SceneportError::config_with_path(
                format!("cannot read config: {e}"),
                ConfigErrorKind::NotFound,
                path,
            )
        })?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| SceneportError::config_invalid_format(e.to_string(), path))?;
        if config.resolver.max_include_depth == Some(0) {
            return Err(SceneportError::config_with_path(
                "resolver.max_include_depth must be at least 1",
                ConfigErrorKind::InvalidValue,
                path,
            ));
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SceneportError::config_with_path(e.to_string(), ConfigErrorKind::WriteFailed, path)
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SceneportError::from(e).with_file_path(parent))?;
        }
        fs::write(path, json + "\n").map_err(|e| {
            SceneportError::config_with_path(
                format!("cannot write config: {e}"),
                ConfigErrorKind::WriteFailed,
                path,
            )
        })?;
        info!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Load the explicit config, or the project default when present, or
    /// fall back to built-in defaults
    pub fn locate(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = default_config_path(project_root);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }
}

pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(DEFAULT_CONFIG_NAME)
}
