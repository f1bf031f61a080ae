//! Main error types for the sceneport toolkit
//!
//! `SceneportError` is the single error type shared by every sceneport crate.
//! Variants are split by domain and carry the context needed to explain the
//! failure to a user (paths, object ids, commands).

use crate::kinds::*;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main unified error type for the sceneport toolkit
#[derive(Error, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SceneportError {
    /// File system and I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        file_path: Option<PathBuf>,
        // Stored as text so the error stays cloneable
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        source_message: Option<String>,
    },

    /// Dependency resolution errors
    #[error("Resolver error: {message}")]
    Resolver {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        asset_path: Option<String>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        object_id: Option<u64>,
        kind: ResolverErrorKind,
    },

    /// Export planning and copy errors
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        source_path: Option<PathBuf>,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        destination: Option<PathBuf>,
        kind: ExportErrorKind,
    },

    /// Host adapter errors (scene manifests, in-memory hosts)
    #[error("Host error: {message}")]
    Host {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        object_id: Option<u64>,
        kind: HostErrorKind,
    },

    /// CLI and user interface errors
    #[error("CLI error: {message}")]
    Cli {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        command: Option<String>,
        kind: CliErrorKind,
    },

    /// Configuration and settings errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
        config_path: Option<PathBuf>,
        kind: ConfigErrorKind,
    },
}

/// Convenient result type for sceneport operations
pub type Result<T> = std::result::Result<T, SceneportError>;
