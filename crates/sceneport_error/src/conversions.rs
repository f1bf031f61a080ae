//! Error conversion implementations and contextual methods
//!
//! Conversions from standard library errors, builder methods that attach
//! context after the fact, type checks and user-facing messages.

use crate::kinds::ExportErrorKind;
use crate::types::SceneportError;
use std::path::PathBuf;

// === From implementations for standard library types ===

impl From<std::io::Error> for SceneportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
            source_message: Some(format!("IO Error: {err}")),
        }
    }
}

// === Contextual builder methods ===

impl SceneportError {
    /// Add file path context to error types that carry one
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path: PathBuf = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Export { source_path, .. } => *source_path = Some(path),
            Self::Config { config_path, .. } => *config_path = Some(path),
            Self::Resolver { asset_path, .. } => {
                *asset_path = Some(path.to_string_lossy().into_owned())
            }
            Self::Host { .. } | Self::Cli { .. } => {} // no file context
        }
        self
    }

    /// Add project-relative asset path context to resolver errors
    pub fn with_asset_path<P: Into<String>>(mut self, path: P) -> Self {
        if let Self::Resolver { asset_path, .. } = &mut self {
            *asset_path = Some(path.into());
        }
        self
    }

    /// Add host object id context
    pub fn with_object_id(mut self, id: u64) -> Self {
        match &mut self {
            Self::Resolver { object_id, .. } => *object_id = Some(id),
            Self::Host { object_id, .. } => *object_id = Some(id),
            _ => {}
        }
        self
    }

    /// Add destination context to export errors
    pub fn with_destination<P: Into<PathBuf>>(mut self, path: P) -> Self {
        if let Self::Export { destination, .. } = &mut self {
            *destination = Some(path.into());
        }
        self
    }

    /// Add command context to CLI errors
    pub fn with_command<C: Into<String>>(mut self, command: C) -> Self {
        if let Self::Cli { command: cmd, .. } = &mut self {
            *cmd = Some(command.into());
        }
        self
    }
}

// === Type checking methods ===

impl SceneportError {
    /// Check if this error is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this error is a resolver error
    pub fn is_resolver(&self) -> bool {
        matches!(self, Self::Resolver { .. })
    }

    /// Check if this error is an export error
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export { .. })
    }

    /// Check if this error is a host adapter error
    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host { .. })
    }

    /// Check if this error is a CLI error
    pub fn is_cli(&self) -> bool {
        matches!(self, Self::Cli { .. })
    }

    /// Check if this error is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Empty-input errors are notices rather than failures
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(
            self,
            Self::Export {
                kind: ExportErrorKind::NothingToExport,
                ..
            } | Self::Resolver {
                kind: crate::kinds::ResolverErrorKind::EmptyScene,
                ..
            }
        )
    }
}

// === Context accessor methods ===

impl SceneportError {
    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Export { source_path, .. } => source_path.as_ref(),
            Self::Config { config_path, .. } => config_path.as_ref(),
            _ => None,
        }
    }

    /// Get the asset path associated with a resolver error, if any
    pub fn asset_path(&self) -> Option<&str> {
        if let Self::Resolver { asset_path, .. } = self {
            asset_path.as_deref()
        } else {
            None
        }
    }

    /// Get the host object id associated with this error, if any
    pub fn object_id(&self) -> Option<u64> {
        match self {
            Self::Resolver { object_id, .. } => *object_id,
            Self::Host { object_id, .. } => *object_id,
            _ => None,
        }
    }

    /// Get the destination associated with an export error, if any
    pub fn destination(&self) -> Option<&PathBuf> {
        if let Self::Export { destination, .. } = self {
            destination.as_ref()
        } else {
            None
        }
    }

    /// Get the command context for CLI errors, if any
    pub fn command(&self) -> Option<&str> {
        if let Self::Cli { command, .. } = self {
            command.as_deref()
        } else {
            None
        }
    }
}

// === User-friendly message generation ===

impl SceneportError {
    /// Generate a user-friendly error message with context
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File operation failed on '{}': {}", path.display(), message)
                } else {
                    format!("File operation failed: {message}")
                }
            }
            Self::Resolver {
                message,
                asset_path,
                object_id,
                ..
            } => {
                let mut msg = format!("Dependency resolution failed: {message}");
                if let Some(path) = asset_path {
                    msg.push_str(&format!(" (asset: {path})"));
                }
                if let Some(id) = object_id {
                    msg.push_str(&format!(" (object: {id})"));
                }
                msg
            }
            Self::Export {
                message,
                source_path,
                destination,
                ..
            } => {
                let mut msg = format!("Export failed: {message}");
                match (source_path, destination) {
                    (Some(src), Some(dst)) => {
                        msg.push_str(&format!(" ({} -> {})", src.display(), dst.display()));
                    }
                    (Some(src), None) => {
                        msg.push_str(&format!(" (file: {})", src.display()));
                    }
                    (None, Some(dst)) => {
                        msg.push_str(&format!(" (destination: {})", dst.display()));
                    }
                    (None, None) => {}
                }
                msg
            }
            Self::Host {
                message, object_id, ..
            } => {
                let mut msg = format!("Scene host error: {message}");
                if let Some(id) = object_id {
                    msg.push_str(&format!(" (object: {id})"));
                }
                msg
            }
            Self::Cli {
                message, command, ..
            } => {
                if let Some(cmd) = command {
                    format!("Command '{cmd}' failed: {message}")
                } else {
                    format!("Command failed: {message}")
                }
            }
            Self::Config {
                message,
                config_path,
                ..
            } => {
                let mut msg = format!("Configuration error: {message}");
                if let Some(path) = config_path {
                    msg.push_str(&format!(" (config: {})", path.display()));
                }
                msg
            }
        }
    }
}
