//! Helper functions for creating standardized errors
//!
//! Constructors for every domain plus shorthands for the failures that show
//! up repeatedly across the resolver, exporter and CLI.

use crate::kinds::*;
use crate::types::SceneportError;
use std::path::PathBuf;

impl SceneportError {
    /// Create a new I/O error
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io {
            message: message.into(),
            file_path: None,
            source_message: None,
        }
    }

    /// Create a new I/O error with file path context
    pub fn io_with_path<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::Io {
            message: message.into(),
            file_path: Some(path.into()),
            source_message: None,
        }
    }

    /// Create a new resolver error
    pub fn resolver<M: Into<String>>(message: M, kind: ResolverErrorKind) -> Self {
        Self::Resolver {
            message: message.into(),
            asset_path: None,
            object_id: None,
            kind,
        }
    }

    /// Create a new export error
    pub fn export<M: Into<String>>(message: M, kind: ExportErrorKind) -> Self {
        Self::Export {
            message: message.into(),
            source_path: None,
            destination: None,
            kind,
        }
    }

    /// Create a new export error with source and destination context
    pub fn export_with_paths<M: Into<String>, S: Into<PathBuf>, D: Into<PathBuf>>(
        message: M,
        kind: ExportErrorKind,
        source_path: S,
        destination: D,
    ) -> Self {
        Self::Export {
            message: message.into(),
            source_path: Some(source_path.into()),
            destination: Some(destination.into()),
            kind,
        }
    }

    /// Create a new host adapter error
    pub fn host<M: Into<String>>(message: M, kind: HostErrorKind) -> Self {
        Self::Host {
            message: message.into(),
            object_id: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    /// Create a new configuration error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            config_path: None,
            kind,
        }
    }

    /// Create a new configuration error with path context
    pub fn config_with_path<M: Into<String>, P: Into<PathBuf>>(
        message: M,
        kind: ConfigErrorKind,
        path: P,
    ) -> Self {
        Self::Config {
            message: message.into(),
            config_path: Some(path.into()),
            kind,
        }
    }
}

// === Domain shorthands ===

impl SceneportError {
    /// Resolution was requested for a scene without roots
    pub fn resolver_empty_scene() -> Self {
        Self::resolver("no root objects to resolve", ResolverErrorKind::EmptyScene)
    }

    /// A shader or include file could not be read
    pub fn resolver_shader_read_failed<M: Into<String>, P: Into<String>>(
        message: M,
        asset_path: P,
    ) -> Self {
        Self::resolver(message, ResolverErrorKind::ShaderReadFailed).with_asset_path(asset_path)
    }

    /// An expander reported a failure for an asset
    pub fn resolver_expander_failed<M: Into<String>>(message: M) -> Self {
        Self::resolver(message, ResolverErrorKind::ExpanderFailed)
    }

    /// Export was requested with nothing selected
    pub fn export_nothing_to_export() -> Self {
        Self::export("no assets to export", ExportErrorKind::NothingToExport)
    }

    /// A copy could not be completed
    pub fn export_copy_failed<M: Into<String>, S: Into<PathBuf>, D: Into<PathBuf>>(
        message: M,
        source_path: S,
        destination: D,
    ) -> Self {
        Self::export_with_paths(message, ExportErrorKind::CopyFailed, source_path, destination)
    }

    /// A copy would overwrite the file it reads from
    pub fn export_destination_is_source<S: Into<PathBuf>, D: Into<PathBuf>>(
        source_path: S,
        destination: D,
    ) -> Self {
        let source_path = source_path.into();
        let message = format!("{} is its own destination", source_path.display());
        Self::export_with_paths(
            message,
            ExportErrorKind::DestinationIsSource,
            source_path,
            destination,
        )
    }

    /// Scene manifest is structurally invalid
    pub fn host_invalid_manifest<M: Into<String>>(message: M) -> Self {
        Self::host(message, HostErrorKind::InvalidManifest)
    }

    /// Command arguments are inconsistent
    pub fn cli_invalid_arguments<M: Into<String>>(message: M) -> Self {
        Self::cli(message, CliErrorKind::InvalidArguments)
    }

    /// Configuration file does not parse
    pub fn config_invalid_format<M: Into<String>, P: Into<PathBuf>>(message: M, path: P) -> Self {
        Self::config_with_path(message, ConfigErrorKind::InvalidFormat, path)
    }
}
