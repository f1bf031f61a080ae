//! Error kind enums for different operation domains
//!
//! Each domain (resolver, export, host adapters, CLI, configuration) gets its
//! own kind enum so callers can branch on the failure without parsing
//! messages.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of dependency resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolverErrorKind {
    #[error("Scene has no root objects")]
    EmptyScene,
    #[error("Object not known to the host")]
    UnknownObject,
    #[error("Shader source could not be read")]
    ShaderReadFailed,
    #[error("Include could not be resolved")]
    UnresolvedInclude,
    #[error("Invalid asset path")]
    InvalidPath,
    #[error("Expander failed")]
    ExpanderFailed,
    #[error("Resolution cancelled")]
    Cancelled,
}

/// Specific kinds of export errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExportErrorKind {
    #[error("No assets to export")]
    NothingToExport,
    #[error("Destination is the source file")]
    DestinationIsSource,
    #[error("Directory creation failed")]
    DirectoryCreationFailed,
    #[error("Copy failed")]
    CopyFailed,
}

/// Specific kinds of host adapter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HostErrorKind {
    #[error("Invalid scene manifest")]
    InvalidManifest,
    #[error("Duplicate object id")]
    DuplicateObject,
    #[error("Dangling object reference")]
    DanglingReference,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Invalid arguments")]
    InvalidArguments,
    #[error("Missing required argument")]
    MissingArgument,
    #[error("Command execution failed")]
    ExecutionFailed,
    #[error("Output formatting failed")]
    OutputFormatError,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Configuration file not found")]
    NotFound,
    #[error("Invalid configuration format")]
    InvalidFormat,
    #[error("Invalid configuration value")]
    InvalidValue,
    #[error("Configuration could not be written")]
    WriteFailed,
}
