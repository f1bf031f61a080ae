//! # sceneport_error - Unified Error Handling
//!
//! One error type for every sceneport crate:
//! - Domain variants for resolution, export, host adapters, CLI and config
//! - Contextual information (asset paths, destinations, object ids)
//! - User-facing messages for the CLI
//!
//! ## Module Organization
//!
//! - [`types`] - Main error type and Result alias
//! - [`kinds`] - Error kind enums for fine-grained categorization
//! - [`helpers`] - Constructors for standardized errors
//! - [`conversions`] - Conversions and contextual methods

pub use kinds::*;
pub use types::*;

pub mod conversions;
pub mod helpers;
pub mod kinds;
pub mod types;
