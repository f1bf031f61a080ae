//! Core resolver functionality
//!
//! - [`options`] - Resolution options
//! - [`resolver`] - The pass driver
//! - [`resolution`] - Pass output

pub mod options;
pub mod resolution;
pub mod resolver;

pub use options::ResolverOptions;
pub use resolution::{KindSummary, Resolution};
pub use resolver::DependencyResolver;
