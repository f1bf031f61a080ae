//! Shader include graph extraction
//!
//! - [`scanner`] finds `#include` tokens in source text
//! - [`resolve`] maps a token to every file it may name
//! - [`extractor`] follows includes recursively and records edges
//! - [`index`] holds the edges and the reverse usage map

pub mod extractor;
pub mod index;
pub mod resolve;
pub mod scanner;

pub use extractor::IncludeExtractor;
pub use index::{IncludeEdge, IncludeIndex, VisitedSet};
pub use resolve::IncludeResolver;
pub use scanner::IncludeScanner;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How recursion through the include graph is cut off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum IncludeGuard {
    /// Each (token, including file) pair is processed once. An included file
    /// is rescanned when reached through a different token.
    #[default]
    TokenAndSource,
    /// Each file is scanned at most once per pass
    ResolvedFile,
}
