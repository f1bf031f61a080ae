//! `#include` directive scanning

use regex::Regex;
use sceneport_error::{ResolverErrorKind, Result, SceneportError};

const INCLUDE_PATTERN: &str = r#"(?im)#include\s*(?:<\s*([^>]+)\s*>|["']\s*([^"']+)\s*["'])"#;

/// Finds include tokens in shader source text.
/// Both `<...>` and quoted forms are recognised, case-insensitively.
#[derive(Debug, Clone)]
pub struct IncludeScanner {
    pattern: Regex,
}

impl IncludeScanner {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(INCLUDE_PATTERN).map_err(|e| {
            SceneportError::resolver(
                format!("Invalid include pattern: {e}"),
                ResolverErrorKind::InvalidPath,
            )
        })?;
        Ok(Self { pattern })
    }

    /// Every include token in `text`, trimmed, in source order
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().trim().to_string())
            .filter(|token| !token.is_empty())
            .collect()
    }
}
