// Utility functions for CLI

use crate::config::ExtractorConfig;
use log::debug;
use owo_colors::OwoColorize;
use regex::Regex;
use sceneport_error::{Result, SceneportError};
use sceneport_tracer::{AssetKind, MemoryHost, Project, SceneManifest};
use std::fs;
use std::path::Path;

/// Command execution context containing common parameters
pub struct CommandContext<'a> {
    pub project: &'a Project,
    pub config: &'a ExtractorConfig,
    pub output: &'a OutputHandler,
}

impl<'a> CommandContext<'a> {
    pub fn new(project: &'a Project, config: &'a ExtractorConfig, output: &'a OutputHandler) -> Self {
        Self {
            project,
            config,
            output,
        }
    }

    /// Load a scene manifest into an in-memory host
    pub fn load_scene(&self, path: &Path) -> Result<MemoryHost> {
        load_scene(path)
    }
}

/// Read a JSON scene manifest and build a validated host from it
pub fn load_scene(path: &Path) -> Result<MemoryHost> {
    debug!("Loading scene manifest: {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| SceneportError::from(e).with_file_path(path))?;
    let manifest: SceneManifest = serde_json::from_str(&text).map_err(|e| {
        SceneportError::host_invalid_manifest(format!("{}: {e}", path.display()))
    })?;
    manifest.into_host()
}

/// Output handler that respects quiet mode
pub struct OutputHandler {
    quiet: bool,
}

impl OutputHandler {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print explanatory text (suppressed in quiet mode)
    pub fn print_info(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Print formatted explanatory text (suppressed in quiet mode)
    pub fn print_info_fmt(&self, args: std::fmt::Arguments) {
        if !self.quiet {
            println!("{args}");
        }
    }

    /// Print raw results (always shown)
    pub fn print_result(&self, text: &str) {
        println!("{text}");
    }

    /// Print formatted raw results (always shown)
    pub fn print_result_fmt(&self, args: std::fmt::Arguments) {
        println!("{args}");
    }

    /// Print to stderr (always shown)
    pub fn print_error(&self, text: &str) {
        eprintln!("{text}");
    }
}

/// Human readable byte count: B, KB, MB or GB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < MB {
        format!("{:.1} KB", value / KB)
    } else if value < GB {
        format!("{:.1} MB", value / MB)
    } else {
        format!("{:.1} GB", value / GB)
    }
}

// Colorization helpers
pub fn should_use_colors() -> bool {
    isatty::stdout_isatty()
}

pub fn colorize_kind(kind: AssetKind) -> String {
    if should_use_colors() {
        kind.label().blue().to_string()
    } else {
        kind.label().to_string()
    }
}

pub fn colorize_path(path: &str) -> String {
    if should_use_colors() {
        path.yellow().to_string()
    } else {
        path.to_string()
    }
}

pub fn colorize_warning(text: &str) -> String {
    if should_use_colors() {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// Highlight case-insensitive occurrences of `search` in `text`
pub fn highlight_matches(text: &str, search: Option<&str>) -> String {
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return text.to_string();
    };
    if !should_use_colors() {
        return text.to_string();
    }
    match Regex::new(&format!("(?i){}", regex::escape(search))) {
        Ok(pattern) => pattern
            .replace_all(text, |caps: &regex::Captures| caps[0].to_string().red().to_string())
            .to_string(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_load_scene_reports_bad_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("scene.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_scene(&path).unwrap_err();
        assert!(err.is_host());
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene(Path::new("/nonexistent/scene.json")).unwrap_err();
        assert!(err.is_io());
    }
}
