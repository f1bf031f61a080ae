//! Filesystem access to a project directory
//!
//! Asset paths are project-relative (`Assets/...`). The project root plays
//! the role of the editor's working directory.

use crate::paths::{ASSET_ROOT, AssetPath};
use log::trace;
use sceneport_error::{Result, SceneportError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of an asset path; absolute paths pass through
    pub fn absolute(&self, asset_path: &str) -> PathBuf {
        let path = Path::new(asset_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(asset_path)
        }
    }

    pub fn is_file(&self, asset_path: &str) -> bool {
        !asset_path.is_empty() && self.absolute(asset_path).is_file()
    }

    pub fn file_len(&self, asset_path: &str) -> Option<u64> {
        fs::metadata(self.absolute(asset_path))
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
    }

    /// Read a text file, replacing invalid UTF-8
    pub fn read_text(&self, asset_path: &str) -> Result<String> {
        let full = self.absolute(asset_path);
        let bytes = fs::read(&full).map_err(|e| SceneportError::from(e).with_file_path(&full))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Project-relative form of a filesystem path below the root
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        AssetPath::new(rel.to_string_lossy()).into_string()
    }

    /// Every shader-source file under `dir`, recursively, in a stable order
    pub fn shader_sources_under(&self, dir: &str) -> Vec<String> {
        let base = self.absolute(dir);
        if !base.is_dir() {
            return Vec::new();
        }
        let files: Vec<String> = WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| self.relative(entry.path()))
            .filter(|path| AssetPath::new(path).is_shader_source())
            .collect();
        trace!("Found {} shader sources under {dir}", files.len());
        files
    }

    /// Every shader-source file under the asset root
    pub fn asset_shader_sources(&self) -> Vec<String> {
        self.shader_sources_under(ASSET_ROOT)
    }
}
