//! Asset path support for sceneport
//! Project-relative paths, always with forward slashes.

use std::fmt;
use std::ops::Div;
use std::path::{Component, Path, PathBuf};

/// Top-level folder holding every project asset
pub const ASSET_ROOT: &str = "Assets";

/// Extensions the include extractor treats as shader source
pub const SHADER_SOURCE_EXTENSIONS: &[&str] = &[
    "hlsl", "cg", "cginc", "glslinc", "compute", "shader", "shaderinc", "inc", "h", "hlsli",
];

/// Extensions classified as standalone include files
pub const INCLUDE_EXTENSIONS: &[&str] = &[
    "hlsl", "cg", "cginc", "glslinc", "shaderinc", "inc", "h", "hlsli",
];

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new<S: AsRef<str>>(path: S) -> Self {
        AssetPath(path.as_ref().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        if self.0.starts_with('/') {
            return true;
        }
        // Windows drive letter: C:/
        let bytes = self.0.as_bytes();
        bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
    }

    /// True for `Assets` itself and anything below it
    pub fn is_under_asset_root(&self) -> bool {
        self.0 == ASSET_ROOT || self.0.starts_with("Assets/")
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        self.file_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn has_extension(&self, candidates: &[&str]) -> bool {
        self.extension()
            .map(|ext| candidates.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn is_shader_source(&self) -> bool {
        self.has_extension(SHADER_SOURCE_EXTENSIONS)
    }

    pub fn is_include_file(&self) -> bool {
        self.has_extension(INCLUDE_EXTENSIONS)
    }

    /// Directory part; empty for a bare file name
    pub fn parent(&self) -> AssetPath {
        match self.0.rfind('/') {
            Some(0) => AssetPath("/".to_string()),
            Some(index) => AssetPath(self.0[..index].to_string()),
            None => AssetPath::default(),
        }
    }

    pub fn join<S: AsRef<str>>(&self, rel: S) -> AssetPath {
        let rel = AssetPath::new(rel);
        if self.0.is_empty() || rel.is_absolute() {
            return rel;
        }
        let base = self.0.trim_end_matches('/');
        AssetPath(format!("{base}/{}", rel.0))
    }

    /// Resolve `.` and `..` segments without touching the filesystem.
    /// Leading `..` that climb above the start are kept.
    pub fn normalized(&self) -> AssetPath {
        let absolute = self.0.starts_with('/');
        let mut parts: Vec<&str> = Vec::new();
        for segment in self.0.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if absolute => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }
        let joined = parts.join("/");
        if absolute {
            AssetPath(format!("/{joined}"))
        } else {
            AssetPath(joined)
        }
    }

    /// Case-insensitive comparison of the final path segment
    pub fn file_name_matches(&self, name: &str) -> bool {
        self.file_name().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetPath({:?})", self.0)
    }
}

impl Div<&str> for &AssetPath {
    type Output = AssetPath;
    fn div(self, rhs: &str) -> AssetPath {
        self.join(rhs)
    }
}

impl From<&str> for AssetPath {
    fn from(value: &str) -> Self {
        AssetPath::new(value)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lexically resolve `.` and `..` in a filesystem path
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                let climbs_normal = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if climbs_normal {
                    out.pop();
                } else if !at_root {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalize slashes and trim surrounding whitespace
pub fn clean_token(token: &str) -> String {
    token.trim().replace('\\', "/")
}
