//! Resolved asset records and their display categories

use crate::host::ObjectId;
use crate::paths::AssetPath;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of categories an asset is sorted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetKind {
    Prefab,
    Texture2D,
    Material,
    Mesh,
    GameObject,
    AudioClip,
    AnimationClip,
    AnimatorController,
    Shader,
    ComputeShader,
    Script,
    Font,
    TextAsset,
    #[cfg_attr(feature = "serde", serde(rename = "HLSL"))]
    Hlsl,
    Terrain,
    TerrainData,
    Other,
}

impl AssetKind {
    pub const ALL: [AssetKind; 17] = [
        AssetKind::Prefab,
        AssetKind::Texture2D,
        AssetKind::Material,
        AssetKind::Mesh,
        AssetKind::GameObject,
        AssetKind::AudioClip,
        AssetKind::AnimationClip,
        AssetKind::AnimatorController,
        AssetKind::Shader,
        AssetKind::ComputeShader,
        AssetKind::Script,
        AssetKind::Font,
        AssetKind::TextAsset,
        AssetKind::Hlsl,
        AssetKind::Terrain,
        AssetKind::TerrainData,
        AssetKind::Other,
    ];

    /// Classify an asset from its path and the host's runtime type name.
    ///
    /// Extensions win over the runtime type: a `.prefab` is always a prefab and
    /// include files are HLSL even when the host imports them as text.
    pub fn classify(path: &str, type_name: &str) -> Self {
        let path = AssetPath::new(path);
        match path.extension().as_deref() {
            Some("prefab") => return AssetKind::Prefab,
            Some("compute") => return AssetKind::ComputeShader,
            Some("cs") => return AssetKind::Script,
            _ => {}
        }
        if path.is_include_file() {
            return AssetKind::Hlsl;
        }
        Self::from_type_name(type_name)
    }

    /// Map a host runtime type name onto a category
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "Texture2D" => AssetKind::Texture2D,
            "Material" => AssetKind::Material,
            "Mesh" => AssetKind::Mesh,
            "GameObject" => AssetKind::GameObject,
            "AudioClip" => AssetKind::AudioClip,
            "AnimationClip" => AssetKind::AnimationClip,
            "AnimatorController" => AssetKind::AnimatorController,
            "Shader" => AssetKind::Shader,
            "ComputeShader" => AssetKind::ComputeShader,
            "MonoScript" => AssetKind::Script,
            "Font" => AssetKind::Font,
            "TextAsset" => AssetKind::TextAsset,
            "ShaderInclude" => AssetKind::Hlsl,
            "Terrain" => AssetKind::Terrain,
            "TerrainData" => AssetKind::TerrainData,
            _ => AssetKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Prefab => "Prefab",
            AssetKind::Texture2D => "Texture2D",
            AssetKind::Material => "Material",
            AssetKind::Mesh => "Mesh",
            AssetKind::GameObject => "GameObject",
            AssetKind::AudioClip => "AudioClip",
            AssetKind::AnimationClip => "AnimationClip",
            AssetKind::AnimatorController => "AnimatorController",
            AssetKind::Shader => "Shader",
            AssetKind::ComputeShader => "ComputeShader",
            AssetKind::Script => "Script",
            AssetKind::Font => "Font",
            AssetKind::TextAsset => "TextAsset",
            AssetKind::Hlsl => "HLSL",
            AssetKind::Terrain => "Terrain",
            AssetKind::TerrainData => "TerrainData",
            AssetKind::Other => "Other",
        }
    }

    /// Parse a label as printed by [`AssetKind::label`], ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something the resolver collected: a host object, or a file the host
/// does not model (include files discovered on disk)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetRef {
    Object(ObjectId),
    File(String),
}

impl From<ObjectId> for AssetRef {
    fn from(id: ObjectId) -> Self {
        AssetRef::Object(id)
    }
}

/// One resolved asset
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssetRecord {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub handle: Option<ObjectId>,
    pub path: String,
    pub kind: AssetKind,
    pub type_name: String,
    pub size_bytes: u64,
}

impl AssetRecord {
    pub fn new<P: Into<String>, T: Into<String>>(
        handle: Option<ObjectId>,
        path: P,
        type_name: T,
        size_bytes: u64,
    ) -> Self {
        let path = AssetPath::new(path.into()).into_string();
        let type_name = type_name.into();
        let kind = AssetKind::classify(&path, &type_name);
        Self {
            handle,
            path,
            kind,
            type_name,
            size_bytes,
        }
    }

    pub fn asset_path(&self) -> AssetPath {
        AssetPath::new(&self.path)
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
