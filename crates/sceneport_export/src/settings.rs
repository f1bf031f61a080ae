//! Export layout settings

use sceneport_tracer::AssetKind;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Folder used for include files regardless of category settings
pub const HLSL_FOLDER: &str = "Shaders/HLSL";

/// How destination folders are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ExportStrategy {
    /// Every file directly under the export root
    Flat,
    /// Keep the `Assets/...` tree below the export root
    MirrorTree,
    /// One folder per host runtime type name
    ByTypeName,
    /// One folder per category, named by [`CategoryFolders`]
    #[default]
    ByCategory,
}

impl ExportStrategy {
    pub const ALL: [ExportStrategy; 4] = [
        ExportStrategy::Flat,
        ExportStrategy::MirrorTree,
        ExportStrategy::ByTypeName,
        ExportStrategy::ByCategory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportStrategy::Flat => "flat",
            ExportStrategy::MirrorTree => "mirror-tree",
            ExportStrategy::ByTypeName => "by-type-name",
            ExportStrategy::ByCategory => "by-category",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
    }
}

/// Folder and on/off switch for one category
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategorySetting {
    pub enabled: bool,
    pub folder: String,
}

impl CategorySetting {
    pub fn new<S: Into<String>>(folder: S) -> Self {
        Self {
            enabled: true,
            folder: folder.into(),
        }
    }
}

/// Per-category destination folders for [`ExportStrategy::ByCategory`].
///
/// Compute shaders share the shader setting and include files always go to
/// [`HLSL_FOLDER`] when their category is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CategoryFolders {
    settings: BTreeMap<AssetKind, CategorySetting>,
}

impl Default for CategoryFolders {
    fn default() -> Self {
        let settings = [
            (AssetKind::Prefab, "Prefabs"),
            (AssetKind::Texture2D, "Textures"),
            (AssetKind::Material, "Materials"),
            (AssetKind::Mesh, "Meshes"),
            (AssetKind::GameObject, "GameObjects"),
            (AssetKind::AudioClip, "Audio"),
            (AssetKind::AnimationClip, "Animations"),
            (AssetKind::AnimatorController, "Animators"),
            (AssetKind::Shader, "Shaders"),
            (AssetKind::Script, "Scripts"),
            (AssetKind::Font, "Fonts"),
            (AssetKind::TextAsset, "TextAssets"),
            (AssetKind::Hlsl, HLSL_FOLDER),
            (AssetKind::Terrain, "Terrains"),
            (AssetKind::TerrainData, "TerrainData"),
            (AssetKind::Other, "Other"),
        ]
        .into_iter()
        .map(|(kind, folder)| (kind, CategorySetting::new(folder)))
        .collect();
        Self { settings }
    }
}

impl CategoryFolders {
    fn key(kind: AssetKind) -> AssetKind {
        match kind {
            AssetKind::ComputeShader => AssetKind::Shader,
            other => other,
        }
    }

    pub fn setting(&self, kind: AssetKind) -> Option<&CategorySetting> {
        self.settings.get(&Self::key(kind))
    }

    /// Destination folder for `kind`, or `None` when the category is off
    pub fn folder_for(&self, kind: AssetKind) -> Option<&str> {
        let setting = self.setting(kind)?;
        if !setting.enabled {
            return None;
        }
        if kind == AssetKind::Hlsl {
            Some(HLSL_FOLDER)
        } else {
            Some(setting.folder.as_str())
        }
    }

    pub fn is_enabled(&self, kind: AssetKind) -> bool {
        self.setting(kind).is_some_and(|s| s.enabled)
    }

    pub fn set_enabled(&mut self, kind: AssetKind, enabled: bool) {
        let key = Self::key(kind);
        let default_folder = key.label().to_string();
        self.settings
            .entry(key)
            .or_insert_with(|| CategorySetting::new(default_folder))
            .enabled = enabled;
    }

    pub fn set_folder<S: Into<String>>(&mut self, kind: AssetKind, folder: S) {
        let folder = folder.into();
        match self.settings.get_mut(&Self::key(kind)) {
            Some(setting) => setting.folder = folder,
            None => {
                self.settings
                    .insert(Self::key(kind), CategorySetting::new(folder));
            }
        }
    }

    pub fn with_disabled(mut self, kind: AssetKind) -> Self {
        self.set_enabled(kind, false);
        self
    }

    pub fn with_folder<S: Into<String>>(mut self, kind: AssetKind, folder: S) -> Self {
        self.set_folder(kind, folder);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetKind, &CategorySetting)> {
        self.settings.iter().map(|(kind, setting)| (*kind, setting))
    }
}

/// Options controlling where exported files land
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportSettings {
    pub strategy: ExportStrategy,
    pub categories: CategoryFolders,
    /// Place include files so the shaders' relative includes keep working
    pub preserve_hlsl_structure: bool,
    /// Copy an include file once per consuming shader layout
    pub multi_location_copies: bool,
    /// Export root used when none is given on the command line
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub export_root: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            strategy: ExportStrategy::default(),
            categories: CategoryFolders::default(),
            preserve_hlsl_structure: true,
            multi_location_copies: false,
            export_root: None,
        }
    }
}

impl ExportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: ExportStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_categories(mut self, categories: CategoryFolders) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_hlsl_structure(mut self, preserve: bool) -> Self {
        self.preserve_hlsl_structure = preserve;
        self
    }

    pub fn with_multi_location_copies(mut self, enabled: bool) -> Self {
        self.multi_location_copies = enabled;
        self
    }

    pub fn with_export_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.export_root = Some(root.into());
        self
    }
}
