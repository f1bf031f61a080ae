//! Host capability traits
//!
//! The resolver never owns scene objects. Everything it learns about the
//! scene and the project's asset database comes through these two traits,
//! so any editor bridge (or the in-memory host used by tests and the CLI)
//! can drive a resolution pass.

use std::fmt;

pub mod memory;

#[cfg(feature = "serde")]
pub mod manifest;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque, non-owning handle to a host object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A serialized object-reference field on a component
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldRef {
    pub field: String,
    pub target: ObjectId,
}

impl FieldRef {
    pub fn new<F: Into<String>>(field: F, target: ObjectId) -> Self {
        Self {
            field: field.into(),
            target,
        }
    }
}

/// A terrain found by the scene-wide terrain enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainInfo {
    pub terrain: ObjectId,
    pub setup: TerrainSetup,
}

/// What a terrain component points at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TerrainSetup {
    pub material_template: Option<ObjectId>,
    pub data: Option<TerrainDataInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainDataInfo {
    pub data: ObjectId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alpha_textures: Vec<ObjectId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail_prototypes: Vec<DetailPrototype>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tree_prototypes: Vec<TreePrototype>,
}

impl TerrainDataInfo {
    pub fn new(data: ObjectId) -> Self {
        Self {
            data,
            alpha_textures: Vec::new(),
            detail_prototypes: Vec::new(),
            tree_prototypes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DetailPrototype {
    pub texture: Option<ObjectId>,
    pub prototype: Option<ObjectId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TreePrototype {
    pub prefab: Option<ObjectId>,
}

/// Read-only view of the loaded scene
pub trait SceneGraph {
    /// Top-level objects of the scene
    fn root_objects(&self) -> Vec<ObjectId>;

    fn children(&self, node: ObjectId) -> Vec<ObjectId>;

    /// Source template asset when `node` is a prefab instance
    fn prefab_source(&self, node: ObjectId) -> Option<ObjectId>;

    fn components(&self, node: ObjectId) -> Vec<ObjectId>;

    /// Every serialized object-reference field of a component that holds a value
    fn object_references(&self, component: ObjectId) -> Vec<FieldRef>;

    /// Scene-wide enumeration of terrain components
    fn terrains(&self) -> Vec<TerrainInfo>;
}

/// Read-only view of the project's asset database
pub trait AssetDatabase {
    /// Project-relative path of the file backing an object; `None` for
    /// objects that only live in the scene
    fn asset_path(&self, object: ObjectId) -> Option<String>;

    /// Runtime type name of an object (`Texture2D`, `Shader`, ...)
    fn type_name(&self, object: ObjectId) -> Option<String>;

    /// Transitive file dependencies of the asset at `path`
    fn dependencies(&self, path: &str) -> Vec<String>;

    /// Main object stored at `path`
    fn load_asset(&self, path: &str) -> Option<ObjectId>;

    /// Shader assigned to a material
    fn material_shader(&self, material: ObjectId) -> Option<ObjectId>;

    /// Script objects behind every behaviour nested anywhere in a template
    fn behaviour_scripts(&self, template: ObjectId) -> Vec<ObjectId>;
}
