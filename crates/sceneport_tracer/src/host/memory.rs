//! In-memory scene host
//!
//! Holds a complete scene and asset database in plain collections. Used by
//! the test suites and, through [`super::manifest`], by the CLI.

use super::{
    AssetDatabase, FieldRef, ObjectId, SceneGraph, TerrainDataInfo, TerrainInfo, TerrainSetup,
};
use crate::paths::AssetPath;
use log::trace;
use sceneport_error::{HostErrorKind, Result, SceneportError};
use std::collections::{BTreeMap, HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One object known to a [`MemoryHost`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MemoryObject {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,
    pub name: String,
    pub path: Option<String>,
    pub children: Vec<ObjectId>,
    pub components: Vec<ObjectId>,
    pub references: Vec<FieldRef>,
    pub prefab_source: Option<ObjectId>,
    pub shader: Option<ObjectId>,
    pub scripts: Vec<ObjectId>,
    pub terrain: Option<TerrainSetup>,
}

impl MemoryObject {
    pub fn new<T: Into<String>>(type_name: T) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// An asset object backed by a file
    pub fn asset<T: Into<String>, P: AsRef<str>>(type_name: T, path: P) -> Self {
        Self::new(type_name).at_path(path)
    }

    pub fn named<N: Into<String>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    pub fn at_path<P: AsRef<str>>(mut self, path: P) -> Self {
        self.path = Some(AssetPath::new(path).into_string());
        self
    }

    pub fn with_child(mut self, child: ObjectId) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_component(mut self, component: ObjectId) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_reference<F: Into<String>>(mut self, field: F, target: ObjectId) -> Self {
        self.references.push(FieldRef::new(field, target));
        self
    }

    pub fn with_prefab_source(mut self, source: ObjectId) -> Self {
        self.prefab_source = Some(source);
        self
    }

    pub fn with_shader(mut self, shader: ObjectId) -> Self {
        self.shader = Some(shader);
        self
    }

    pub fn with_script(mut self, script: ObjectId) -> Self {
        self.scripts.push(script);
        self
    }

    pub fn with_terrain(mut self, setup: TerrainSetup) -> Self {
        self.terrain = Some(setup);
        self
    }

    fn referenced_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = Vec::new();
        ids.extend(&self.children);
        ids.extend(&self.components);
        ids.extend(self.references.iter().map(|r| r.target));
        ids.extend(self.prefab_source);
        ids.extend(self.shader);
        ids.extend(&self.scripts);
        if let Some(setup) = &self.terrain {
            ids.extend(setup.material_template);
            if let Some(data) = &setup.data {
                ids.extend(terrain_data_ids(data));
            }
        }
        ids
    }
}

fn terrain_data_ids(data: &TerrainDataInfo) -> Vec<ObjectId> {
    let mut ids = vec![data.data];
    ids.extend(&data.alpha_textures);
    for detail in &data.detail_prototypes {
        ids.extend(detail.texture);
        ids.extend(detail.prototype);
    }
    ids.extend(data.tree_prototypes.iter().filter_map(|tree| tree.prefab));
    ids
}

/// Scene plus asset database held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    roots: Vec<ObjectId>,
    objects: BTreeMap<ObjectId, MemoryObject>,
    path_index: HashMap<String, ObjectId>,
    dependencies: HashMap<String, Vec<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object. The first object registered for a path becomes
    /// that path's main asset.
    pub fn add(&mut self, id: ObjectId, object: MemoryObject) -> Result<()> {
        if self.objects.contains_key(&id) {
            return Err(SceneportError::host(
                format!("object {id} registered twice"),
                HostErrorKind::DuplicateObject,
            )
            .with_object_id(id.0));
        }
        if let Some(path) = &object.path {
            self.path_index.entry(path.clone()).or_insert(id);
        }
        trace!("Registered {} object {id}", object.type_name);
        self.objects.insert(id, object);
        Ok(())
    }

    /// Builder form of [`MemoryHost::add`]
    pub fn with(mut self, id: u64, object: MemoryObject) -> Result<Self> {
        self.add(ObjectId(id), object)?;
        Ok(self)
    }

    pub fn add_root(&mut self, id: ObjectId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn with_root(mut self, id: u64) -> Self {
        self.add_root(ObjectId(id));
        self
    }

    /// Record direct file dependencies of `path`; transitive closure is
    /// computed on query
    pub fn add_dependencies<P, I, S>(&mut self, path: P, deps: I)
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self
            .dependencies
            .entry(AssetPath::new(path).into_string())
            .or_default();
        for dep in deps {
            let dep = AssetPath::new(dep).into_string();
            if !entry.contains(&dep) {
                entry.push(dep);
            }
        }
    }

    pub fn with_dependencies<P, I, S>(mut self, path: P, deps: I) -> Self
    where
        P: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_dependencies(path, deps);
        self
    }

    pub fn object(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check that every id referenced by roots and objects is registered
    pub fn validate(&self) -> Result<()> {
        for root in &self.roots {
            if !self.objects.contains_key(root) {
                return Err(dangling(*root, "root list"));
            }
        }
        for (id, object) in &self.objects {
            for referenced in object.referenced_ids() {
                if !self.objects.contains_key(&referenced) {
                    return Err(dangling(referenced, &format!("object {id}")));
                }
            }
        }
        Ok(())
    }
}

fn dangling(id: ObjectId, owner: &str) -> SceneportError {
    SceneportError::host(
        format!("{owner} references unknown object {id}"),
        HostErrorKind::DanglingReference,
    )
    .with_object_id(id.0)
}

impl SceneGraph for MemoryHost {
    fn root_objects(&self) -> Vec<ObjectId> {
        self.roots.clone()
    }

    fn children(&self, node: ObjectId) -> Vec<ObjectId> {
        self.objects
            .get(&node)
            .map(|o| o.children.clone())
            .unwrap_or_default()
    }

    fn prefab_source(&self, node: ObjectId) -> Option<ObjectId> {
        self.objects.get(&node).and_then(|o| o.prefab_source)
    }

    fn components(&self, node: ObjectId) -> Vec<ObjectId> {
        self.objects
            .get(&node)
            .map(|o| o.components.clone())
            .unwrap_or_default()
    }

    fn object_references(&self, component: ObjectId) -> Vec<FieldRef> {
        self.objects
            .get(&component)
            .map(|o| o.references.clone())
            .unwrap_or_default()
    }

    fn terrains(&self) -> Vec<TerrainInfo> {
        self.objects
            .iter()
            .filter_map(|(id, object)| {
                object.terrain.as_ref().map(|setup| TerrainInfo {
                    terrain: *id,
                    setup: setup.clone(),
                })
            })
            .collect()
    }
}

impl AssetDatabase for MemoryHost {
    fn asset_path(&self, object: ObjectId) -> Option<String> {
        self.objects.get(&object).and_then(|o| o.path.clone())
    }

    fn type_name(&self, object: ObjectId) -> Option<String> {
        self.objects.get(&object).map(|o| o.type_name.clone())
    }

    /// The asset itself comes first, followed by every dependency reachable
    /// through the direct dependency map in depth-first order
    fn dependencies(&self, path: &str) -> Vec<String> {
        let start = AssetPath::new(path).into_string();
        let mut seen: HashSet<String> = HashSet::new();
        let mut ordered = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(direct) = self.dependencies.get(&current) {
                for dep in direct.iter().rev() {
                    if !seen.contains(dep) {
                        stack.push(dep.clone());
                    }
                }
            }
            ordered.push(current);
        }
        ordered
    }

    fn load_asset(&self, path: &str) -> Option<ObjectId> {
        self.path_index.get(AssetPath::new(path).as_str()).copied()
    }

    fn material_shader(&self, material: ObjectId) -> Option<ObjectId> {
        self.objects.get(&material).and_then(|o| o.shader)
    }

    fn behaviour_scripts(&self, template: ObjectId) -> Vec<ObjectId> {
        // Scripts may sit on the template root or on any nested child
        let mut scripts = Vec::new();
        let mut stack = vec![template];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(object) = self.objects.get(&current) {
                for script in &object.scripts {
                    if !scripts.contains(script) {
                        scripts.push(*script);
                    }
                }
                stack.extend(object.children.iter().rev());
            }
        }
        scripts
    }
}
