//! Scene object-graph walker
//!
//! Collects everything a scene references directly: prefab sources of
//! instances, every object-reference field on every component, and the
//! assets hanging off terrains. The host is never mutated.

use crate::context::CollectedSet;
use crate::host::{ObjectId, SceneGraph, TerrainInfo};
use log::{debug, trace};
use std::collections::HashSet;

pub struct SceneWalker<'a> {
    scene: &'a dyn SceneGraph,
}

impl<'a> SceneWalker<'a> {
    pub fn new(scene: &'a dyn SceneGraph) -> Self {
        Self { scene }
    }

    /// Depth-first walk from `roots`, adding every directly referenced
    /// object to `out`
    pub fn walk(&self, roots: &[ObjectId], out: &mut CollectedSet) {
        let before = out.len();
        let mut entered = HashSet::new();
        for root in roots {
            self.walk_node(*root, out, &mut entered);
        }
        debug!(
            "Walked {} node(s), collected {} object(s)",
            entered.len(),
            out.len() - before
        );
    }

    fn walk_node(&self, node: ObjectId, out: &mut CollectedSet, entered: &mut HashSet<ObjectId>) {
        if !entered.insert(node) {
            return;
        }

        if let Some(source) = self.scene.prefab_source(node) {
            trace!("{node} is an instance of {source}");
            out.insert(source);
        }

        for component in self.scene.components(node) {
            for field in self.scene.object_references(component) {
                trace!("{component}.{} -> {}", field.field, field.target);
                out.insert(field.target);
            }
        }

        for child in self.scene.children(node) {
            self.walk_node(child, out, entered);
        }
    }

    /// Scene-wide pass over terrains and the assets they use
    pub fn collect_terrains(&self, out: &mut CollectedSet) {
        let terrains = self.scene.terrains();
        for terrain in &terrains {
            Self::collect_terrain(terrain, out);
        }
        if !terrains.is_empty() {
            debug!("Collected assets from {} terrain(s)", terrains.len());
        }
    }

    fn collect_terrain(terrain: &TerrainInfo, out: &mut CollectedSet) {
        out.insert(terrain.terrain);

        // Everything else is only reachable through the data object
        let Some(data) = &terrain.setup.data else {
            return;
        };
        out.insert(data.data);
        if let Some(material) = terrain.setup.material_template {
            out.insert(material);
        }
        for texture in &data.alpha_textures {
            out.insert(*texture);
        }
        for detail in &data.detail_prototypes {
            if let Some(texture) = detail.texture {
                out.insert(texture);
            }
            if let Some(prototype) = detail.prototype {
                out.insert(prototype);
            }
        }
        for tree in &data.tree_prototypes {
            if let Some(prefab) = tree.prefab {
                out.insert(prefab);
            }
        }
    }
}
