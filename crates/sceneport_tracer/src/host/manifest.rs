//! JSON scene manifests
//!
//! A manifest is a snapshot of a scene and the slice of the asset database it
//! touches, exported by an editor bridge. Loading one yields a validated
//! [`MemoryHost`].
//!
//! ```json
//! {
//!   "roots": [1],
//!   "objects": [
//!     { "id": 1, "type": "GameObject", "components": [2] },
//!     { "id": 2, "type": "MeshRenderer",
//!       "references": [{ "field": "m_Materials.Array.data[0]", "target": 3 }] },
//!     { "id": 3, "type": "Material", "path": "Assets/Materials/Rock.mat", "shader": 4 },
//!     { "id": 4, "type": "Shader", "path": "Assets/Shaders/Rock.shader" }
//!   ],
//!   "dependencies": { "Assets/Materials/Rock.mat": ["Assets/Shaders/Rock.shader"] }
//! }
//! ```

use super::ObjectId;
use super::memory::{MemoryHost, MemoryObject};
use log::debug;
use sceneport_error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub roots: Vec<ObjectId>,
    #[serde(default)]
    pub objects: Vec<ManifestEntry>,
    /// Direct dependencies per asset path
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: ObjectId,
    #[serde(flatten)]
    pub object: MemoryObject,
}

impl SceneManifest {
    /// Build and validate the in-memory host described by this manifest
    pub fn into_host(self) -> Result<MemoryHost> {
        let mut host = MemoryHost::new();
        let object_count = self.objects.len();
        for entry in self.objects {
            host.add(entry.id, entry.object)?;
        }
        for root in self.roots {
            host.add_root(root);
        }
        for (path, deps) in self.dependencies {
            host.add_dependencies(path, deps);
        }
        host.validate()?;
        debug!("Loaded scene manifest with {object_count} objects");
        Ok(host)
    }
}
