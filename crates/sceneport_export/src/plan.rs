use sceneport_tracer::AssetRecord;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One record and every place it will be copied to
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannedExport {
    pub record: AssetRecord,
    /// Filesystem location of the record's file
    pub source: PathBuf,
    pub destinations: Vec<PathBuf>,
}

/// Destinations for a batch of records below one export root
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportPlan {
    pub root: PathBuf,
    pub entries: Vec<PlannedExport>,
}

impl ExportPlan {
    pub fn new<P: Into<PathBuf>>(root: P, entries: Vec<PlannedExport>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of copies the plan performs, sidecars not counted
    pub fn copy_count(&self) -> usize {
        self.entries.iter().map(|e| e.destinations.len()).sum()
    }

    pub fn entry(&self, path: &str) -> Option<&PlannedExport> {
        self.entries.iter().find(|e| e.record.path == path)
    }

    /// Destination path relative to the export root, for display
    pub fn relative_destination<'p>(&self, destination: &'p Path) -> &'p Path {
        destination.strip_prefix(&self.root).unwrap_or(destination)
    }
}
