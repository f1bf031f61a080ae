//! Export layout analysis
//!
//! Checks, for every include edge, whether the planned destinations keep the
//! `#include` token pointing at the copied file.

use crate::reconcile::PathReconciler;
use log::debug;
use sceneport_tracer::paths::{clean_token, normalize_lexically};
use sceneport_tracer::{AssetRecord, IncludeEdge, IncludeIndex};
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Planned placement of one include edge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncludeLayout {
    pub edge: IncludeEdge,
    pub source_destination: PathBuf,
    pub include_destinations: Vec<PathBuf>,
    /// Where the token points once the including file is exported
    pub expected: PathBuf,
    /// Path from the including file's folder to the primary include copy
    pub relative: Option<PathBuf>,
}

impl IncludeLayout {
    /// True when one of the include copies sits where the token points
    pub fn is_satisfied(&self) -> bool {
        self.include_destinations.contains(&self.expected)
    }
}

fn join_token(base: &Path, token: &str) -> PathBuf {
    token
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

/// Lay out every edge of `includes` below `root`
pub fn analyze_export_layout(
    reconciler: &PathReconciler<'_>,
    includes: &IncludeIndex,
    root: &Path,
) -> Vec<IncludeLayout> {
    includes
        .edges()
        .map(|edge| {
            let include = AssetRecord::new(None, &edge.resolved_path, "ShaderInclude", 0);
            let source_destination = reconciler.consumer_destination(&edge.source_path, root);
            let include_destinations = reconciler.destinations_for(&include, root);
            let source_dir = source_destination.parent().unwrap_or(root);

            let token = clean_token(&edge.include_token);
            let expected = if token.starts_with("Assets/") {
                join_token(root, &token)
            } else {
                normalize_lexically(&join_token(source_dir, &token))
            };
            let relative = include_destinations
                .first()
                .and_then(|primary| pathdiff::diff_paths(primary, source_dir));

            let layout = IncludeLayout {
                edge: edge.clone(),
                source_destination: source_destination.clone(),
                include_destinations,
                expected,
                relative,
            };
            debug!(
                "{} includes {}: {}",
                edge.source_path,
                edge.include_token,
                if layout.is_satisfied() { "ok" } else { "broken" }
            );
            layout
        })
        .collect()
}

/// Only the edges whose token no longer reaches a copy
pub fn broken_includes(layouts: &[IncludeLayout]) -> Vec<&IncludeLayout> {
    layouts.iter().filter(|l| !l.is_satisfied()).collect()
}
