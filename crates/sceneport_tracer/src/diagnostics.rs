//! Include graph diagnostics
//!
//! Tools for looking at one shader's includes in isolation and for spotting
//! includes that only resolved through a project-wide search, which break
//! when the files are copied somewhere else.

use crate::context::ResolutionContext;
use crate::core::options::ResolverOptions;
use crate::filter::ExclusionFilter;
use crate::includes::{IncludeEdge, IncludeExtractor, IncludeIndex, IncludeScanner};
use crate::paths::{AssetPath, clean_token};
use crate::project::Project;
use crate::record::AssetRef;
use log::info;
use sceneport_error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Include graph of a single shader, resolved without a scene
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShaderIncludeReport {
    pub shader: String,
    /// Every include file reached, in discovery order
    pub files: Vec<String>,
    pub includes: IncludeIndex,
}

/// Resolve the include graph of `shader_path` in a fresh pass
pub fn resolve_shader_includes(
    project: &Project,
    shader_path: &str,
    options: &ResolverOptions,
) -> Result<ShaderIncludeReport> {
    let scanner = IncludeScanner::new()?;
    let exclusion = ExclusionFilter::render_pipeline(options.exclude_render_pipeline);
    let extractor = IncludeExtractor::new(project, &exclusion, &scanner)
        .with_guard(options.include_guard)
        .with_max_depth(options.max_include_depth);

    let shader = AssetPath::new(shader_path).into_string();
    let mut state = ResolutionContext::new();
    extractor.extract(&shader, &mut state);

    let (collected, includes) = state.finish();
    let files: Vec<String> = collected
        .iter()
        .filter_map(|item| match item {
            AssetRef::File(path) => Some(path.clone()),
            AssetRef::Object(_) => None,
        })
        .collect();
    info!("{shader}: {} include file(s)", files.len());

    Ok(ShaderIncludeReport {
        shader,
        files,
        includes,
    })
}

/// An include whose resolved file is not where the including file expects
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncludeMismatch {
    pub edge: IncludeEdge,
    /// Where the token points relative to the including file
    pub expected_path: String,
}

impl IncludeMismatch {
    pub fn actual_path(&self) -> &str {
        &self.edge.resolved_path
    }
}

/// Where the including file expects `edge`'s target to be
pub fn expected_include_path(edge: &IncludeEdge) -> String {
    let token = clean_token(&edge.include_token);
    let token_path = AssetPath::new(&token);
    if token_path.is_under_asset_root() || token_path.is_absolute() {
        return token_path.normalized().into_string();
    }
    AssetPath::new(&edge.source_path)
        .parent()
        .join(&token)
        .normalized()
        .into_string()
}

/// Every edge whose resolved file differs from the expected location
pub fn find_include_mismatches(index: &IncludeIndex) -> Vec<IncludeMismatch> {
    index
        .edges()
        .filter_map(|edge| {
            let expected_path = expected_include_path(edge);
            if expected_path == edge.resolved_path {
                None
            } else {
                Some(IncludeMismatch {
                    edge: edge.clone(),
                    expected_path,
                })
            }
        })
        .collect()
}
