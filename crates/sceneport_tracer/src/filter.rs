//! Path exclusion and record filtering
//!
//! `ExclusionFilter` keeps render-pipeline package content out of a
//! resolution pass. `RecordFilter` narrows a finished record list the way the
//! asset browser does: search text, per-kind toggles, exclusion.

use crate::record::{AssetKind, AssetRecord};
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Substrings identifying Universal Render Pipeline content
pub const URP_KEYWORDS: &[&str] = &[
    "Packages/com.unity.render-pipelines.universal",
    "UniversalRenderPipelineAsset",
    "UniversalRenderer",
    "URP-",
    "UniversalAdditional",
    "Universal Render Pipeline",
    "ShaderLibrary/Universal",
    "ShaderGraph/Universal",
    "Shaders/Universal",
    "HLSL/Universal",
    "HLSL/URP",
    "RenderPipeline/Universal",
];

/// Case-insensitive substring exclusion over asset paths
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    enabled: bool,
    keywords: Vec<String>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::render_pipeline(true)
    }
}

impl ExclusionFilter {
    /// The fixed render-pipeline keyword list, switched on or off
    pub fn render_pipeline(enabled: bool) -> Self {
        Self {
            enabled,
            keywords: URP_KEYWORDS.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn disabled() -> Self {
        Self::render_pipeline(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        if !self.enabled || path.is_empty() {
            return false;
        }
        let lowered = path.replace('\\', "/").to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Narrow a record list by search text and category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RecordFilter {
    /// Case-insensitive substring matched against record paths
    pub search: Option<String>,
    /// Categories hidden from the result
    pub disabled_kinds: BTreeSet<AssetKind>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn without_kind(mut self, kind: AssetKind) -> Self {
        self.disabled_kinds.insert(kind);
        self
    }

    /// Keep only the listed kinds
    pub fn only_kinds<I: IntoIterator<Item = AssetKind>>(mut self, kinds: I) -> Self {
        let keep: BTreeSet<AssetKind> = kinds.into_iter().collect();
        self.disabled_kinds = AssetKind::ALL
            .iter()
            .copied()
            .filter(|kind| !keep.contains(kind))
            .collect();
        self
    }

    pub fn kind_enabled(&self, kind: AssetKind) -> bool {
        !self.disabled_kinds.contains(&kind)
    }

    pub fn matches(&self, record: &AssetRecord, exclusion: &ExclusionFilter) -> bool {
        if let Some(search) = &self.search {
            if !record.path.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        self.kind_enabled(record.kind) && !exclusion.is_excluded(&record.path)
    }

    pub fn apply<'a>(
        &self,
        records: &'a [AssetRecord],
        exclusion: &ExclusionFilter,
    ) -> Vec<&'a AssetRecord> {
        records
            .iter()
            .filter(|record| self.matches(record, exclusion))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urp_paths_excluded() {
        let filter = ExclusionFilter::default();
        assert!(filter.is_excluded(
            "Packages/com.unity.render-pipelines.universal/ShaderLibrary/Core.hlsl"
        ));
        assert!(filter.is_excluded("Assets/Settings/urp-HighFidelity.asset"));
        assert!(filter.is_excluded("Assets\\Shaders\\Universal\\Lit.shader"));
        assert!(!filter.is_excluded("Assets/Shaders/Water.shader"));
    }

    #[test]
    fn test_disabled_filter_excludes_nothing() {
        let filter = ExclusionFilter::disabled();
        assert!(!filter.is_excluded("Packages/com.unity.render-pipelines.universal/x.hlsl"));
    }

    #[test]
    fn test_record_filter_search_and_kind() {
        let records = vec![
            AssetRecord::new(None, "Assets/Textures/Grass.png", "Texture2D", 10),
            AssetRecord::new(None, "Assets/Materials/Grass.mat", "Material", 10),
            AssetRecord::new(None, "Assets/Materials/Rock.mat", "Material", 10),
        ];
        let exclusion = ExclusionFilter::default();

        let filter = RecordFilter::new().with_search("grass");
        assert_eq!(filter.apply(&records, &exclusion).len(), 2);

        let filter = RecordFilter::new()
            .with_search("GRASS")
            .without_kind(AssetKind::Texture2D);
        let kept = filter.apply(&records, &exclusion);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].path, "Assets/Materials/Grass.mat");

        let filter = RecordFilter::new().only_kinds([AssetKind::Texture2D]);
        assert_eq!(filter.apply(&records, &exclusion).len(), 1);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = RecordFilter::new().with_search("   ");
        assert_eq!(filter.search, None);
    }
}
