use crate::filter::{ExclusionFilter, RecordFilter};
use crate::includes::IncludeIndex;
use crate::record::{AssetKind, AssetRecord};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of one resolution pass
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    pub records: Vec<AssetRecord>,
    pub includes: IncludeIndex,
}

/// Count and byte total for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KindSummary {
    pub count: usize,
    pub total_bytes: u64,
}

impl Resolution {
    pub fn new(records: Vec<AssetRecord>, includes: IncludeIndex) -> Self {
        Self { records, includes }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, path: &str) -> Option<&AssetRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }

    /// Records grouped by category with counts and sizes
    pub fn summary_by_kind(&self) -> BTreeMap<AssetKind, KindSummary> {
        let mut summary: BTreeMap<AssetKind, KindSummary> = BTreeMap::new();
        for record in &self.records {
            let entry = summary.entry(record.kind).or_default();
            entry.count += 1;
            entry.total_bytes += record.size_bytes;
        }
        summary
    }

    pub fn filtered(&self, filter: &RecordFilter, exclusion: &ExclusionFilter) -> Vec<&AssetRecord> {
        filter.apply(&self.records, exclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_by_kind() {
        let resolution = Resolution::new(
            vec![
                AssetRecord::new(None, "Assets/T/A.png", "Texture2D", 100),
                AssetRecord::new(None, "Assets/T/B.png", "Texture2D", 50),
                AssetRecord::new(None, "Assets/S/Lib.hlsl", "ShaderInclude", 7),
            ],
            IncludeIndex::new(),
        );
        let summary = resolution.summary_by_kind();
        assert_eq!(
            summary[&AssetKind::Texture2D],
            KindSummary {
                count: 2,
                total_bytes: 150
            }
        );
        assert_eq!(summary[&AssetKind::Hlsl].count, 1);
        assert_eq!(resolution.total_bytes(), 157);
        assert!(resolution.record("Assets/T/B.png").is_some());
    }
}
