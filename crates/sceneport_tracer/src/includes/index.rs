//! Include edges and the indexes built over them

use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One resolved `#include`: `source_path` names `include_token`, which was
/// found at `resolved_path`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncludeEdge {
    pub source_path: String,
    pub include_token: String,
    pub resolved_path: String,
}

/// Include edges indexed both ways: by including file and by included file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncludeIndex {
    by_source: BTreeMap<String, Vec<IncludeEdge>>,
    usage: BTreeMap<String, Vec<String>>,
}

impl IncludeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge. A source keeps one edge per resolved file; returns
    /// false when the pair was already known.
    pub fn record(&mut self, edge: IncludeEdge) -> bool {
        let edges = self.by_source.entry(edge.source_path.clone()).or_default();
        if edges.iter().any(|e| e.resolved_path == edge.resolved_path) {
            return false;
        }
        let users = self.usage.entry(edge.resolved_path.clone()).or_default();
        if !users.contains(&edge.source_path) {
            users.push(edge.source_path.clone());
        }
        edges.push(edge);
        true
    }

    /// Edges leaving `source`, in discovery order
    pub fn edges_from(&self, source: &str) -> &[IncludeEdge] {
        self.by_source.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Files that include `resolved`, in discovery order
    pub fn consumers_of(&self, resolved: &str) -> &[String] {
        self.usage.get(resolved).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The edge by which `source` pulls in `resolved`
    pub fn edge_between(&self, source: &str, resolved: &str) -> Option<&IncludeEdge> {
        self.edges_from(source)
            .iter()
            .find(|edge| edge.resolved_path == resolved)
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.by_source.keys().map(String::as_str)
    }

    pub fn included_files(&self) -> impl Iterator<Item = &str> {
        self.usage.keys().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = &IncludeEdge> {
        self.by_source.values().flatten()
    }

    pub fn edge_count(&self) -> usize {
        self.by_source.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Fold another index into this one
    pub fn merge(&mut self, other: IncludeIndex) {
        for edge in other.by_source.into_values().flatten() {
            self.record(edge);
        }
    }
}

/// (include token, source path) pairs already processed in a pass
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    pairs: HashSet<(String, String)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as visited; false when it already was
    pub fn insert(&mut self, token: &str, source: &str) -> bool {
        self.pairs.insert((token.to_string(), source.to_string()))
    }

    pub fn contains(&self, token: &str, source: &str) -> bool {
        self.pairs.contains(&(token.to_string(), source.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
