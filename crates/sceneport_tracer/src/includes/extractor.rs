//! Recursive shader include extraction

use super::index::IncludeEdge;
use super::resolve::IncludeResolver;
use super::scanner::IncludeScanner;
use super::IncludeGuard;
use crate::context::ResolutionContext;
use crate::filter::ExclusionFilter;
use crate::host::AssetDatabase;
use crate::paths::AssetPath;
use crate::project::Project;
use log::{debug, trace, warn};

/// Walks a shader's include graph, recording an edge for every resolved
/// include and collecting each included file.
pub struct IncludeExtractor<'a> {
    project: &'a Project,
    exclusion: &'a ExclusionFilter,
    scanner: &'a IncludeScanner,
    resolver: IncludeResolver<'a>,
    database: Option<&'a dyn AssetDatabase>,
    guard: IncludeGuard,
    max_depth: Option<usize>,
}

impl<'a> IncludeExtractor<'a> {
    pub fn new(
        project: &'a Project,
        exclusion: &'a ExclusionFilter,
        scanner: &'a IncludeScanner,
    ) -> Self {
        Self {
            project,
            exclusion,
            scanner,
            resolver: IncludeResolver::new(project, exclusion),
            database: None,
            guard: IncludeGuard::default(),
            max_depth: None,
        }
    }

    /// Collect included files as host objects where the host knows them
    pub fn with_database(mut self, database: &'a dyn AssetDatabase) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_guard(mut self, guard: IncludeGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Extract the include graph rooted at `source`. Returns the number of
    /// new edges.
    pub fn extract(&self, source: &str, cx: &mut ResolutionContext) -> usize {
        let source = AssetPath::new(source).into_string();
        if !self.project.is_file(&source) {
            debug!("Skipping include scan of missing file {source}");
            return 0;
        }
        if self.exclusion.is_excluded(&source) {
            trace!("Skipping include scan of excluded file {source}");
            return 0;
        }
        if self.guard == IncludeGuard::ResolvedFile && !cx.mark_scanned(&source) {
            return 0;
        }
        let added = self.extract_file(&source, cx, 0);
        if added > 0 {
            debug!("{source}: {added} include edge(s)");
        }
        added
    }

    fn extract_file(&self, source: &str, cx: &mut ResolutionContext, depth: usize) -> usize {
        match self.project.read_text(source) {
            Ok(text) => self.extract_text(&text, source, cx, depth),
            Err(e) => {
                warn!("Could not read {source}: {}", e.user_message());
                0
            }
        }
    }

    /// Extract includes from already-loaded text belonging to `source`
    pub fn extract_text(
        &self,
        text: &str,
        source: &str,
        cx: &mut ResolutionContext,
        depth: usize,
    ) -> usize {
        let base_dir = AssetPath::new(source).parent();
        let mut added = 0;

        for token in self.scanner.scan(text) {
            if !cx.visited.insert(&token, source) {
                trace!("Already visited '{token}' from {source}");
                continue;
            }

            let resolved = self.resolver.resolve(&token, base_dir.as_str(), cx);
            if resolved.is_empty() {
                debug!("Unresolved include '{token}' in {source}");
                continue;
            }

            for path in resolved {
                cx.collect_file(&path, self.database);
                let edge = IncludeEdge {
                    source_path: source.to_string(),
                    include_token: token.clone(),
                    resolved_path: path.clone(),
                };
                if cx.includes.record(edge) {
                    added += 1;
                }

                if self.guard == IncludeGuard::ResolvedFile && !cx.mark_scanned(&path) {
                    continue;
                }
                if let Some(max) = self.max_depth {
                    if depth + 1 > max {
                        debug!("Include depth limit {max} reached at {path}");
                        continue;
                    }
                }
                added += self.extract_file(&path, cx, depth + 1);
            }
        }
        added
    }
}
