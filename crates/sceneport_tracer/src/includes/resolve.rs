//! Include token resolution
//!
//! A token can name more than one file. Every candidate that exists, is
//! shader source and is not excluded is returned; callers never pick a
//! single winner.

use crate::context::ResolutionContext;
use crate::filter::ExclusionFilter;
use crate::paths::{ASSET_ROOT, AssetPath, clean_token};
use crate::project::Project;
use log::trace;
use std::collections::HashSet;

pub struct IncludeResolver<'a> {
    project: &'a Project,
    exclusion: &'a ExclusionFilter,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(project: &'a Project, exclusion: &'a ExclusionFilter) -> Self {
        Self { project, exclusion }
    }

    /// Resolve `token` as written in a file living in `base_dir`.
    ///
    /// Candidates, in order:
    /// 1. the token taken from the project root
    /// 2. the token joined to `base_dir`; when that file is missing, every
    ///    shader source below `base_dir` with the same file name
    /// 3. every shader source below the asset root with the same file name,
    ///    or failing that the first one whose path contains the token
    pub fn resolve(&self, token: &str, base_dir: &str, cx: &mut ResolutionContext) -> Vec<String> {
        let token = clean_token(token);
        if token.is_empty() {
            return Vec::new();
        }
        let token_path = AssetPath::new(&token);
        let name = token_path.file_name().to_string();
        let mut candidates: Vec<String> = Vec::new();

        let direct = self
            .project
            .absolute(token_path.normalized().as_str());
        candidates.push(self.project.relative(&direct));

        if !base_dir.is_empty() {
            let joined = AssetPath::new(base_dir).join(&token).normalized();
            if self.project.is_file(joined.as_str()) {
                candidates.push(joined.into_string());
            } else {
                candidates.extend(
                    cx.shader_sources_under(self.project, base_dir)
                        .iter()
                        .filter(|path| AssetPath::new(path.as_str()).file_name_matches(&name))
                        .cloned(),
                );
            }
        }

        let project_wide = cx.shader_sources_under(self.project, ASSET_ROOT);
        let by_name: Vec<String> = project_wide
            .iter()
            .filter(|path| AssetPath::new(path.as_str()).file_name_matches(&name))
            .cloned()
            .collect();
        if by_name.is_empty() {
            let needle = token.to_lowercase();
            if let Some(hit) = project_wide
                .iter()
                .find(|path| path.to_lowercase().contains(&needle))
            {
                candidates.push(hit.clone());
            }
        } else {
            candidates.extend(by_name);
        }

        let mut seen = HashSet::new();
        let accepted: Vec<String> = candidates
            .into_iter()
            .filter(|path| seen.insert(path.clone()))
            .filter(|path| self.accepts(path))
            .collect();
        trace!("Include '{token}' from '{base_dir}' resolved to {accepted:?}");
        accepted
    }

    fn accepts(&self, path: &str) -> bool {
        AssetPath::new(path).is_shader_source()
            && self.project.is_file(path)
            && !self.exclusion.is_excluded(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(files: &[&str]) -> (TempDir, Project) {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "// shader source").unwrap();
        }
        let project = Project::new(tmp.path());
        (tmp, project)
    }

    #[test]
    fn test_relative_to_base_dir() {
        let (_tmp, project) = project_with(&["Assets/Shaders/Common/Lib.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        let found = resolver.resolve("Common/Lib.hlsl", "Assets/Shaders", &mut cx);
        assert_eq!(found, vec!["Assets/Shaders/Common/Lib.hlsl".to_string()]);
    }

    #[test]
    fn test_project_rooted_token() {
        let (_tmp, project) = project_with(&["Assets/Common/Lib.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        let found = resolver.resolve(" Assets\\Common\\Lib.hlsl ", "Assets/Shaders", &mut cx);
        assert_eq!(found, vec!["Assets/Common/Lib.hlsl".to_string()]);
    }

    #[test]
    fn test_parent_segments() {
        let (_tmp, project) = project_with(&["Assets/Common/Lib.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        let found = resolver.resolve("../Common/Lib.hlsl", "Assets/Shaders", &mut cx);
        assert_eq!(found, vec!["Assets/Common/Lib.hlsl".to_string()]);
    }

    #[test]
    fn test_duplicate_file_names_all_returned() {
        let (_tmp, project) =
            project_with(&["Assets/Common/Lib.hlsl", "Assets/Other/Lib.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        let found = resolver.resolve("Lib.hlsl", "Assets/Shaders", &mut cx);
        assert_eq!(
            found,
            vec![
                "Assets/Common/Lib.hlsl".to_string(),
                "Assets/Other/Lib.hlsl".to_string(),
            ]
        );
    }

    #[test]
    fn test_substring_fallback() {
        let (_tmp, project) = project_with(&["Assets/Noise/SimplexNoise3D.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        let found = resolver.resolve("Perlin", "Assets/Shaders", &mut cx);
        assert!(found.is_empty());
        let found = resolver.resolve("noise/simplex", "Assets/Shaders", &mut cx);
        assert_eq!(found, vec!["Assets/Noise/SimplexNoise3D.hlsl".to_string()]);
        let found = resolver.resolve("SimplexNoise3D", "Assets/Shaders", &mut cx);
        assert_eq!(found, vec!["Assets/Noise/SimplexNoise3D.hlsl".to_string()]);
    }

    #[test]
    fn test_excluded_and_non_shader_candidates_dropped() {
        let (_tmp, project) = project_with(&[
            "Assets/Shaders/Universal/Lit.hlsl",
            "Assets/Docs/Lit.hlsl.txt",
        ]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        assert!(resolver.resolve("Lit.hlsl", "Assets", &mut cx).is_empty());

        let open = ExclusionFilter::disabled();
        let resolver = IncludeResolver::new(&project, &open);
        let found = resolver.resolve("Lit.hlsl", "Assets", &mut cx);
        assert_eq!(found, vec!["Assets/Shaders/Universal/Lit.hlsl".to_string()]);
    }

    #[test]
    fn test_unresolvable_token() {
        let (_tmp, project) = project_with(&["Assets/Common/Lib.hlsl"]);
        let exclusion = ExclusionFilter::default();
        let resolver = IncludeResolver::new(&project, &exclusion);
        let mut cx = ResolutionContext::new();
        assert!(resolver.resolve("Missing.hlsl", "Assets", &mut cx).is_empty());
        assert!(resolver.resolve("   ", "Assets", &mut cx).is_empty());
    }
}
