use std::collections::HashSet;
use std::fs;
use std::path::Path;

use sceneport_error::ResolverErrorKind;
use sceneport_tracer::host::{DetailPrototype, TerrainDataInfo, TerrainSetup, TreePrototype};
use sceneport_tracer::{
    AssetKind, DependencyResolver, MemoryHost, MemoryObject, ObjectId, Progress, ProgressControl,
    ProgressSink, Project, Resolution, ResolverOptions,
};
use tempfile::TempDir;

const WATER_SHADER: &str = r#"
Shader "Custom/Water" {
    SubShader { Pass { HLSLPROGRAM
        #include "Common/Lib.hlsl"
        #include "Packages/com.unity.render-pipelines.universal/ShaderLibrary/Core.hlsl"
    ENDHLSL } }
}
"#;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn harbour_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Assets/Materials/Water.mat", "material");
    write(root, "Assets/Shaders/Water.shader", WATER_SHADER);
    write(root, "Assets/Common/Lib.hlsl", "float lib;");
    write(
        root,
        "Packages/com.unity.render-pipelines.universal/ShaderLibrary/Core.hlsl",
        "float core;",
    );
    write(root, "Assets/Textures/Foam.png", "png");
    write(root, "Assets/Prefabs/Boat.prefab", "prefab");
    write(root, "Assets/Prefabs/Sail.prefab", "prefab");
    write(root, "Assets/Textures/Sail.png", "png");
    write(root, "Assets/Scripts/Boat.cs", "class Boat {}");
    tmp
}

fn harbour_host() -> MemoryHost {
    MemoryHost::new()
        .with(
            1,
            MemoryObject::new("GameObject")
                .named("Harbour")
                .with_component(ObjectId(2))
                .with_child(ObjectId(3)),
        )
        .unwrap()
        .with(
            2,
            MemoryObject::new("MeshRenderer")
                .with_reference("m_Materials.Array.data[0]", ObjectId(10))
                .with_reference("m_LightmapParameters", ObjectId(50)),
        )
        .unwrap()
        .with(
            3,
            MemoryObject::new("GameObject").with_prefab_source(ObjectId(40)),
        )
        .unwrap()
        .with(
            10,
            MemoryObject::asset("Material", "Assets/Materials/Water.mat").with_shader(ObjectId(11)),
        )
        .unwrap()
        .with(11, MemoryObject::asset("Shader", "Assets/Shaders/Water.shader"))
        .unwrap()
        .with(12, MemoryObject::asset("Texture2D", "Assets/Textures/Foam.png"))
        .unwrap()
        .with(
            40,
            MemoryObject::asset("GameObject", "Assets/Prefabs/Boat.prefab").with_script(ObjectId(41)),
        )
        .unwrap()
        .with(41, MemoryObject::asset("MonoScript", "Assets/Scripts/Boat.cs"))
        .unwrap()
        .with(42, MemoryObject::asset("GameObject", "Assets/Prefabs/Sail.prefab"))
        .unwrap()
        .with(43, MemoryObject::asset("Texture2D", "Assets/Textures/Sail.png"))
        .unwrap()
        .with(
            50,
            MemoryObject::asset("LightmapParameters", "Library/unity default resources"),
        )
        .unwrap()
        .with_root(1)
        .with_dependencies(
            "Assets/Materials/Water.mat",
            ["Assets/Shaders/Water.shader", "Assets/Textures/Foam.png"],
        )
        .with_dependencies("Assets/Prefabs/Boat.prefab", ["Assets/Prefabs/Sail.prefab"])
        .with_dependencies("Assets/Prefabs/Sail.prefab", ["Assets/Textures/Sail.png"])
}

fn resolve(tmp: &TempDir, host: &MemoryHost, options: ResolverOptions) -> Resolution {
    DependencyResolver::new(host, host, Project::new(tmp.path()))
        .unwrap()
        .with_options(options)
        .with_default_expanders()
        .resolve_scene()
        .unwrap()
}

fn paths(resolution: &Resolution) -> HashSet<&str> {
    resolution.records.iter().map(|r| r.path.as_str()).collect()
}

#[test]
fn resolves_full_closure() {
    env_logger::try_init().ok();
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(&tmp, &host, ResolverOptions::default());

    let expected: HashSet<&str> = [
        "Assets/Materials/Water.mat",
        "Assets/Prefabs/Boat.prefab",
        "Assets/Shaders/Water.shader",
        "Assets/Textures/Foam.png",
        "Assets/Prefabs/Sail.prefab",
        "Assets/Textures/Sail.png",
        "Assets/Scripts/Boat.cs",
        "Assets/Common/Lib.hlsl",
    ]
    .into_iter()
    .collect();
    assert_eq!(paths(&resolution), expected);

    let lib = resolution.record("Assets/Common/Lib.hlsl").unwrap();
    assert_eq!(lib.kind, AssetKind::Hlsl);
    assert_eq!(lib.size_bytes, "float lib;".len() as u64);
    assert_eq!(lib.handle, None);

    let script = resolution.record("Assets/Scripts/Boat.cs").unwrap();
    assert_eq!(script.kind, AssetKind::Script);
}

#[test]
fn record_paths_are_unique() {
    let tmp = harbour_project();
    let mut host = harbour_host();
    // A second object backed by the same file
    host.add(
        ObjectId(60),
        MemoryObject::asset("Sprite", "Assets/Textures/Foam.png"),
    )
    .unwrap();
    host.add(
        ObjectId(4),
        MemoryObject::new("SpriteRenderer").with_reference("m_Sprite", ObjectId(60)),
    )
    .unwrap();
    host.add(
        ObjectId(5),
        MemoryObject::new("GameObject").with_component(ObjectId(4)),
    )
    .unwrap();
    host.add_root(ObjectId(5));

    let resolution = resolve(&tmp, &host, ResolverOptions::default());
    let mut seen = HashSet::new();
    for record in &resolution.records {
        assert!(seen.insert(record.path.clone()), "duplicate {}", record.path);
    }
}

#[test]
fn single_include_resolves_to_single_edge() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(&tmp, &host, ResolverOptions::default());

    let edges = resolution.includes.edges_from("Assets/Shaders/Water.shader");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].include_token, "Common/Lib.hlsl");
    assert_eq!(edges[0].resolved_path, "Assets/Common/Lib.hlsl");
    assert_eq!(
        resolution.includes.consumers_of("Assets/Common/Lib.hlsl"),
        ["Assets/Shaders/Water.shader"]
    );
}

#[test]
fn excluded_paths_never_surface() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(&tmp, &host, ResolverOptions::default());

    assert!(
        resolution
            .records
            .iter()
            .all(|r| !r.path.contains("render-pipelines.universal"))
    );
    assert!(
        resolution
            .includes
            .edges()
            .all(|e| !e.resolved_path.contains("render-pipelines.universal"))
    );

    let open = ResolverOptions::default().with_render_pipeline_exclusion(false);
    let resolution = resolve(&tmp, &host, open);
    let core = "Packages/com.unity.render-pipelines.universal/ShaderLibrary/Core.hlsl";
    assert!(resolution.record(core).is_some());
    assert_eq!(resolution.includes.consumers_of(core).len(), 1);
}

#[test]
fn builtin_assets_follow_option() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(&tmp, &host, ResolverOptions::default());
    assert!(resolution.record("Library/unity default resources").is_none());

    let resolution = resolve(
        &tmp,
        &host,
        ResolverOptions::default().with_builtin_assets(true),
    );
    let builtin = resolution.record("Library/unity default resources").unwrap();
    assert_eq!(builtin.size_bytes, 0);
}

#[test]
fn sub_assets_off_keeps_only_direct_references() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(&tmp, &host, ResolverOptions::default().with_sub_assets(false));

    let expected: HashSet<&str> = ["Assets/Materials/Water.mat", "Assets/Prefabs/Boat.prefab"]
        .into_iter()
        .collect();
    assert_eq!(paths(&resolution), expected);
    assert!(resolution.includes.is_empty());
}

#[test]
fn shader_include_toggle() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolution = resolve(
        &tmp,
        &host,
        ResolverOptions::default().with_shader_includes(false),
    );
    assert!(resolution.record("Assets/Common/Lib.hlsl").is_none());
    assert!(resolution.record("Assets/Shaders/Water.shader").is_some());
}

#[test]
fn repeated_passes_are_independent_and_identical() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolver = DependencyResolver::new(&host, &host, Project::new(tmp.path()))
        .unwrap()
        .with_default_expanders();

    let first = resolver.resolve_scene().unwrap();
    let second = resolver.resolve_scene().unwrap();
    assert_eq!(first.includes, second.includes);
    assert_eq!(first.records, second.records);
}

#[test]
fn duplicate_include_names_are_all_surfaced() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Assets/Shaders/Rock.shader", "#include \"Lib.hlsl\"");
    write(root, "Assets/Common/Lib.hlsl", "");
    write(root, "Assets/Other/Lib.hlsl", "");

    let host = MemoryHost::new()
        .with(
            1,
            MemoryObject::new("GameObject").with_component(ObjectId(2)),
        )
        .unwrap()
        .with(
            2,
            MemoryObject::new("MeshRenderer").with_reference("m_Materials", ObjectId(3)),
        )
        .unwrap()
        .with(3, MemoryObject::asset("Shader", "Assets/Shaders/Rock.shader"))
        .unwrap()
        .with_root(1);

    let resolution = resolve(&tmp, &host, ResolverOptions::default());
    let resolved: HashSet<&str> = resolution
        .includes
        .edges_from("Assets/Shaders/Rock.shader")
        .iter()
        .map(|e| e.resolved_path.as_str())
        .collect();
    let expected: HashSet<&str> = ["Assets/Common/Lib.hlsl", "Assets/Other/Lib.hlsl"]
        .into_iter()
        .collect();
    assert_eq!(resolved, expected);
    assert!(resolution.record("Assets/Common/Lib.hlsl").is_some());
    assert!(resolution.record("Assets/Other/Lib.hlsl").is_some());
}

#[test]
fn terrain_assets_collected() {
    let tmp = TempDir::new().unwrap();
    let setup = TerrainSetup {
        material_template: Some(ObjectId(21)),
        data: Some(TerrainDataInfo {
            data: ObjectId(20),
            alpha_textures: vec![ObjectId(22)],
            detail_prototypes: vec![DetailPrototype {
                texture: Some(ObjectId(23)),
                prototype: Some(ObjectId(24)),
            }],
            tree_prototypes: vec![TreePrototype {
                prefab: Some(ObjectId(25)),
            }],
        }),
    };
    let host = MemoryHost::new()
        .with(1, MemoryObject::new("GameObject").with_component(ObjectId(2)))
        .unwrap()
        .with(2, MemoryObject::new("Terrain").with_terrain(setup))
        .unwrap()
        .with(20, MemoryObject::asset("TerrainData", "Assets/Terrain/Island.asset"))
        .unwrap()
        .with(21, MemoryObject::asset("Material", "Assets/Terrain/Ground.mat"))
        .unwrap()
        .with(22, MemoryObject::asset("Texture2D", "Assets/Terrain/Splat0.png"))
        .unwrap()
        .with(23, MemoryObject::asset("Texture2D", "Assets/Terrain/Grass.png"))
        .unwrap()
        .with(24, MemoryObject::asset("GameObject", "Assets/Terrain/Bush.prefab"))
        .unwrap()
        .with(25, MemoryObject::asset("GameObject", "Assets/Terrain/Pine.prefab"))
        .unwrap()
        .with_root(1);

    let resolution = resolve(&tmp, &host, ResolverOptions::default());
    let kinds: Vec<(String, AssetKind)> = resolution
        .records
        .iter()
        .map(|r| (r.path.clone(), r.kind))
        .collect();
    assert_eq!(kinds.len(), 6);
    assert!(kinds.contains(&("Assets/Terrain/Island.asset".to_string(), AssetKind::TerrainData)));
    assert!(kinds.contains(&("Assets/Terrain/Pine.prefab".to_string(), AssetKind::Prefab)));
}

#[test]
fn empty_roots_rejected_before_any_work() {
    let tmp = TempDir::new().unwrap();
    let host = MemoryHost::new();
    let resolver = DependencyResolver::new(&host, &host, Project::new(tmp.path())).unwrap();
    let err = resolver.resolve(&[]).unwrap_err();
    assert!(err.is_nothing_to_do());
}

struct CancelImmediately {
    calls: usize,
}

impl ProgressSink for CancelImmediately {
    fn on_progress(&mut self, _progress: &Progress<'_>) -> ProgressControl {
        self.calls += 1;
        ProgressControl::Cancel
    }
}

#[test]
fn cancellation_stops_expansion() {
    let tmp = harbour_project();
    let host = harbour_host();
    let resolver = DependencyResolver::new(&host, &host, Project::new(tmp.path()))
        .unwrap()
        .with_default_expanders();

    let mut sink = CancelImmediately { calls: 0 };
    let err = resolver
        .resolve_with_progress(&[ObjectId(1)], &mut sink)
        .unwrap_err();
    assert_eq!(sink.calls, 1);
    match err {
        sceneport_error::SceneportError::Resolver { kind, .. } => {
            assert_eq!(kind, ResolverErrorKind::Cancelled)
        }
        other => panic!("unexpected error {other:?}"),
    }
}
