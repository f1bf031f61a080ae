use std::fs;
use std::path::Path;

use sceneport_error::{ExportErrorKind, SceneportError};
use sceneport_export::{
    ExportExecutor, ExportPlan, ExportSettings, ExportStrategy, PathReconciler,
    analyze_export_layout, broken_includes,
};
use sceneport_tracer::{
    AssetRecord, DependencyResolver, IncludeIndex, MemoryHost, MemoryObject, ObjectId, Progress,
    ProgressControl, ProgressSink, Project,
};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

/// A material whose shader pulls in one include two folders over
fn shader_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Assets/Materials/Rock.mat", "material");
    write(root, "Assets/Materials/Rock.mat.meta", "guid: mat");
    write(
        root,
        "Assets/Shaders/Rock.shader",
        "#include \"../ShaderLib/Noise.hlsl\"\n",
    );
    write(root, "Assets/ShaderLib/Noise.hlsl", "float noise;");
    write(root, "Assets/ShaderLib/Noise.hlsl.meta", "guid: noise");
    write(root, "Assets/Textures/Rock.png", "png");
    tmp
}

fn shader_host() -> MemoryHost {
    MemoryHost::new()
        .with(
            1,
            MemoryObject::new("GameObject")
                .named("Rock")
                .with_component(ObjectId(2)),
        )
        .unwrap()
        .with(
            2,
            MemoryObject::new("MeshRenderer").with_reference("m_Materials.Array.data[0]", ObjectId(10)),
        )
        .unwrap()
        .with(
            10,
            MemoryObject::asset("Material", "Assets/Materials/Rock.mat").with_shader(ObjectId(11)),
        )
        .unwrap()
        .with(11, MemoryObject::asset("Shader", "Assets/Shaders/Rock.shader"))
        .unwrap()
        .with(12, MemoryObject::asset("Texture2D", "Assets/Textures/Rock.png"))
        .unwrap()
        .with_root(1)
        .with_dependencies(
            "Assets/Materials/Rock.mat",
            ["Assets/Shaders/Rock.shader", "Assets/Textures/Rock.png"],
        )
}

#[test]
fn resolve_then_export_by_category() {
    env_logger::try_init().ok();
    let tmp = shader_project();
    let host = shader_host();
    let project = Project::new(tmp.path());
    let resolution = DependencyResolver::new(&host, &host, project.clone())
        .unwrap()
        .with_default_expanders()
        .resolve_scene()
        .unwrap();

    let out = TempDir::new().unwrap();
    let settings = ExportSettings::default();
    let reconciler = PathReconciler::new(&settings, &resolution.includes, &project);
    let plan = reconciler.plan(&resolution.records, out.path());
    let report = ExportExecutor::new().execute(&plan).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.exported, 4);
    assert_eq!(report.copied, 4);
    assert_eq!(report.sidecars, 2);

    let root = out.path();
    assert_eq!(read(&root.join("Materials/Rock.mat")), "material");
    assert_eq!(read(&root.join("Materials/Rock.mat.meta")), "guid: mat");
    assert!(root.join("Textures/Rock.png").is_file());
    assert!(root.join("Shaders/Rock.shader").is_file());
    // ../ShaderLib from Shaders/ is ShaderLib/ below the export root
    assert_eq!(read(&root.join("ShaderLib/Noise.hlsl")), "float noise;");
    assert_eq!(read(&root.join("ShaderLib/Noise.hlsl.meta")), "guid: noise");

    let layouts = analyze_export_layout(&reconciler, &resolution.includes, root);
    assert_eq!(layouts.len(), 1);
    assert!(broken_includes(&layouts).is_empty());
}

/// Water.shader -> Lib/A.hlsl -> B.hlsl, one include nested in another
fn chain_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Assets/Shaders/Water.shader", "#include \"Lib/A.hlsl\"\n");
    write(root, "Assets/Shaders/Lib/A.hlsl", "#include \"B.hlsl\"\nfloat a;");
    write(root, "Assets/Shaders/Lib/B.hlsl", "float b;");
    write(root, "Assets/Materials/Water.mat", "material");
    tmp
}

fn chain_host() -> MemoryHost {
    MemoryHost::new()
        .with(1, MemoryObject::new("GameObject").with_component(ObjectId(2)))
        .unwrap()
        .with(
            2,
            MemoryObject::new("MeshRenderer").with_reference("m_Materials.Array.data[0]", ObjectId(10)),
        )
        .unwrap()
        .with(
            10,
            MemoryObject::asset("Material", "Assets/Materials/Water.mat").with_shader(ObjectId(11)),
        )
        .unwrap()
        .with(11, MemoryObject::asset("Shader", "Assets/Shaders/Water.shader"))
        .unwrap()
        .with_root(1)
        .with_dependencies("Assets/Materials/Water.mat", ["Assets/Shaders/Water.shader"])
}

#[test]
fn nested_includes_resolve_after_export_with_every_strategy() {
    let tmp = chain_project();
    let host = chain_host();
    let project = Project::new(tmp.path());
    let resolution = DependencyResolver::new(&host, &host, project.clone())
        .unwrap()
        .with_default_expanders()
        .resolve_scene()
        .unwrap();
    assert_eq!(resolution.includes.edge_count(), 2);

    for strategy in ExportStrategy::ALL {
        let out = TempDir::new().unwrap();
        let settings = ExportSettings::default().with_strategy(strategy);
        let reconciler = PathReconciler::new(&settings, &resolution.includes, &project);
        let plan = reconciler.plan(&resolution.records, out.path());
        ExportExecutor::new().execute(&plan).unwrap();

        let a = &plan.entry("Assets/Shaders/Lib/A.hlsl").unwrap().destinations[0];
        let b = &plan.entry("Assets/Shaders/Lib/B.hlsl").unwrap().destinations[0];
        assert_eq!(a.parent(), b.parent(), "{strategy:?}");

        let layouts = analyze_export_layout(&reconciler, &resolution.includes, out.path());
        assert_eq!(layouts.len(), 2);
        assert!(broken_includes(&layouts).is_empty(), "{strategy:?}");
        for layout in &layouts {
            assert!(layout.expected.starts_with(out.path()));
            assert!(
                layout.expected.is_file(),
                "{strategy:?}: {} not exported",
                layout.expected.display()
            );
        }
    }
}

#[test]
fn export_onto_the_source_tree_leaves_sources_intact() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Assets/Sub/Tex.png", "png-bytes");
    write(tmp.path(), "Assets/Sub/Tex.png.meta", "guid: tex");
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::MirrorTree);
    let reconciler = PathReconciler::new(&settings, &includes, &project);

    let records = vec![AssetRecord::new(None, "Assets/Sub/Tex.png", "Texture2D", 9)];
    let report = ExportExecutor::new()
        .execute(&reconciler.plan(&records, tmp.path()))
        .unwrap();

    assert_eq!(report.copied, 0);
    assert_eq!(report.exported, 0);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0],
        SceneportError::Export {
            kind: ExportErrorKind::DestinationIsSource,
            ..
        }
    ));
    assert_eq!(read(&tmp.path().join("Assets/Sub/Tex.png")), "png-bytes");
    assert_eq!(read(&tmp.path().join("Assets/Sub/Tex.png.meta")), "guid: tex");
}

#[test]
fn sidecar_failure_keeps_the_copied_file_counted() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Assets/A.png", "a");
    write(tmp.path(), "Assets/A.png.meta", "guid: a");
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::Flat);
    let reconciler = PathReconciler::new(&settings, &includes, &project);

    let out = TempDir::new().unwrap();
    // A directory where the sidecar should go makes only the sidecar fail
    fs::create_dir_all(out.path().join("A.png.meta")).unwrap();

    let records = vec![AssetRecord::new(None, "Assets/A.png", "Texture2D", 1)];
    let report = ExportExecutor::new()
        .execute(&reconciler.plan(&records, out.path()))
        .unwrap();

    assert_eq!(report.copied, 1);
    assert_eq!(report.exported, 1);
    assert_eq!(report.sidecars, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].destination(),
        Some(&out.path().join("A.png.meta"))
    );
    assert_eq!(read(&out.path().join("A.png")), "a");
}

#[test]
fn mirror_tree_keeps_asset_paths() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Assets/Sub/Tex.png", "png");
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::MirrorTree);
    let reconciler = PathReconciler::new(&settings, &includes, &project);

    let out = TempDir::new().unwrap();
    let records = vec![AssetRecord::new(None, "Assets/Sub/Tex.png", "Texture2D", 3)];
    let plan = reconciler.plan(&records, out.path());
    assert_eq!(
        plan.entries[0].destinations,
        vec![out.path().join("Assets").join("Sub").join("Tex.png")]
    );

    ExportExecutor::new().execute(&plan).unwrap();
    assert!(out.path().join("Assets/Sub/Tex.png").is_file());
}

#[test]
fn terrain_goes_to_terrains_folder() {
    let tmp = TempDir::new().unwrap();
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default();
    let reconciler = PathReconciler::new(&settings, &includes, &project);
    let record = AssetRecord::new(None, "Assets/World/Island.asset", "Terrain", 0);
    assert_eq!(
        reconciler.destination_for(&record, Path::new("/export")),
        Path::new("/export").join("Terrains").join("Island.asset")
    );
}

#[test]
fn missing_sources_are_counted_and_skipped() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Assets/A.png", "a");
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::Flat);
    let reconciler = PathReconciler::new(&settings, &includes, &project);

    let records = vec![
        AssetRecord::new(None, "Assets/A.png", "Texture2D", 1),
        AssetRecord::new(None, "Assets/Gone.png", "Texture2D", 0),
    ];
    let out = TempDir::new().unwrap();
    let report = ExportExecutor::new()
        .execute(&reconciler.plan(&records, out.path()))
        .unwrap();

    assert_eq!(report.exported, 1);
    assert_eq!(report.missing, vec!["Assets/Gone.png".to_string()]);
    assert!(report.failures.is_empty());
    assert!(!out.path().join("Gone.png").exists());
}

#[test]
fn copy_failures_do_not_stop_the_batch() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Assets/A.png", "a");
    write(tmp.path(), "Assets/B.png", "b");
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::Flat);
    let reconciler = PathReconciler::new(&settings, &includes, &project);

    let out = TempDir::new().unwrap();
    // A directory where the first file should go makes its copy fail
    fs::create_dir_all(out.path().join("A.png")).unwrap();

    let records = vec![
        AssetRecord::new(None, "Assets/A.png", "Texture2D", 1),
        AssetRecord::new(None, "Assets/B.png", "Texture2D", 1),
    ];
    let report = ExportExecutor::new()
        .execute(&reconciler.plan(&records, out.path()))
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].is_export());
    assert_eq!(report.exported, 1);
    assert_eq!(read(&out.path().join("B.png")), "b");
}

#[test]
fn empty_plan_is_rejected_before_io() {
    let out = TempDir::new().unwrap();
    let root = out.path().join("never-created");
    let plan = ExportPlan::new(&root, Vec::new());
    let err = ExportExecutor::new().execute(&plan).unwrap_err();
    assert!(err.is_nothing_to_do());
    assert!(!root.exists());
}

struct StopAfter(usize);

impl ProgressSink for StopAfter {
    fn on_progress(&mut self, progress: &Progress<'_>) -> ProgressControl {
        if progress.current > self.0 {
            ProgressControl::Cancel
        } else {
            ProgressControl::Continue
        }
    }
}

#[test]
fn cancellation_keeps_earlier_copies() {
    let tmp = TempDir::new().unwrap();
    for name in ["A", "B", "C"] {
        write(tmp.path(), &format!("Assets/{name}.png"), name);
    }
    let project = Project::new(tmp.path());
    let includes = IncludeIndex::new();
    let settings = ExportSettings::default().with_strategy(ExportStrategy::Flat);
    let reconciler = PathReconciler::new(&settings, &includes, &project);
    let records: Vec<AssetRecord> = ["A", "B", "C"]
        .iter()
        .map(|name| AssetRecord::new(None, format!("Assets/{name}.png"), "Texture2D", 1))
        .collect();

    let out = TempDir::new().unwrap();
    let mut sink = StopAfter(1);
    let report = ExportExecutor::new()
        .with_progress(&mut sink)
        .execute(&reconciler.plan(&records, out.path()))
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.exported, 1);
    assert!(out.path().join("A.png").is_file());
    assert!(!out.path().join("B.png").exists());
}
