//! Integration tests for plugin loading.

mod helpers;

use std::path::Path;

use stagehand_plugin::{LifecycleStage, Phase, PluginError};

use helpers::{Fixture, loaded_paths};

#[test]
fn test_mixed_candidates_keep_only_valid_module() {
    let harness = Fixture::new()
        .plugin("c.mod", LifecycleStage::DoPrint, Phase::Before, "F")
        .into_loader();

    let plugins = harness.loader.load(["a.mod", "b.txt", "c.mod"]);

    assert_eq!(loaded_paths(&plugins), vec!["c.mod"]);
    let descriptor = plugins.iter().next().unwrap().descriptor();
    assert_eq!(descriptor.stage, LifecycleStage::DoPrint);
    assert_eq!(descriptor.phase, Phase::Before);
    assert_eq!(descriptor.entry_point, "F");
}

#[test]
fn test_non_module_extensions_are_never_opened() {
    let harness = Fixture::new()
        .plugin("notes.txt", LifecycleStage::GetTime, Phase::Before, "F")
        .plugin("lib.mod", LifecycleStage::GetTime, Phase::Before, "G")
        .into_loader();

    let plugins = harness
        .loader
        .load(["notes.txt", "README", "", "dir/", "lib.mod"]);

    assert_eq!(loaded_paths(&plugins), vec!["lib.mod"]);
    assert_eq!(harness.opened(), vec!["lib.mod"]);
}

#[test]
fn test_every_failure_step_is_skipped() {
    let harness = Fixture::new()
        .without_descriptor("no_descriptor.mod")
        .malformed("malformed.mod")
        .plugin("good.mod", LifecycleStage::PrintItem, Phase::After, "run")
        .into_loader();

    let plugins = harness.loader.load([
        "corrupt.mod",
        "no_descriptor.mod",
        "malformed.mod",
        "good.mod",
    ]);

    assert_eq!(loaded_paths(&plugins), vec!["good.mod"]);
    assert_eq!(
        harness.opened(),
        vec!["corrupt.mod", "no_descriptor.mod", "malformed.mod", "good.mod"]
    );
}

#[test]
fn test_load_one_reports_failing_step() {
    let harness = Fixture::new()
        .without_descriptor("no_descriptor.mod")
        .malformed("malformed.mod")
        .into_loader();

    let err = harness.loader.load_one(Path::new("corrupt.mod")).unwrap_err();
    assert!(matches!(err, PluginError::Load(_)));
    assert_eq!(err.step(), "open");

    let err = harness
        .loader
        .load_one(Path::new("no_descriptor.mod"))
        .unwrap_err();
    assert!(matches!(err, PluginError::MetadataMissing { .. }));
    assert_eq!(err.step(), "descriptor_lookup");

    let err = harness.loader.load_one(Path::new("malformed.mod")).unwrap_err();
    assert!(matches!(err, PluginError::MetadataShape(_)));
    assert_eq!(err.step(), "descriptor_decode");
}

#[test]
fn test_survivors_keep_input_order() {
    let harness = Fixture::new()
        .plugin("z.mod", LifecycleStage::GetTime, Phase::Before, "z")
        .plugin("m.mod", LifecycleStage::DoPrint, Phase::After, "m")
        .plugin("a.mod", LifecycleStage::GetTime, Phase::Before, "a")
        .malformed("bad.mod")
        .into_loader();

    let plugins = harness
        .loader
        .load(["z.mod", "bad.mod", "m.mod", "missing.mod", "a.mod"]);

    assert_eq!(loaded_paths(&plugins), vec!["z.mod", "m.mod", "a.mod"]);
}

#[test]
fn test_same_module_listed_twice_loads_once() {
    let harness = Fixture::new()
        .plugin("twice.mod", LifecycleStage::GetTime, Phase::Before, "run")
        .plugin("other.mod", LifecycleStage::GetTime, Phase::Before, "other")
        .into_loader();

    let plugins = harness
        .loader
        .load(["twice.mod", "other.mod", "twice.mod"]);

    assert_eq!(loaded_paths(&plugins), vec!["twice.mod", "other.mod"]);
    assert_eq!(harness.opened(), vec!["twice.mod", "other.mod"]);
}

#[test]
fn test_empty_input_yields_empty_set() {
    let harness = Fixture::new().into_loader();
    let plugins = harness.loader.load(Vec::<String>::new());
    assert!(plugins.is_empty());
    assert!(harness.opened().is_empty());
}

#[test]
fn test_dynamic_loader_skips_garbage_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let ext = std::env::consts::DLL_EXTENSION;
    std::fs::create_dir_all(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join(format!("empty.{ext}")), b"").unwrap();
    std::fs::write(
        dir.path().join(format!("nested/garbage.{ext}")),
        b"\x7fELF but not really",
    )
    .unwrap();
    std::fs::write(dir.path().join("readme.md"), b"# plugins").unwrap();

    let loader = stagehand_plugin::PluginLoader::new(vec![ext.to_string()]);
    let manager = stagehand_plugin::PluginManager::load_directory(&loader, dir.path());

    assert!(manager.plugins().is_empty());
}
