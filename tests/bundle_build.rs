//! End-to-end bundle build over a temporary project.

use metropack::bundler::{BundleBuild, Reporter, TransformProfile};
use metropack::cli::BundleArgs;
use metropack::config::{self, LoadOptions};
use metropack::engine::PackEngine;
use metropack::error::BundlerError;
use metropack::{PlainBundleWriter, ResolvedConfig};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingReporter {
    errors: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
}

impl Reporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.errors.lock().expect("lock").push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.lock().expect("lock").push(message.to_string());
    }
}

/// Lays out a small project: entry file, a generic and a platform-specific
/// asset, and a config supporting ios/android.
fn write_project(root: &Path) {
    std::fs::create_dir_all(root.join("src")).expect("mkdir src");
    std::fs::write(
        root.join("src/index.js"),
        "import './logo.png';\nconsole.log('app');\n",
    )
    .expect("write entry");
    std::fs::write(root.join("src/logo.png"), b"generic-logo").expect("write asset");
    std::fs::write(root.join("src/logo.android.png"), b"android-logo").expect("write asset");
    std::fs::write(
        root.join("metropack.toml"),
        "[resolver]\nplatforms = [\"ios\", \"android\"]\n",
    )
    .expect("write config");
}

async fn load_config(root: &Path) -> ResolvedConfig {
    let mut config = config::load(root, LoadOptions::default())
        .await
        .expect("load config");
    // Keep the cache inside the temp project
    config.cache_dir = root.join(".cache");
    config
}

fn bundle_args(root: &Path, platform: &str) -> BundleArgs {
    BundleArgs {
        platform: platform.to_string(),
        entry_file: PathBuf::from("src/index.js"),
        dev: true,
        minify: None,
        sourcemap_output: Some(root.join("build/main.jsbundle.map")),
        sourcemap_use_absolute_path: false,
        bundle_output: root.join("build/main.jsbundle"),
        assets_dest: Some(root.join("build/assets")),
        asset_catalog_dest: None,
        max_workers: Some(1),
        reset_cache: false,
        config: None,
        unstable_transform_profile: TransformProfile::Default,
    }
}

#[tokio::test]
async fn bundles_write_code_map_and_assets() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let config = Arc::new(load_config(dir.path()).await);

    let build = BundleBuild::new(PackEngine, PlainBundleWriter);
    let args = bundle_args(dir.path(), "android");
    let reporter = RecordingReporter::default();

    let summary = build
        .run(&args, config, &reporter)
        .await
        .expect("bundle build succeeds");

    // Bundle text with dev prelude and map reference
    let bundle = std::fs::read_to_string(&args.bundle_output).expect("bundle exists");
    assert!(bundle.starts_with("var __DEV__ = true;\n"));
    assert!(bundle.contains("console.log('app');"));
    assert!(bundle.contains("//# sourceMappingURL=main.jsbundle.map\n"));

    // Source map is valid v3 JSON
    let map: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("build/main.jsbundle.map")).expect("map exists"),
    )
    .expect("valid json");
    assert_eq!(map["version"], 3);

    // Platform variant chosen over the generic asset
    assert_eq!(summary.copied, 1);
    let copied = std::fs::read(dir.path().join("build/assets/logo.png")).expect("asset copied");
    assert_eq!(copied, b"android-logo");

    let infos = reporter.infos.lock().expect("lock");
    assert!(infos.iter().any(|m| m.starts_with("Writing bundle output to:")));
    assert!(infos.iter().any(|m| m == "Done writing bundle output"));
}

#[tokio::test]
async fn invalid_platform_fails_without_touching_outputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let config = Arc::new(load_config(dir.path()).await);

    let build = BundleBuild::new(PackEngine, PlainBundleWriter);
    let args = bundle_args(dir.path(), "windows");
    let reporter = RecordingReporter::default();

    let err = build
        .run(&args, config, &reporter)
        .await
        .expect_err("unsupported platform");

    assert!(matches!(err, BundlerError::BuildFailed));
    assert!(!dir.path().join("build").exists());

    let errors = reporter.errors.lock().expect("lock");
    assert!(errors[0].contains("Invalid platform windows selected."));
    assert!(errors[1].contains("ios, android"));
}

#[tokio::test]
async fn minified_release_bundle_omits_map_when_not_requested() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let config = Arc::new(load_config(dir.path()).await);

    let build = BundleBuild::new(PackEngine, PlainBundleWriter);
    let mut args = bundle_args(dir.path(), "ios");
    args.dev = false;
    args.sourcemap_output = None;
    args.assets_dest = None;

    build
        .run(&args, config, &RecordingReporter::default())
        .await
        .expect("bundle build succeeds");

    let bundle = std::fs::read_to_string(&args.bundle_output).expect("bundle exists");
    assert!(bundle.starts_with("var __DEV__ = false;\n"));
    assert!(!bundle.contains("sourceMappingURL"));
    assert!(!dir.path().join("build/main.jsbundle.map").exists());
    // Assets skipped without a destination
    assert!(!dir.path().join("build/assets").exists());
}
