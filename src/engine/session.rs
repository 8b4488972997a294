//! Default engine implementation.
//!
//! [`PackSession`] is deliberately thin: it wraps the resolved configuration
//! plus an on-disk cache directory, emits bundle text with a build-mode
//! prelude, and discovers platform assets next to the entry point. Module
//! resolution and transformation live behind this seam and are out of scope
//! here.

use super::{BundleOutput, Engine, Session};
use crate::bundler::assets::AssetDescriptor;
use crate::bundler::options::{BundleOptions, RequestOptions};
use crate::bundler::utils::fs as fs_utils;
use crate::config::ResolvedConfig;
use crate::error::{BundlerError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Default engine factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackEngine;

/// Default engine session.
#[derive(Debug)]
pub struct PackSession {
    config: Arc<ResolvedConfig>,
}

impl Engine for PackEngine {
    type Session = PackSession;

    async fn open(&self, config: Arc<ResolvedConfig>) -> Result<PackSession> {
        if config.reset_cache {
            log::info!("Resetting engine cache at {}", config.cache_dir.display());
            fs_utils::remove_dir_all(&config.cache_dir).await?;
        }
        fs_utils::ensure_dir_all(&config.cache_dir).await?;
        log::debug!("Engine session opened with {} workers", config.max_workers);

        Ok(PackSession { config })
    }
}

impl PackSession {
    /// Resolves a possibly root-relative path against the project root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config.root.join(path)
        }
    }
}

impl Session for PackSession {
    async fn build(&self, options: &RequestOptions) -> Result<BundleOutput> {
        let entry = self.resolve(&options.entry_file);
        let source = tokio::fs::read_to_string(&entry).await?;

        let mut code = format!("var __DEV__ = {};\n{}", options.dev, source);
        let map = match &options.source_map_url {
            Some(url) => {
                if !code.ends_with('\n') {
                    code.push('\n');
                }
                code.push_str(&format!("//# sourceMappingURL={url}\n"));
                Some(source_map_json(&entry))
            }
            None => None,
        };

        Ok(BundleOutput { code, map })
    }

    async fn get_assets(&self, options: &BundleOptions) -> Result<Vec<AssetDescriptor>> {
        let scan_root = match self.resolve(&options.entry_file).parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.config.root.clone(),
        };
        let platform = options.platform.clone();
        let platforms = self.config.resolver.platforms.clone();
        let asset_exts = self.config.resolver.asset_exts.clone();

        // Blocking directory walk, offloaded like other long-running fs work
        tokio::task::spawn_blocking(move || {
            collect_assets(&scan_root, &platform, &platforms, &asset_exts)
        })
        .await
        .map_err(|e| BundlerError::Engine(format!("asset scan task panicked: {e}")))?
    }

    async fn close(self) -> Result<()> {
        log::debug!("Engine session closed");
        Ok(())
    }
}

fn source_map_json(entry: &Path) -> String {
    serde_json::json!({
        "version": 3,
        "sources": [entry.display().to_string()],
        "names": [],
        "mappings": "",
    })
    .to_string()
}

/// Walks the entry point's directory and groups asset files, preferring a
/// platform-suffixed variant (`logo.ios.png`) over the generic file for the
/// requested platform and skipping variants of other platforms.
fn collect_assets(
    root: &Path,
    platform: &str,
    platforms: &[String],
    asset_exts: &[String],
) -> Result<Vec<AssetDescriptor>> {
    // key: (relative dir, base name, ext); value: (is platform variant, file)
    let mut chosen: HashMap<(PathBuf, String, String), (bool, PathBuf)> = HashMap::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| BundlerError::Engine(format!("asset scan failed: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if !asset_exts.iter().any(|e| e == &ext) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let (base, variant) = split_platform_suffix(stem, platforms);
        let specific = match variant {
            Some(v) if v == platform => true,
            // Variant for a different platform
            Some(_) => continue,
            None => false,
        };

        let local_dir = path
            .parent()
            .and_then(|p| p.strip_prefix(root).ok())
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        let key = (local_dir, base.to_string(), ext.clone());

        match chosen.get(&key) {
            // Keep an already-chosen platform variant over a generic file
            Some((true, _)) if !specific => {}
            _ => {
                chosen.insert(key, (specific, path.to_path_buf()));
            }
        }
    }

    let mut assets: Vec<AssetDescriptor> = chosen
        .into_iter()
        .map(|((local_dir, name, ext), (_, file))| AssetDescriptor {
            name,
            ext,
            files: vec![file],
            local_dir,
        })
        .collect();
    assets.sort_by(|a, b| {
        (&a.local_dir, &a.name, &a.ext).cmp(&(&b.local_dir, &b.name, &b.ext))
    });

    Ok(assets)
}

fn split_platform_suffix<'a>(stem: &'a str, platforms: &[String]) -> (&'a str, Option<&'a str>) {
    if let Some((base, suffix)) = stem.rsplit_once('.') {
        if platforms.iter().any(|p| p == suffix) {
            return (base, Some(suffix));
        }
    }
    (stem, None)
}
