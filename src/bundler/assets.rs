//! Asset extraction to the destination folders.
//!
//! Copies the assets enumerated by the engine session into the requested
//! destination, preserving the project-relative layout. Image assets can
//! additionally be emitted as an Xcode-style asset catalog for iOS-family
//! platforms.

use super::Reporter;
use crate::bundler::utils::fs as fs_utils;
use crate::error::Result;
use std::path::{Path, PathBuf};

const CATALOG_IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// One asset enumerated by the engine session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Base name without extension or platform suffix.
    pub name: String,

    /// Lower-cased file extension.
    pub ext: String,

    /// Absolute paths of the files backing this asset.
    pub files: Vec<PathBuf>,

    /// Directory of the asset relative to the scan root.
    pub local_dir: PathBuf,
}

impl AssetDescriptor {
    fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.ext)
    }

    fn is_catalog_image(&self) -> bool {
        CATALOG_IMAGE_EXTS.contains(&self.ext.as_str())
    }
}

/// Outcome of one asset-extraction run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssetSummary {
    /// Files copied to a destination.
    pub copied: usize,

    /// Assets skipped because no destination was configured.
    pub skipped: usize,
}

/// Persists the asset list to the destination folders.
///
/// Without an `assets_dest` the run warns and skips extraction instead of
/// failing. For an iOS-family platform with `asset_catalog_dest` set, image
/// assets are written as `<name>.imageset` entries with a `Contents.json`;
/// everything else lands under `assets_dest` in its project-relative
/// directory.
pub async fn save_assets<R: Reporter>(
    assets: &[AssetDescriptor],
    platform: &str,
    assets_dest: Option<&Path>,
    asset_catalog_dest: Option<&Path>,
    reporter: &R,
) -> Result<AssetSummary> {
    let Some(assets_dest) = assets_dest else {
        log::warn!("Assets destination folder is not set, skipping...");
        return Ok(AssetSummary {
            copied: 0,
            skipped: assets.len(),
        });
    };

    let catalog_dest = asset_catalog_dest.filter(|_| is_ios_family(platform));
    let mut summary = AssetSummary::default();

    for asset in assets {
        match catalog_dest {
            Some(catalog) if asset.is_catalog_image() => {
                write_image_set(asset, catalog).await?;
                summary.copied += asset.files.len();
            }
            _ => {
                let dest_dir = assets_dest.join(&asset.local_dir);
                for file in &asset.files {
                    fs_utils::copy_file(file, &dest_dir.join(asset.file_name())).await?;
                    summary.copied += 1;
                }
            }
        }
    }

    reporter.info(&format!(
        "Copied {} asset files to {}",
        summary.copied,
        assets_dest.display()
    ));
    Ok(summary)
}

fn is_ios_family(platform: &str) -> bool {
    matches!(platform, "ios" | "visionos" | "tvos")
}

/// Writes one `<name>.imageset` directory with its `Contents.json`.
async fn write_image_set(asset: &AssetDescriptor, catalog_dest: &Path) -> Result<()> {
    let set_dir = catalog_dest.join(format!("{}.imageset", asset.name));
    fs_utils::ensure_dir_all(&set_dir).await?;

    let mut images = Vec::new();
    for file in &asset.files {
        let file_name = asset.file_name();
        fs_utils::copy_file(file, &set_dir.join(&file_name)).await?;
        images.push(serde_json::json!({
            "filename": file_name,
            "idiom": "universal",
            "scale": "1x",
        }));
    }

    let contents = serde_json::json!({
        "images": images,
        "info": { "author": "metropack", "version": 1 },
    });
    tokio::fs::write(
        set_dir.join("Contents.json"),
        serde_json::to_string_pretty(&contents)?,
    )
    .await?;

    Ok(())
}
