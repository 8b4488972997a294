//! Project configuration loading and resolution.
//!
//! Reads the optional `metropack.toml` project file, fills in defaults, and
//! produces the read-only [`ResolvedConfig`] shared by every bundle build
//! issued from one config load.

use crate::error::Result;
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default project configuration file name, looked up under the project root.
pub const DEFAULT_CONFIG_FILE: &str = "metropack.toml";

const DEFAULT_PLATFORMS: &[&str] = &["ios", "android"];

const DEFAULT_ASSET_EXTS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "ttf", "otf", "mp3", "mp4", "wav",
];

/// Raw on-disk configuration ([`DEFAULT_CONFIG_FILE`]).
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    resolver: Option<RawResolver>,
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawResolver {
    platforms: Option<Vec<String>>,
    asset_exts: Option<Vec<String>>,
}

/// Resolver section of the resolved configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Ordered list of platform identifiers the project supports.
    pub platforms: Vec<String>,

    /// File extensions treated as assets during extraction.
    pub asset_exts: Vec<String>,
}

/// Fully processed project configuration.
///
/// Read-only once loaded; shared (via `Arc`) across concurrent bundle builds
/// when several platforms are bundled from one config load.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute project root.
    pub root: PathBuf,

    /// Resolver settings (supported platforms, asset extensions).
    pub resolver: ResolverConfig,

    /// Engine cache directory.
    pub cache_dir: PathBuf,

    /// Worker count for engine transforms.
    pub max_workers: usize,

    /// Whether the engine cache should be cleared at session open.
    pub reset_cache: bool,
}

/// CLI-side overrides applied while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Override for the worker count; defaults to the logical CPU count.
    pub max_workers: Option<usize>,

    /// Clear the engine cache before the first session is opened.
    pub reset_cache: bool,

    /// Explicit config file path; defaults to `metropack.toml` under `root`.
    pub config_path: Option<PathBuf>,
}

/// Loads and resolves the project configuration.
///
/// An explicit `config_path` must exist; the default `metropack.toml` is
/// optional and absence falls back to built-in defaults.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed, or the
/// project root cannot be absolutized.
pub async fn load(root: &Path, options: LoadOptions) -> Result<ResolvedConfig> {
    let root = root.absolutize()?.into_owned();

    let raw = match config_file_path(&root, options.config_path.as_deref()) {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            let contents = tokio::fs::read_to_string(&path).await?;
            toml::from_str::<RawConfig>(&contents)?
        }
        None => {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            RawConfig::default()
        }
    };

    let resolver = raw.resolver.unwrap_or_default();
    let cache_dir = raw.cache_dir.unwrap_or_else(default_cache_dir);

    Ok(ResolvedConfig {
        root,
        resolver: ResolverConfig {
            platforms: resolver
                .platforms
                .unwrap_or_else(|| to_strings(DEFAULT_PLATFORMS)),
            asset_exts: resolver
                .asset_exts
                .unwrap_or_else(|| to_strings(DEFAULT_ASSET_EXTS)),
        },
        cache_dir,
        max_workers: options.max_workers.unwrap_or_else(num_cpus::get),
        reset_cache: options.reset_cache,
    })
}

fn config_file_path(root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = root.join(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("metropack")
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_apply_without_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load(dir.path(), LoadOptions::default())
            .await
            .expect("load");

        assert_eq!(config.resolver.platforms, vec!["ios", "android"]);
        assert!(config.resolver.asset_exts.iter().any(|e| e == "png"));
        assert!(config.max_workers >= 1);
        assert!(!config.reset_cache);
    }

    #[tokio::test]
    async fn config_file_overrides_platforms() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[resolver]\nplatforms = [\"ios\", \"android\", \"visionos\"]\n",
        )
        .expect("write config");

        let config = load(dir.path(), LoadOptions::default())
            .await
            .expect("load");

        assert_eq!(config.resolver.platforms, vec!["ios", "android", "visionos"]);
        // Unset sections keep their defaults
        assert!(config.resolver.asset_exts.iter().any(|e| e == "ttf"));
    }

    #[tokio::test]
    async fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = LoadOptions {
            config_path: Some(dir.path().join("nope.toml")),
            ..Default::default()
        };

        assert!(load(dir.path(), options).await.is_err());
    }

    #[tokio::test]
    async fn cli_overrides_take_effect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = LoadOptions {
            max_workers: Some(3),
            reset_cache: true,
            config_path: None,
        };

        let config = load(dir.path(), options).await.expect("load");
        assert_eq!(config.max_workers, 3);
        assert!(config.reset_cache);
    }
}
