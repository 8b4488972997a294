//! Request and bundle option derivation.
//!
//! [`RequestOptions`] is a pure projection of the CLI arguments plus derived
//! defaults; [`BundleOptions`] merges the engine-default bundle options with
//! a request for the asset-fetch step.

use crate::cli::BundleArgs;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Experimental transform profile forwarded to the engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransformProfile {
    /// Standard JavaScriptCore-targeted output.
    #[default]
    Default,

    /// Stable Hermes bytecode-oriented output.
    HermesStable,

    /// Canary Hermes bytecode-oriented output.
    HermesCanary,
}

/// Build mode derived from the `--dev` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Derives the mode from the `dev` flag.
    pub fn from_dev(dev: bool) -> Self {
        if dev {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Environment-variable form of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Exports the build mode to the process environment (`NODE_ENV`) for
/// downstream tooling spawned from this process.
///
/// Process-wide and never reverted; concurrent builds with differing modes
/// race on this flag and the last writer wins for the rest of the process.
pub fn set_process_build_mode(mode: BuildMode) {
    // SAFETY: mutating the environment races against concurrent readers on
    // other threads; this flag is written once per build before any engine
    // work is spawned.
    unsafe { std::env::set_var("NODE_ENV", mode.as_str()) };
}

/// Normalized request descriptor for one bundle build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Bundle entry point.
    pub entry_file: PathBuf,

    /// URL embedded in the bundle's sourceMappingURL comment.
    pub source_map_url: Option<String>,

    /// Development build.
    pub dev: bool,

    /// Minified output; defaults to the negation of `dev`.
    pub minify: bool,

    /// Requested (already validated) platform.
    pub platform: String,

    /// Transform profile passthrough.
    pub transform_profile: TransformProfile,
}

impl RequestOptions {
    /// Derives request options from CLI arguments.
    ///
    /// Pure: no side effects and no failure modes; assumes the platform was
    /// already validated.
    pub fn from_args(args: &BundleArgs) -> Self {
        Self {
            entry_file: args.entry_file.clone(),
            source_map_url: args
                .sourcemap_output
                .as_deref()
                .map(|path| source_map_url(path, args.sourcemap_use_absolute_path)),
            dev: args.dev,
            minify: args.minify.unwrap_or(!args.dev),
            platform: args.platform.clone(),
            transform_profile: args.unstable_transform_profile,
        }
    }
}

/// The map is served next to the bundle, so the URL is the bare file name
/// unless the caller explicitly asked for the absolute path.
fn source_map_url(path: &Path, use_absolute_path: bool) -> String {
    if use_absolute_path {
        return path.display().to_string();
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Fixed bundle-type discriminator attached to asset requests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BundleType {
    #[default]
    Bundle,
}

/// Engine bundle options: defaults merged with a request.
///
/// Used for the asset-fetch step only; intentionally recomputed from the
/// engine defaults rather than reusing the exact options the build step saw,
/// so engine-level defaults absent from [`RequestOptions`] still apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOptions {
    pub entry_file: PathBuf,
    pub platform: String,
    pub dev: bool,
    pub minify: bool,
    pub source_map_url: Option<String>,
    pub transform_profile: TransformProfile,

    /// Whether the entry module is executed after requiring.
    pub run_module: bool,

    /// Whether the source map is inlined into the bundle.
    pub inline_source_map: bool,

    /// Request discriminator.
    pub bundle_type: BundleType,
}

impl Default for BundleOptions {
    /// Engine-default bundle options.
    fn default() -> Self {
        Self {
            entry_file: PathBuf::new(),
            platform: String::new(),
            dev: true,
            minify: false,
            source_map_url: None,
            transform_profile: TransformProfile::default(),
            run_module: true,
            inline_source_map: false,
            bundle_type: BundleType::Bundle,
        }
    }
}

impl BundleOptions {
    /// Overlays a request onto the engine defaults; request fields win,
    /// engine-only fields keep their defaults, and the bundle type is pinned
    /// to [`BundleType::Bundle`].
    pub fn for_request(request: &RequestOptions) -> Self {
        Self {
            entry_file: request.entry_file.clone(),
            platform: request.platform.clone(),
            dev: request.dev,
            minify: request.minify,
            source_map_url: request.source_map_url.clone(),
            transform_profile: request.transform_profile,
            bundle_type: BundleType::Bundle,
            ..Self::default()
        }
    }
}
