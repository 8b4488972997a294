//! Command line argument parsing and validation.

use crate::bundler::TransformProfile;
use clap::Parser;
use std::path::PathBuf;

/// JS bundle build orchestration
#[derive(Parser, Debug, Clone)]
#[command(
    name = "metropack",
    version,
    about = "Builds a JS bundle and extracts its platform assets",
    long_about = "Builds an offline JS bundle for a platform plus the assets it references.

Validates the platform against the project config, writes the bundle (and an
optional source map) to the output path, and copies assets to the destination.

Usage:
  metropack --platform ios --entry-file index.js --bundle-output ios/main.jsbundle
  metropack --platform android --entry-file index.js --bundle-output main.bundle --dev false --assets-dest android/res

Exit code 0 = bundle and assets written to the requested paths."
)]
pub struct BundleArgs {
    /// Platform to bundle for (must be in the project's supported list)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: String,

    /// Path to the root JS file, absolute or relative to the project root
    #[arg(long, value_name = "PATH")]
    pub entry_file: PathBuf,

    /// Create a development build
    #[arg(long, value_name = "BOOL", default_value_t = true, action = clap::ArgAction::Set)]
    pub dev: bool,

    /// Minify the bundle; defaults to the opposite of --dev
    #[arg(long, value_name = "BOOL")]
    pub minify: Option<bool>,

    /// File name where to store the source map referenced by the bundle
    #[arg(long, value_name = "PATH")]
    pub sourcemap_output: Option<PathBuf>,

    /// Report SourceMapURL using its full path instead of the file name
    #[arg(long)]
    pub sourcemap_use_absolute_path: bool,

    /// File name where to store the resulting bundle
    #[arg(long, value_name = "PATH")]
    pub bundle_output: PathBuf,

    /// Directory name where to store assets referenced in the bundle
    #[arg(long, value_name = "PATH")]
    pub assets_dest: Option<PathBuf>,

    /// Directory name where to store an iOS asset catalog for image assets
    #[arg(long, value_name = "PATH")]
    pub asset_catalog_dest: Option<PathBuf>,

    /// Maximum number of engine workers
    #[arg(long, value_name = "N")]
    pub max_workers: Option<usize>,

    /// Remove cached engine files
    #[arg(long)]
    pub reset_cache: bool,

    /// Path to the project config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Experimental transform profile
    #[arg(long, value_enum, default_value = "default")]
    pub unstable_transform_profile: TransformProfile,
}

impl BundleArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    ///
    /// Platform membership is checked later against the resolved config;
    /// this only rejects arguments that are wrong on their face.
    pub fn validate(&self) -> Result<(), String> {
        if self.platform.is_empty() {
            return Err("Platform cannot be empty".to_string());
        }

        if self.entry_file.as_os_str().is_empty() {
            return Err("Entry file cannot be empty".to_string());
        }

        if self.sourcemap_use_absolute_path && self.sourcemap_output.is_none() {
            return Err(
                "--sourcemap-use-absolute-path requires --sourcemap-output".to_string(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> BundleArgs {
        BundleArgs::try_parse_from(
            std::iter::once("metropack").chain(argv.iter().copied()),
        )
        .expect("parse")
    }

    #[test]
    fn dev_defaults_to_true_and_accepts_explicit_false() {
        let args = parse(&[
            "--platform", "ios",
            "--entry-file", "index.js",
            "--bundle-output", "main.jsbundle",
        ]);
        assert!(args.dev);
        assert_eq!(args.minify, None);

        let args = parse(&[
            "--platform", "ios",
            "--entry-file", "index.js",
            "--bundle-output", "main.jsbundle",
            "--dev", "false",
            "--minify", "true",
        ]);
        assert!(!args.dev);
        assert_eq!(args.minify, Some(true));
    }

    #[test]
    fn transform_profile_parses_kebab_case() {
        let args = parse(&[
            "--platform", "android",
            "--entry-file", "index.js",
            "--bundle-output", "main.bundle",
            "--unstable-transform-profile", "hermes-stable",
        ]);
        assert_eq!(
            args.unstable_transform_profile,
            TransformProfile::HermesStable
        );
    }

    #[test]
    fn absolute_sourcemap_flag_requires_output_path() {
        let mut args = parse(&[
            "--platform", "ios",
            "--entry-file", "index.js",
            "--bundle-output", "main.jsbundle",
            "--sourcemap-use-absolute-path",
        ]);
        assert!(args.validate().is_err());

        args.sourcemap_output = Some(PathBuf::from("main.map"));
        assert!(args.validate().is_ok());
    }
}
