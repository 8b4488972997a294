//! Command line interface for metropack.

mod args;

pub use args::BundleArgs;

use crate::bundler::{BundleBuild, LogReporter, PlainBundleWriter};
use crate::config::{self, LoadOptions};
use crate::engine::PackEngine;
use crate::error::Result;
use std::sync::Arc;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = BundleArgs::parse_args();

    if let Err(reason) = args.validate() {
        log::error!("Invalid arguments: {reason}");
        return Ok(1);
    }

    let root = std::env::current_dir()?;
    let config = config::load(
        &root,
        LoadOptions {
            max_workers: args.max_workers,
            reset_cache: args.reset_cache,
            config_path: args.config.clone(),
        },
    )
    .await?;

    let build = BundleBuild::new(PackEngine, PlainBundleWriter);
    match build.run(&args, Arc::new(config), &LogReporter).await {
        Ok(summary) => {
            log::debug!(
                "Bundle complete ({} asset files copied, {} skipped)",
                summary.copied,
                summary.skipped
            );
            Ok(0)
        }
        Err(e) => {
            log::error!("{e}");
            Ok(1)
        }
    }
}
