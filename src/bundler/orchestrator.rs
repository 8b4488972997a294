//! Bundle build orchestration.
//!
//! [`BundleBuild`] sequences one build: platform validation, build-mode
//! export, request-option derivation, bundle output through the writer,
//! asset extraction, and engine-session teardown. The session is released
//! exactly once on every exit path; a failure between open and close is
//! re-surfaced only after the close has completed.

use super::Reporter;
use super::assets::{self, AssetSummary};
use super::options::{self, BuildMode, BundleOptions, RequestOptions};
use super::platform::validate_platform;
use super::utils::fs as fs_utils;
use super::writer::OutputWriter;
use crate::cli::BundleArgs;
use crate::config::ResolvedConfig;
use crate::engine::{Engine, Session};
use crate::error::{BundlerError, Result};
use std::sync::Arc;

/// Orchestrator for one or more bundle builds over a shared configuration.
pub struct BundleBuild<E, W> {
    engine: E,
    writer: W,
}

impl<E: Engine, W: OutputWriter> BundleBuild<E, W> {
    /// Creates an orchestrator from an engine and an output writer.
    pub fn new(engine: E, writer: W) -> Self {
        Self { engine, writer }
    }

    /// Runs one bundle build.
    ///
    /// Steps, in order: validate the platform, export the build mode, derive
    /// request options, open an engine session, build and save the bundle,
    /// extract assets, close the session. An invalid platform fails with the
    /// fixed [`BundlerError::BuildFailed`] after emitting diagnostics, with
    /// no session opened and no files touched. Any later failure propagates
    /// unchanged after the session close. Single attempt, no retries.
    pub async fn run<R: Reporter>(
        &self,
        args: &BundleArgs,
        config: Arc<ResolvedConfig>,
        reporter: &R,
    ) -> Result<AssetSummary> {
        if let Err(e) = validate_platform(&config, &args.platform) {
            reporter.error(&format!("Invalid platform {} selected.", e.requested));
            reporter.error(&format!(
                "Available platforms are: {}. If you are trying to bundle for an \
                 out-of-tree platform, it may not be installed.",
                e.available.join(", ")
            ));
            return Err(BundlerError::BuildFailed);
        }

        options::set_process_build_mode(BuildMode::from_dev(args.dev));

        let request = RequestOptions::from_args(args);

        let session = self.engine.open(Arc::clone(&config)).await?;
        // Everything fallible after open runs scoped so the close below is
        // reached on every path; the body's error is rethrown after close.
        let result = self.build_and_save(&session, args, &request, reporter).await;
        let closed = session.close().await;

        let summary = result?;
        closed?;
        Ok(summary)
    }

    /// Steps between session open and close: bundle build, output-directory
    /// creation, save, asset fetch and extraction.
    async fn build_and_save<R: Reporter>(
        &self,
        session: &E::Session,
        args: &BundleArgs,
        request: &RequestOptions,
        reporter: &R,
    ) -> Result<AssetSummary> {
        let artifact = self.writer.build(session, request).await?;

        fs_utils::ensure_parent_dir(&args.bundle_output).await?;
        self.writer.save(artifact, args, reporter).await?;

        // Engine defaults overlaid with the request, not the exact options
        // the build step saw.
        let merged = BundleOptions::for_request(request);
        let bundle_assets = session.get_assets(&merged).await?;

        assets::save_assets(
            &bundle_assets,
            &request.platform,
            args.assets_dest.as_deref(),
            args.asset_catalog_dest.as_deref(),
            reporter,
        )
        .await
    }
}
