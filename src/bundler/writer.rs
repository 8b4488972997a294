//! Pluggable output writer strategy.
//!
//! The orchestrator persists bundles through the [`OutputWriter`] trait so a
//! caller can substitute a different encoding without touching the build
//! sequencing. [`PlainBundleWriter`] is the default implementation: plain
//! bundle text plus an optional standalone source map.

use super::Reporter;
use super::options::RequestOptions;
use crate::cli::BundleArgs;
use crate::engine::Session;
use crate::error::Result;

/// Encoded bundle artifact.
///
/// Produced by [`OutputWriter::build`] and consumed only by the same
/// writer's [`OutputWriter::save`]; the orchestrator never inspects it.
#[derive(Debug, Clone)]
pub struct BundleArtifact {
    code: String,
    map: Option<String>,
}

impl BundleArtifact {
    /// Creates an artifact from bundle text and an optional source map.
    pub fn new(code: String, map: Option<String>) -> Self {
        Self { code, map }
    }

    /// Bundle source text.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Source map JSON, if one was generated.
    pub fn map(&self) -> Option<&str> {
        self.map.as_deref()
    }
}

/// Output writer strategy: encode a bundle from an open session, then
/// persist it.
#[allow(async_fn_in_trait)]
pub trait OutputWriter {
    /// Builds a bundle artifact from the session and request options.
    async fn build<S: Session>(
        &self,
        session: &S,
        options: &RequestOptions,
    ) -> Result<BundleArtifact>;

    /// Persists the artifact; final file naming comes from the original CLI
    /// arguments, informational messages go to the reporter.
    async fn save<R: Reporter>(
        &self,
        artifact: BundleArtifact,
        args: &BundleArgs,
        reporter: &R,
    ) -> Result<()>;
}

/// Default writer: plain bundle text and a standalone source map file.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainBundleWriter;

impl OutputWriter for PlainBundleWriter {
    async fn build<S: Session>(
        &self,
        session: &S,
        options: &RequestOptions,
    ) -> Result<BundleArtifact> {
        let output = session.build(options).await?;
        Ok(BundleArtifact::new(output.code, output.map))
    }

    async fn save<R: Reporter>(
        &self,
        artifact: BundleArtifact,
        args: &BundleArgs,
        reporter: &R,
    ) -> Result<()> {
        reporter.info(&format!(
            "Writing bundle output to: {}",
            args.bundle_output.display()
        ));
        tokio::fs::write(&args.bundle_output, artifact.code()).await?;
        reporter.info("Done writing bundle output");

        if let (Some(map), Some(map_path)) = (artifact.map(), args.sourcemap_output.as_deref()) {
            reporter.info(&format!(
                "Writing sourcemap output to: {}",
                map_path.display()
            ));
            super::utils::fs::ensure_parent_dir(map_path).await?;
            tokio::fs::write(map_path, map).await?;
            reporter.info("Done writing sourcemap output");
        }

        Ok(())
    }
}
