//! Bundling engine seam.
//!
//! The orchestrator consumes the engine through the [`Engine`] and
//! [`Session`] traits; [`PackEngine`] is the default implementation. A
//! session combines the shared [`ResolvedConfig`] with per-session state and
//! is exclusively owned by one bundle build for its whole duration.

mod session;

pub use session::{PackEngine, PackSession};

use crate::bundler::assets::AssetDescriptor;
use crate::bundler::options::{BundleOptions, RequestOptions};
use crate::config::ResolvedConfig;
use crate::error::Result;
use std::sync::Arc;

/// Bundle text plus optional source map produced by a session build.
#[derive(Debug, Clone)]
pub struct BundleOutput {
    /// Bundle source text.
    pub code: String,

    /// Source map JSON, present when the request carries a source map URL.
    pub map: Option<String>,
}

/// Factory for engine sessions.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Session type produced by [`Engine::open`].
    type Session: Session;

    /// Opens a session over a shared resolved configuration.
    ///
    /// Sessions are never shared across concurrent builds; each build opens
    /// its own and must close it exactly once.
    async fn open(&self, config: Arc<ResolvedConfig>) -> Result<Self::Session>;
}

/// One exclusively owned engine session.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Builds the bundle output for a request.
    async fn build(&self, options: &RequestOptions) -> Result<BundleOutput>;

    /// Enumerates the assets referenced for the merged bundle options.
    async fn get_assets(&self, options: &BundleOptions) -> Result<Vec<AssetDescriptor>>;

    /// Releases session resources. Consumes the session so a second close
    /// cannot compile.
    async fn close(self) -> Result<()>;
}
