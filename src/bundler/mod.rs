//! Bundle build orchestration and coordination.
//!
//! This module sequences one bundle build: platform validation, request
//! option derivation, bundle output through the pluggable [`OutputWriter`],
//! asset extraction, and guaranteed engine-session teardown.
//!
//! # Module Organization
//!
//! - [`options`] - Request/bundle option derivation and build mode
//! - [`platform`] - Platform validation against the resolved config
//! - [`writer`] - Pluggable output writer strategy and the default impl
//! - [`assets`] - Asset extraction to the destination folders
//! - [`orchestrator`] - The [`BundleBuild`] sequencing and session lifecycle
//! - [`utils`] - Filesystem helpers

pub mod assets;
pub mod options;
mod orchestrator;
pub mod platform;
pub mod utils;
pub mod writer;

pub use assets::{AssetDescriptor, AssetSummary};
pub use options::{BuildMode, BundleOptions, RequestOptions, TransformProfile};
pub use orchestrator::BundleBuild;
pub use platform::{PlatformError, validate_platform};
pub use writer::{BundleArtifact, OutputWriter, PlainBundleWriter};

/// Diagnostic sink for validation errors and informational save messages.
pub trait Reporter {
    /// Reports a user-facing error diagnostic.
    fn error(&self, message: &str);

    /// Reports an informational message.
    fn info(&self, message: &str);
}

/// Default reporter backed by the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn error(&self, message: &str) {
        log::error!("{message}");
    }

    fn info(&self, message: &str) {
        log::info!("{message}");
    }
}
