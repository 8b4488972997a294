//! JS bundle build orchestration library.
//!
//! This library sequences a single bundle build: platform validation,
//! request-option derivation, bundle output through a pluggable writer,
//! asset extraction, and guaranteed engine-session teardown.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use bundler::{BundleBuild, OutputWriter, PlainBundleWriter, RequestOptions};
pub use config::ResolvedConfig;
pub use error::{BundlerError, Result};
