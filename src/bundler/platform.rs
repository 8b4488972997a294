//! Platform validation against the resolved configuration.

use crate::config::ResolvedConfig;

/// Validation failure for an unsupported platform.
///
/// Carries both diagnostic fields so the caller can report the invalid
/// platform and the full supported list independently of the error value it
/// ultimately surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// The rejected platform.
    pub requested: String,

    /// Supported platforms, in config order.
    pub available: Vec<String>,
}

/// Checks the requested platform against the config's supported list.
///
/// Pure check: emitting diagnostics and aborting is the orchestrator's
/// responsibility. Must run before any engine session exists.
pub fn validate_platform(
    config: &ResolvedConfig,
    platform: &str,
) -> Result<(), PlatformError> {
    if config.resolver.platforms.iter().any(|p| p == platform) {
        return Ok(());
    }

    Err(PlatformError {
        requested: platform.to_string(),
        available: config.resolver.platforms.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResolvedConfig, ResolverConfig};
    use std::path::PathBuf;

    fn config(platforms: &[&str]) -> ResolvedConfig {
        ResolvedConfig {
            root: PathBuf::from("/project"),
            resolver: ResolverConfig {
                platforms: platforms.iter().map(|p| (*p).to_string()).collect(),
                asset_exts: vec!["png".to_string()],
            },
            cache_dir: PathBuf::from("/tmp/cache"),
            max_workers: 1,
            reset_cache: false,
        }
    }

    #[test]
    fn accepts_supported_platform() {
        assert!(validate_platform(&config(&["ios", "android"]), "ios").is_ok());
        assert!(validate_platform(&config(&["ios", "android"]), "android").is_ok());
    }

    #[test]
    fn rejects_unknown_platform_with_diagnostics() {
        let err = validate_platform(&config(&["ios", "android"]), "windows")
            .expect_err("windows is unsupported");

        assert_eq!(err.requested, "windows");
        assert_eq!(err.available, vec!["ios", "android"]);
    }
}
