//! Client configuration.
//!
//! Parsed from YAML with `serde_yml` like the service configuration.
//! Every field has a default, so an empty document is valid.

use std::path::PathBuf;
use std::time::Duration;

use eon_core::GrowthCurve;
use serde::Deserialize;

use crate::error::ClientError;

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the tracking service. `None` disables reporting.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Option<String>,

    /// File backing the local key/value storage. `None` keeps it in memory.
    #[serde(default = "default_storage_path")]
    pub storage_path: Option<PathBuf>,

    /// Curve for the local growth estimate. Should match the service.
    #[serde(default)]
    pub growth: GrowthCurve,

    /// Every n-th interaction spawns a particle.
    #[serde(default = "default_particle_every")]
    pub particle_every: u64,

    /// Per-request timeout for reports, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_path: default_storage_path(),
            growth: GrowthCurve::default(),
            particle_every: default_particle_every(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the YAML is malformed or a
    /// value is unusable.
    pub fn parse(yaml: &str) -> Result<Self, ClientError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// A configuration that neither reports nor touches the filesystem.
    pub fn offline() -> Self {
        Self {
            api_base_url: None,
            storage_path: None,
            ..Self::default()
        }
    }

    /// Check that values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), ClientError> {
        self.growth.validate().map_err(ClientError::Config)?;
        if self.particle_every == 0 {
            return Err(ClientError::Config(String::from(
                "particle_every must be at least 1",
            )));
        }
        if self.api_base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ClientError::Config(String::from(
                "api_base_url must not be blank",
            )));
        }
        Ok(())
    }

    /// Report timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

#[allow(clippy::unnecessary_wraps)]
fn default_api_base_url() -> Option<String> {
    Some(String::from("http://localhost:3001"))
}

#[allow(clippy::unnecessary_wraps)]
fn default_storage_path() -> Option<PathBuf> {
    Some(PathBuf::from("living_platform_storage.json"))
}

const fn default_particle_every() -> u64 {
    3
}

const fn default_request_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ClientConfig::parse("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.particle_every, 3);
        assert_eq!(
            config.growth,
            GrowthCurve::Linear {
                max_interactions: 50
            }
        );
    }

    #[test]
    fn null_base_url_disables_reporting() {
        let config = ClientConfig::parse("api_base_url: null\n").unwrap();
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn zero_particle_interval_is_rejected() {
        let result = ClientConfig::parse("particle_every: 0\n");
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn offline_has_no_side_effects() {
        let config = ClientConfig::offline();
        assert!(config.api_base_url.is_none());
        assert!(config.storage_path.is_none());
    }
}
