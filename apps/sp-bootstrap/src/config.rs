//! Runtime configuration loaded from environment variables.
//!
//! Every variable has a default; a value that is present but invalid is a
//! startup error.

use saml_cot::metadata::DEFAULT_MAX_METADATA_BYTES;
use saml_cot::{ServiceProvider, DEFAULT_IDP_METADATA_DIR};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default SP entity id when `SAML_SP_ENTITY_ID` is unset
pub const DEFAULT_SP_ENTITY_ID: &str = "urn:saml-cot:sp";

/// Default log filter directive
pub const DEFAULT_LOG_FILTER: &str = "info,saml_cot=debug";

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for IdP metadata files
    pub idp_metadata_dir: PathBuf,

    /// This SP's entity id
    pub sp_entity_id: String,

    /// This SP's assertion consumer service URL
    pub sp_acs_url: Option<String>,

    /// Per-file metadata size cap in bytes
    pub max_metadata_bytes: u64,

    /// Log filter directive
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            idp_metadata_dir: PathBuf::from(DEFAULT_IDP_METADATA_DIR),
            sp_entity_id: DEFAULT_SP_ENTITY_ID.to_string(),
            sp_acs_url: None,
            max_metadata_bytes: DEFAULT_MAX_METADATA_BYTES,
            rust_log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `SAML_SP_ENTITY_ID` is set but blank
    /// - `SAML_METADATA_MAX_BYTES` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let idp_metadata_dir = lookup("SAML_IDP_METADATA_DIR")
            .filter(|s| !s.is_empty())
            .map_or(defaults.idp_metadata_dir, PathBuf::from);

        let sp_entity_id = match lookup("SAML_SP_ENTITY_ID") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "SAML_SP_ENTITY_ID".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
            Some(value) => value.trim().to_string(),
            None => defaults.sp_entity_id,
        };

        let sp_acs_url = lookup("SAML_SP_ACS_URL").filter(|s| !s.trim().is_empty());

        let max_metadata_bytes = match lookup("SAML_METADATA_MAX_BYTES") {
            Some(raw) => parse_positive("SAML_METADATA_MAX_BYTES", &raw)?,
            None => defaults.max_metadata_bytes,
        };

        let rust_log = lookup("RUST_LOG")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.rust_log);

        Ok(Self {
            idp_metadata_dir,
            sp_entity_id,
            sp_acs_url,
            max_metadata_bytes,
            rust_log,
        })
    }

    /// The SP record this configuration describes
    #[must_use]
    pub fn service_provider(&self) -> ServiceProvider {
        let sp = ServiceProvider::new(&self.sp_entity_id);
        match &self.sp_acs_url {
            Some(url) => sp.with_acs_url(url),
            None => sp,
        }
    }
}

fn parse_positive(var: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: e.to_string(),
        }),
    }
}
