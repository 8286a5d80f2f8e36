//! Discovery ACL configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use qc_discovery_acl::AclConfig;
//!
//! let config = AclConfig::from_env().validated()?;
//! let verifier = ChannelPolicyVerifier::from_config(policy_managers, &config);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Policy evaluated for channel-scoped discovery requests by default.
pub const DEFAULT_CHANNEL_POLICY: &str = "/Channel/Application/Writers";

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("channel policy name cannot be empty")]
    EmptyChannelPolicy,

    #[error("channel policy name must be absolute: {0}")]
    RelativeChannelPolicy(String),
}

/// Discovery ACL configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Fully qualified policy the channel verifier evaluates
    pub channel_policy: String,
    /// Log undecodable principals at `warn` instead of `debug`
    pub warn_on_unresolved_principal: bool,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            channel_policy: DEFAULT_CHANNEL_POLICY.to_string(),
            warn_on_unresolved_principal: true,
        }
    }
}

impl AclConfig {
    /// Create configuration from environment variables.
    ///
    /// - `QC_DISCOVERY_CHANNEL_POLICY`: policy name (default: /Channel/Application/Writers)
    /// - `QC_DISCOVERY_WARN_UNRESOLVED`: warn on undecodable principals (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            channel_policy: env::var("QC_DISCOVERY_CHANNEL_POLICY")
                .unwrap_or(defaults.channel_policy),
            warn_on_unresolved_principal: env::var("QC_DISCOVERY_WARN_UNRESOLVED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.warn_on_unresolved_principal),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_policy.trim().is_empty() {
            return Err(ConfigError::EmptyChannelPolicy);
        }
        if !self.channel_policy.starts_with('/') {
            return Err(ConfigError::RelativeChannelPolicy(
                self.channel_policy.clone(),
            ));
        }
        Ok(())
    }

    /// Validate and return self.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn with_channel_policy(mut self, policy: impl Into<String>) -> Self {
        self.channel_policy = policy.into();
        self
    }

    pub fn with_warn_on_unresolved_principal(mut self, warn: bool) -> Self {
        self.warn_on_unresolved_principal = warn;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
