//! # Domain Errors
//!
//! Two tiers are kept apart on purpose:
//! - [`AclError`]: recoverable authorization outcomes. Callers map every one
//!   of them to "deny".
//! - [`IntegrityViolation`]: a channel the caller already vetted has no
//!   configuration behind it. Callers treat it as a defect.

use thiserror::Error;

/// Opaque failure reported by an injected capability.
///
/// The reason is displayed verbatim so operators see the root cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(pub String);

impl CapabilityError {
    /// Create a capability error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// The underlying reason.
    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Recoverable authorization failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AclError {
    /// A delegate (verifier, evaluator, identity) refused the request.
    #[error(transparent)]
    Denied(#[from] CapabilityError),

    /// The channel lookup returned nothing.
    #[error("channel {channel} doesn't exist")]
    ChannelNotFound { channel: String },

    /// The channel exists but exposes no MSP manager.
    #[error("could not find MSP manager for channel {channel}")]
    MspManagerNotFound { channel: String },

    /// The raw identity bytes were rejected by the channel's MSP manager.
    #[error("failed deserializing identity: {0}")]
    IdentityDeserialization(#[source] CapabilityError),
}

impl AclError {
    /// Whether the delegate itself produced this outcome.
    pub fn is_denial(&self) -> bool {
        matches!(self, AclError::Denied(_))
    }
}

/// Fatal integrity failures raised by `config_sequence`.
///
/// Reaching one of these means the caller asked for the sequence of a channel
/// it never validated. Returning `0` instead would be indistinguishable from a
/// freshly created configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityViolation {
    #[error("failed obtaining channel config for channel {channel}")]
    ChannelResourcesMissing { channel: String },

    #[error("config transaction validator for channel {channel} is missing")]
    ConfigtxValidatorMissing { channel: String },
}

impl IntegrityViolation {
    /// Channel the violation was raised for.
    pub fn channel(&self) -> &str {
        match self {
            IntegrityViolation::ChannelResourcesMissing { channel }
            | IntegrityViolation::ConfigtxValidatorMissing { channel } => channel,
        }
    }
}

/// Principal payload codec failures.
///
/// Never escapes organization resolution; see `PrincipalResolver`.
#[derive(Debug, Error)]
pub enum PrincipalError {
    #[error("malformed {classification} principal: {source}")]
    Malformed {
        classification: &'static str,
        #[source]
        source: bincode::Error,
    },

    #[error("failed encoding principal payload: {0}")]
    Encoding(#[source] bincode::Error),
}
