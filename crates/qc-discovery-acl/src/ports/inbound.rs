//! # Inbound Ports
//!
//! The five decisions the discovery request handler relies on. Each is
//! synchronous and re-evaluated on every call; nothing is cached.

use crate::domain::{AclError, IntegrityViolation, MspPrincipal, SignedData};
use crate::ports::outbound::ChannelResources;
use std::sync::Arc;

/// Access-control gate consulted before a discovery query is answered.
///
/// Implementations must be thread-safe (`Send + Sync`) and take no locks of
/// their own.
pub trait DiscoveryAclApi: Send + Sync {
    /// Organization that issued `principal`.
    ///
    /// Returns the empty string for an absent principal, a classification
    /// that names no organization, or a payload that fails to decode. Never
    /// fails the caller.
    fn resolve_organization(&self, principal: Option<&MspPrincipal>) -> String;

    /// Channel resources as returned by the injected lookup, absent included.
    fn channel_resources(&self, channel: &str) -> Option<Arc<dyn ChannelResources>>;

    /// Current configuration sequence of `channel`.
    ///
    /// `0` for the empty channel name. A named channel without resources or
    /// without a config transaction validator is an [`IntegrityViolation`].
    fn config_sequence(&self, channel: &str) -> Result<u64, IntegrityViolation>;

    /// Whether the signer of `signed_data` may use the discovery service.
    ///
    /// A non-empty `channel` consults the channel verifier only; an empty one
    /// consults the local membership evaluator only.
    fn eligible_for_service(&self, channel: &str, signed_data: &SignedData)
        -> Result<(), AclError>;

    /// Whether `raw_identity` satisfies `principal` within `channel`.
    fn satisfies_principal(
        &self,
        channel: &str,
        raw_identity: &[u8],
        principal: &MspPrincipal,
    ) -> Result<(), AclError>;
}
