//! # Channel Policy Verifier
//!
//! [`ChannelVerifier`] that evaluates a signed request against a named policy
//! of the channel it targets.

use crate::config::AclConfig;
use crate::domain::{CapabilityError, SignedData};
use crate::ports::outbound::{ChannelVerifier, PolicyManagerGetter};
use std::slice;
use tracing::debug;

/// Verifies requests against `policy` in each channel's policy manager.
pub struct ChannelPolicyVerifier<G> {
    managers: G,
    policy: String,
}

impl<G: PolicyManagerGetter> ChannelPolicyVerifier<G> {
    pub fn new(managers: G, policy: impl Into<String>) -> Self {
        Self {
            managers,
            policy: policy.into(),
        }
    }

    /// Use the policy named in `config`.
    pub fn from_config(managers: G, config: &AclConfig) -> Self {
        Self::new(managers, config.channel_policy.clone())
    }

    pub fn policy(&self) -> &str {
        &self.policy
    }
}

impl<G: PolicyManagerGetter> ChannelVerifier for ChannelPolicyVerifier<G> {
    fn verify_by_channel(
        &self,
        channel: &str,
        signed_data: &SignedData,
    ) -> Result<(), CapabilityError> {
        let manager = self.managers.manager(channel).ok_or_else(|| {
            CapabilityError::new(format!("policy manager for channel {channel} doesn't exist"))
        })?;

        let policy = manager.get_policy(&self.policy).ok_or_else(|| {
            CapabilityError::new(format!("failed obtaining channel policy {}", self.policy))
        })?;

        debug!(channel, policy = %self.policy, "[discovery-acl] Evaluating channel policy");
        policy.evaluate(slice::from_ref(signed_data))
    }
}
