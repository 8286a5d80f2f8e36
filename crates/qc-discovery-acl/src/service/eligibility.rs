//! # Eligibility Evaluator
//!
//! Coarse gate deciding whether a signer may use the discovery service at
//! all. The channel name is the only dispatch key: a channel-scoped request
//! goes to the channel verifier, a channel-less one to the local membership
//! evaluator. Never both, never a fallback.

use crate::domain::{AclError, SignedData};
use crate::ports::outbound::{ChannelVerifier, Evaluator};
use std::slice;
use tracing::debug;

pub struct EligibilityEvaluator<V, E> {
    verifier: V,
    evaluator: E,
}

impl<V: ChannelVerifier, E: Evaluator> EligibilityEvaluator<V, E> {
    pub fn new(verifier: V, evaluator: E) -> Self {
        Self {
            verifier,
            evaluator,
        }
    }

    /// Delegate errors come back as [`AclError::Denied`] with the reason intact.
    pub fn eligible_for_service(
        &self,
        channel: &str,
        signed_data: &SignedData,
    ) -> Result<(), AclError> {
        if channel.is_empty() {
            debug!("[discovery-acl] Evaluating request against local MSP");
            self.evaluator.evaluate(slice::from_ref(signed_data))?;
        } else {
            debug!(channel, "[discovery-acl] Verifying request against channel policy");
            self.verifier.verify_by_channel(channel, signed_data)?;
        }
        Ok(())
    }
}
