//! # Outbound Ports
//!
//! Capabilities this crate consumes but does not own. Each trait has one
//! method; implementations are bound once when the façade is built and are
//! expected to be safe for unsynchronized concurrent use.

use crate::domain::{CapabilityError, MspPrincipal, SignedData};
use std::sync::Arc;

/// Verifies a signer against a channel's discovery policy.
pub trait ChannelVerifier: Send + Sync {
    fn verify_by_channel(
        &self,
        channel: &str,
        signed_data: &SignedData,
    ) -> Result<(), CapabilityError>;
}

/// Evaluates a signature set against a policy.
///
/// The local MSP membership check is one evaluator; every channel policy
/// obtained through a [`PolicyManager`] is another.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, signature_set: &[SignedData]) -> Result<(), CapabilityError>;
}

/// Looks up the resources of a channel.
pub trait ChannelConfigGetter: Send + Sync {
    /// `None` when the channel is unknown.
    fn get_channel_config(&self, channel: &str) -> Option<Arc<dyn ChannelResources>>;
}

impl<F> ChannelConfigGetter for F
where
    F: Fn(&str) -> Option<Arc<dyn ChannelResources>> + Send + Sync,
{
    fn get_channel_config(&self, channel: &str) -> Option<Arc<dyn ChannelResources>> {
        self(channel)
    }
}

/// Read-through view of a single channel's configuration.
pub trait ChannelResources: Send + Sync {
    /// MSP manager scoped to the channel's membership.
    fn msp_manager(&self) -> Option<Arc<dyn MspManager>>;

    /// Validator tracking the channel's configuration sequence.
    fn configtx_validator(&self) -> Option<Arc<dyn ConfigtxValidator>>;
}

/// Turns raw identity bytes into a channel-scoped [`Identity`].
pub trait MspManager: Send + Sync {
    fn deserialize_identity(&self, serialized: &[u8])
        -> Result<Box<dyn Identity>, CapabilityError>;
}

/// A deserialized, channel-scoped identity.
pub trait Identity: Send + Sync {
    fn satisfies_principal(&self, principal: &MspPrincipal) -> Result<(), CapabilityError>;
}

/// Reports a channel's configuration sequence at call time.
pub trait ConfigtxValidator: Send + Sync {
    fn sequence(&self) -> u64;
}

/// Looks up the policy manager of a channel.
pub trait PolicyManagerGetter: Send + Sync {
    fn manager(&self, channel: &str) -> Option<Arc<dyn PolicyManager>>;
}

/// Resolves policies by their fully qualified name.
pub trait PolicyManager: Send + Sync {
    fn get_policy(&self, name: &str) -> Option<Arc<dyn Evaluator>>;
}
