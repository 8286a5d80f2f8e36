//! # Principal Satisfaction Checker
//!
//! Decides whether a serialized identity satisfies an access-control
//! principal inside a channel's membership model. Four stages, each
//! short-circuiting with its own error:
//!
//! 1. channel exists
//! 2. channel has an MSP manager
//! 3. identity bytes deserialize
//! 4. identity satisfies the principal
//!
//! Identities are deserialized on every call so configuration updates are
//! picked up immediately.

use crate::domain::{AclError, MspPrincipal};
use crate::ports::outbound::ChannelConfigGetter;
use crate::service::channel_config::ChannelConfigProvider;
use std::sync::Arc;

pub struct PrincipalSatisfactionChecker<C> {
    channels: Arc<ChannelConfigProvider<C>>,
}

impl<C: ChannelConfigGetter> PrincipalSatisfactionChecker<C> {
    pub fn new(channels: Arc<ChannelConfigProvider<C>>) -> Self {
        Self { channels }
    }

    pub fn satisfies_principal(
        &self,
        channel: &str,
        raw_identity: &[u8],
        principal: &MspPrincipal,
    ) -> Result<(), AclError> {
        let resources =
            self.channels
                .channel_resources(channel)
                .ok_or_else(|| AclError::ChannelNotFound {
                    channel: channel.to_string(),
                })?;

        let msp_manager = resources
            .msp_manager()
            .ok_or_else(|| AclError::MspManagerNotFound {
                channel: channel.to_string(),
            })?;

        let identity = msp_manager
            .deserialize_identity(raw_identity)
            .map_err(AclError::IdentityDeserialization)?;

        identity.satisfies_principal(principal)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockChannelConfig, MockIdentity, MockMspManager, MockResources};
    use crate::domain::{CapabilityError, PrincipalClassification};

    fn any_principal() -> MspPrincipal {
        MspPrincipal::new(PrincipalClassification::Role, Vec::new())
    }

    fn checker(channels: &MockChannelConfig) -> PrincipalSatisfactionChecker<MockChannelConfig> {
        PrincipalSatisfactionChecker::new(Arc::new(ChannelConfigProvider::new(channels.clone())))
    }

    #[test]
    fn test_stages_in_order() {
        let channels = MockChannelConfig::new();
        let resources = MockResources::new();
        let manager = MockMspManager::new();
        let rejecting = MockIdentity::rejecting("does not satisfy principal");
        let satisfying = MockIdentity::satisfying();
        let checker = checker(&channels);
        let principal = any_principal();

        // Channel does not exist
        let err = checker
            .satisfies_principal("mychannel", b"id", &principal)
            .unwrap_err();
        assert_eq!(err.to_string(), "channel mychannel doesn't exist");
        assert_eq!(resources.msp_manager_calls(), 0);

        // MSP manager not available
        channels.insert("mychannel", resources.clone());
        let err = checker
            .satisfies_principal("mychannel", b"id", &principal)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not find MSP manager for channel mychannel"
        );
        assert_eq!(manager.call_count(), 0);

        // Identity cannot be deserialized
        resources.set_msp_manager(manager.clone());
        manager.returns_error("not a valid identity");
        let err = checker
            .satisfies_principal("mychannel", b"id", &principal)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed deserializing identity: not a valid identity"
        );
        assert_eq!(rejecting.call_count(), 0);

        // Identity does not satisfy principal
        manager.returns_identity(rejecting.clone());
        let err = checker
            .satisfies_principal("mychannel", b"id", &principal)
            .unwrap_err();
        assert_eq!(err.to_string(), "does not satisfy principal");
        assert_eq!(rejecting.call_count(), 1);

        // All is fine, identity is eligible
        manager.returns_identity(satisfying.clone());
        assert!(checker
            .satisfies_principal("mychannel", b"id", &principal)
            .is_ok());
        assert_eq!(satisfying.call_count(), 1);
    }

    #[test]
    fn test_identity_is_deserialized_every_call() {
        let channels = MockChannelConfig::new();
        let resources = MockResources::new();
        let manager = MockMspManager::new();
        manager.returns_identity(MockIdentity::satisfying());
        resources.set_msp_manager(manager.clone());
        channels.insert("mychannel", resources);
        let checker = checker(&channels);

        for _ in 0..3 {
            checker
                .satisfies_principal("mychannel", b"id", &any_principal())
                .unwrap();
        }
        assert_eq!(manager.call_count(), 3);
        assert_eq!(manager.last_serialized(), Some(b"id".to_vec()));
    }

    #[test]
    fn test_deserialization_error_is_source() {
        use std::error::Error;

        let channels = MockChannelConfig::new();
        let resources = MockResources::new();
        let manager = MockMspManager::new();
        manager.returns_error("bad certificate");
        resources.set_msp_manager(manager);
        channels.insert("mychannel", resources);

        let err = checker(&channels)
            .satisfies_principal("mychannel", b"id", &any_principal())
            .unwrap_err();
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source, Some(CapabilityError::new("bad certificate").to_string()));
    }
}
