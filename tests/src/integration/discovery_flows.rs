//! # Discovery Request Flows
//!
//! Drives the gate the way the discovery request handler does:
//!
//! ```text
//! request ──→ eligible_for_service ──deny──→ reject
//!                     │
//!                     ↓
//!             config_sequence (channel already vetted)
//!                     │
//!                     ↓
//!   for each (resource, principal): resolve_organization + satisfies_principal
//! ```
//!
//! The channel verifier is the real `ChannelPolicyVerifier`; everything below
//! it is mocked.

#[cfg(test)]
mod tests {
    use crate::init_test_logging;
    use qc_discovery_acl::adapters::mock::{
        MockChannelConfig, MockConfigtxValidator, MockEvaluator, MockIdentity, MockMspManager,
        MockPolicyManager, MockPolicyManagers, MockResources,
    };
    use qc_discovery_acl::{
        AclConfig, AclError, AclMetrics, CapabilityError, ChannelPolicyVerifier, DiscoveryAclApi,
        DiscoverySupport, IntegrityViolation, MspPrincipal, MspRole, MspRoleType,
        OrganizationUnit, SerializedIdentity, SignedData,
    };
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Support = DiscoverySupport<
        ChannelPolicyVerifier<MockPolicyManagers>,
        MockEvaluator,
        MockChannelConfig,
    >;

    struct Network {
        channel_policy: MockEvaluator,
        local_msp: MockEvaluator,
        channels: MockChannelConfig,
        resources: MockResources,
        msp_manager: MockMspManager,
        validator: MockConfigtxValidator,
        metrics: Arc<AclMetrics>,
        support: Support,
    }

    /// One channel, "mychannel", at config sequence 5 whose MSP manager hands
    /// out a satisfying identity.
    fn network() -> Network {
        init_test_logging();
        let config = AclConfig::default();

        let channel_policy = MockEvaluator::new();
        let manager = MockPolicyManager::new();
        manager.insert(&config.channel_policy, channel_policy.clone());
        let managers = MockPolicyManagers::new();
        managers.insert("mychannel", manager);

        let msp_manager = MockMspManager::new();
        msp_manager.returns_identity(MockIdentity::satisfying());
        let validator = MockConfigtxValidator::new(5);
        let resources = MockResources::new();
        resources.set_msp_manager(msp_manager.clone());
        resources.set_configtx_validator(validator.clone());
        let channels = MockChannelConfig::new();
        channels.insert("mychannel", resources.clone());

        let local_msp = MockEvaluator::new();
        let metrics = Arc::new(AclMetrics::new());
        let support = DiscoverySupport::new(
            ChannelPolicyVerifier::from_config(managers, &config),
            local_msp.clone(),
            channels.clone(),
        )
        .with_config(&config)
        .with_metrics(metrics.clone());

        Network {
            channel_policy,
            local_msp,
            channels,
            resources,
            msp_manager,
            validator,
            metrics,
            support,
        }
    }

    fn request() -> SignedData {
        SignedData::new(
            b"discovery query".to_vec(),
            b"peer0.org1".to_vec(),
            b"signature".to_vec(),
        )
    }

    fn principals() -> Vec<MspPrincipal> {
        vec![
            MspPrincipal::role(&MspRole {
                msp_identifier: "Org1MSP".to_string(),
                role: MspRoleType::Peer,
            })
            .unwrap(),
            MspPrincipal::identity(&SerializedIdentity {
                mspid: "Org2MSP".to_string(),
                id_bytes: b"cert".to_vec(),
            })
            .unwrap(),
            MspPrincipal::organization_unit(&OrganizationUnit {
                msp_identifier: "Org3MSP".to_string(),
                organizational_unit_identifier: "peers".to_string(),
                certifiers_identifier: Vec::new(),
            })
            .unwrap(),
        ]
    }

    /// What the request handler does once a request is eligible.
    fn authorized_orgs(support: &Support, channel: &str, identity: &[u8]) -> Vec<String> {
        principals()
            .iter()
            .filter(|p| support.satisfies_principal(channel, identity, p).is_ok())
            .map(|p| support.resolve_organization(Some(p)))
            .collect()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_channel_query_happy_path() {
        let net = network();

        net.support
            .eligible_for_service("mychannel", &request())
            .unwrap();
        assert_eq!(net.support.config_sequence("mychannel"), Ok(5));
        assert_eq!(
            authorized_orgs(&net.support, "mychannel", b"peer0.org1"),
            vec!["Org1MSP", "Org2MSP", "Org3MSP"]
        );

        assert_eq!(net.channel_policy.last_signature_set(), Some(vec![request()]));
        assert_eq!(net.local_msp.call_count(), 0);
    }

    #[test]
    fn test_local_query_never_touches_channels() {
        let net = network();

        net.support.eligible_for_service("", &request()).unwrap();
        assert_eq!(net.support.config_sequence(""), Ok(0));

        assert_eq!(net.local_msp.call_count(), 1);
        assert_eq!(net.channel_policy.call_count(), 0);
        assert_eq!(net.channels.call_count(), 0);
    }

    #[test]
    fn test_unknown_channel_is_denied_not_local() {
        let net = network();

        let err = net
            .support
            .eligible_for_service("otherchannel", &request())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "policy manager for channel otherchannel doesn't exist"
        );
        assert_eq!(net.local_msp.call_count(), 0);

        let err = net
            .support
            .satisfies_principal("otherchannel", b"peer0.org1", &principals()[0])
            .unwrap_err();
        assert_eq!(
            err,
            AclError::ChannelNotFound {
                channel: "otherchannel".to_string()
            }
        );

        assert_eq!(
            net.support.config_sequence("otherchannel"),
            Err(IntegrityViolation::ChannelResourcesMissing {
                channel: "otherchannel".to_string()
            })
        );
    }

    #[test]
    fn test_policy_rejection_is_verbatim() {
        let net = network();
        net.channel_policy.returns_on_next(Err(CapabilityError::new(
            "signature set did not satisfy policy /Channel/Application/Writers",
        )));

        let err = net
            .support
            .eligible_for_service("mychannel", &request())
            .unwrap_err();
        assert!(err.is_denial());
        assert_eq!(
            err.to_string(),
            "signature set did not satisfy policy /Channel/Application/Writers"
        );

        // Delegate state changes are visible on the very next call
        assert!(net
            .support
            .eligible_for_service("mychannel", &request())
            .is_ok());
    }

    #[test]
    fn test_config_update_is_picked_up() {
        let net = network();
        assert_eq!(
            authorized_orgs(&net.support, "mychannel", b"peer0.org1").len(),
            3
        );

        net.validator.set_sequence(6);
        net.msp_manager
            .returns_identity(MockIdentity::rejecting("identity expired"));

        assert_eq!(net.support.config_sequence("mychannel"), Ok(6));
        assert!(authorized_orgs(&net.support, "mychannel", b"peer0.org1").is_empty());
        assert_eq!(net.msp_manager.call_count(), 6);
    }

    #[test]
    fn test_channel_losing_msp_manager() {
        let net = network();
        net.resources.clear_msp_manager();

        let err = net
            .support
            .satisfies_principal("mychannel", b"peer0.org1", &principals()[0])
            .unwrap_err();
        assert!(err.to_string().contains("MSP manager"));

        // The channel itself still exists and still has a sequence
        assert_eq!(net.support.config_sequence("mychannel"), Ok(5));
    }

    #[test]
    fn test_corrupted_principal_degrades() {
        let net = network();
        let mut principal = principals().remove(0);
        principal.principal.extend_from_slice(&[1, 2, 3]);

        assert_eq!(net.support.resolve_organization(Some(&principal)), "");
        assert_eq!(net.metrics.snapshot().principals_unresolved, 1);
    }

    #[test]
    fn test_removed_channel() {
        let net = network();
        net.channels.remove("mychannel");

        assert!(net.support.channel_resources("mychannel").is_none());
        assert!(net.support.config_sequence("mychannel").is_err());
        assert_eq!(net.metrics.snapshot().integrity_violations, 1);
    }
}
