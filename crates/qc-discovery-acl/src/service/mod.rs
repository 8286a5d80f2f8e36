//! # Discovery Support Service
//!
//! Application service implementing [`DiscoveryAclApi`].
//!
//! ## Architecture
//!
//! The façade composes four stateless components over capabilities bound
//! once at construction:
//! - [`PrincipalResolver`]: principal → organization
//! - [`ChannelConfigProvider`]: channel resources and config sequence
//! - [`EligibilityEvaluator`]: may this signer use discovery at all
//! - [`PrincipalSatisfactionChecker`]: does this identity satisfy a principal
//!
//! Nothing is cached between calls and no locks are taken here.

pub mod channel_config;
pub mod eligibility;
pub mod resolver;
pub mod satisfaction;


pub use channel_config::ChannelConfigProvider;
pub use eligibility::EligibilityEvaluator;
pub use resolver::PrincipalResolver;
pub use satisfaction::PrincipalSatisfactionChecker;

use crate::config::AclConfig;
use crate::domain::{AclError, IntegrityViolation, MspPrincipal, SignedData};
use crate::metrics::AclMetrics;
use crate::ports::inbound::DiscoveryAclApi;
use crate::ports::outbound::{ChannelConfigGetter, ChannelResources, ChannelVerifier, Evaluator};
use std::sync::Arc;
use tracing::debug;

/// Discovery access-control façade.
pub struct DiscoverySupport<V, E, C> {
    resolver: PrincipalResolver,
    channels: Arc<ChannelConfigProvider<C>>,
    eligibility: EligibilityEvaluator<V, E>,
    satisfaction: PrincipalSatisfactionChecker<C>,
    metrics: Option<Arc<AclMetrics>>,
}

impl<V, E, C> DiscoverySupport<V, E, C>
where
    V: ChannelVerifier,
    E: Evaluator,
    C: ChannelConfigGetter,
{
    /// Bind the channel verifier, the local membership evaluator and the
    /// channel lookup for the lifetime of the service.
    pub fn new(verifier: V, evaluator: E, channel_config: C) -> Self {
        let channels = Arc::new(ChannelConfigProvider::new(channel_config));
        Self {
            resolver: PrincipalResolver::default(),
            satisfaction: PrincipalSatisfactionChecker::new(channels.clone()),
            channels,
            eligibility: EligibilityEvaluator::new(verifier, evaluator),
            metrics: None,
        }
    }

    /// Apply the logging settings of `config`.
    pub fn with_config(mut self, config: &AclConfig) -> Self {
        self.resolver = PrincipalResolver::new(config.warn_on_unresolved_principal);
        self
    }

    /// Record decisions into `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<AclMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn metrics(&self) -> Option<&AclMetrics> {
        self.metrics.as_deref()
    }
}

impl<V, E, C> DiscoveryAclApi for DiscoverySupport<V, E, C>
where
    V: ChannelVerifier,
    E: Evaluator,
    C: ChannelConfigGetter,
{
    fn resolve_organization(&self, principal: Option<&MspPrincipal>) -> String {
        let org = self.resolver.resolve_organization(principal);
        if let Some(metrics) = self.metrics() {
            metrics.record_resolution(!org.is_empty());
        }
        org
    }

    fn channel_resources(&self, channel: &str) -> Option<Arc<dyn ChannelResources>> {
        self.channels.channel_resources(channel)
    }

    fn config_sequence(&self, channel: &str) -> Result<u64, IntegrityViolation> {
        let result = self.channels.config_sequence(channel);
        if let (Err(_), Some(metrics)) = (&result, self.metrics()) {
            metrics.record_integrity_violation();
        }
        result
    }

    fn eligible_for_service(
        &self,
        channel: &str,
        signed_data: &SignedData,
    ) -> Result<(), AclError> {
        let result = self.eligibility.eligible_for_service(channel, signed_data);
        if let Err(err) = &result {
            debug!(channel, error = %err, "[discovery-acl] Request not eligible for service");
        }
        if let Some(metrics) = self.metrics() {
            metrics.record_eligibility(result.is_ok());
        }
        result
    }

    fn satisfies_principal(
        &self,
        channel: &str,
        raw_identity: &[u8],
        principal: &MspPrincipal,
    ) -> Result<(), AclError> {
        let result = self
            .satisfaction
            .satisfies_principal(channel, raw_identity, principal);
        if let Err(err) = &result {
            debug!(
                channel,
                classification = %principal.classification,
                error = %err,
                "[discovery-acl] Identity does not satisfy principal"
            );
        }
        if let Some(metrics) = self.metrics() {
            metrics.record_satisfaction(result.is_ok());
        }
        result
    }
}
