//! # QC Discovery ACL
//!
//! Principal and policy authorization gate consulted by the discovery
//! service before it answers a query.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): principals, signed data, error tiers
//! - **Ports Layer** (`ports/`): `DiscoveryAclApi` (inbound) and the
//!   capabilities it consumes (outbound)
//! - **Service Layer** (`service/`): `DiscoverySupport` and its four
//!   components
//! - **Adapters Layer** (`adapters/`): `ChannelPolicyVerifier`, mocks
//!
//! ## Decisions
//!
//! | Operation | Outcome on failure |
//! |-----------|--------------------|
//! | `resolve_organization` | empty organization, never an error |
//! | `channel_resources` | `None`, straight from the lookup |
//! | `config_sequence` | `IntegrityViolation` (defect) |
//! | `eligible_for_service` | `AclError::Denied` with the delegate's reason |
//! | `satisfies_principal` | `AclError`, one variant per stage |
//!
//! "No channel" and "unknown channel" are different states: the empty
//! channel name selects the local MSP path and has sequence `0`, while an
//! unknown channel is denied (or, for `config_sequence`, a violation).
//!
//! ## Wiring
//!
//! ```ignore
//! use qc_discovery_acl::{AclConfig, ChannelPolicyVerifier, DiscoverySupport, DiscoveryAclApi};
//!
//! let config = AclConfig::from_env().validated()?;
//! let verifier = ChannelPolicyVerifier::from_config(policy_managers, &config);
//! let support = DiscoverySupport::new(verifier, local_msp_policy, channel_lookup)
//!     .with_config(&config);
//!
//! support.eligible_for_service(&channel, &signed_data)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::ChannelPolicyVerifier;
pub use config::{AclConfig, ConfigError, DEFAULT_CHANNEL_POLICY};
pub use domain::{
    AclError, CapabilityError, IntegrityViolation, MspPrincipal, MspRole, MspRoleType,
    OrganizationUnit, Principal, PrincipalClassification, PrincipalError, SerializedIdentity,
    SignedData,
};
pub use metrics::{AclMetrics, AclMetricsSnapshot};
pub use ports::{
    ChannelConfigGetter, ChannelResources, ChannelVerifier, ConfigtxValidator, DiscoveryAclApi,
    Evaluator, Identity, MspManager, PolicyManager, PolicyManagerGetter,
};
pub use service::{
    ChannelConfigProvider, DiscoverySupport, EligibilityEvaluator, PrincipalResolver,
    PrincipalSatisfactionChecker,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
