//! # Ports Layer
//!
//! - **Inbound**: the authorization API the discovery request handler calls
//! - **Outbound**: capabilities injected at construction time

pub mod inbound;
pub mod outbound;

pub use inbound::DiscoveryAclApi;
pub use outbound::{
    ChannelConfigGetter, ChannelResources, ChannelVerifier, ConfigtxValidator, Evaluator,
    Identity, MspManager, PolicyManager, PolicyManagerGetter,
};
