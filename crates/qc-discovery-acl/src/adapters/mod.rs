//! # Adapters
//!
//! - `channel_verifier`: channel verifier backed by channel policy managers
//! - `mock`: in-memory capabilities for tests and local wiring

pub mod channel_verifier;
pub mod mock;

pub use channel_verifier::ChannelPolicyVerifier;
