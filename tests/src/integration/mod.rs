//! # Integration Tests
//!
//! - `discovery_flows`: the discovery request handler's use of the gate

pub mod discovery_flows;
