//! # Channel Config Provider
//!
//! Thin seam over the injected channel lookup so higher layers depend on an
//! interface rather than a concrete lookup strategy.

use crate::domain::IntegrityViolation;
use crate::ports::outbound::{ChannelConfigGetter, ChannelResources};
use std::sync::Arc;
use tracing::error;

/// Retrieves channel resources and configuration sequences.
pub struct ChannelConfigProvider<C> {
    getter: C,
}

impl<C: ChannelConfigGetter> ChannelConfigProvider<C> {
    pub fn new(getter: C) -> Self {
        Self { getter }
    }

    /// Whatever the injected lookup returns, absent included.
    pub fn channel_resources(&self, channel: &str) -> Option<Arc<dyn ChannelResources>> {
        self.getter.get_channel_config(channel)
    }

    /// Live configuration sequence of `channel`.
    ///
    /// The empty channel has no configuration and reports `0` without a
    /// lookup. Any named channel is expected to have been vetted by the
    /// caller already, so missing resources or a missing validator are
    /// integrity violations rather than a default.
    pub fn config_sequence(&self, channel: &str) -> Result<u64, IntegrityViolation> {
        if channel.is_empty() {
            return Ok(0);
        }

        let Some(resources) = self.channel_resources(channel) else {
            error!(channel, "[discovery-acl] Failed obtaining channel config");
            return Err(IntegrityViolation::ChannelResourcesMissing {
                channel: channel.to_string(),
            });
        };

        let Some(validator) = resources.configtx_validator() else {
            error!(channel, "[discovery-acl] Config transaction validator is missing");
            return Err(IntegrityViolation::ConfigtxValidatorMissing {
                channel: channel.to_string(),
            });
        };

        Ok(validator.sequence())
    }
}
