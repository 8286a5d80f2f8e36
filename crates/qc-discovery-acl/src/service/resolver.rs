//! # Principal Resolver
//!
//! Maps an MSP principal to the organization that issued it. Resolution feeds
//! display and filtering, not authorization, so every failure degrades to the
//! empty organization.

use crate::domain::{MspPrincipal, Principal};
use tracing::{debug, warn};

/// Resolves principals to MSP identifiers. Pure; holds only a logging flag.
#[derive(Clone, Copy, Debug)]
pub struct PrincipalResolver {
    warn_on_failure: bool,
}

impl Default for PrincipalResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PrincipalResolver {
    pub fn new(warn_on_failure: bool) -> Self {
        Self { warn_on_failure }
    }

    /// Organization identifier of `principal`, or `""` when there is none.
    pub fn resolve_organization(&self, principal: Option<&MspPrincipal>) -> String {
        let Some(principal) = principal else {
            return String::new();
        };

        match Principal::decode(principal) {
            Ok(decoded) => decoded.into_msp_identifier().unwrap_or_default(),
            Err(err) => {
                if self.warn_on_failure {
                    warn!("[discovery-acl] Failed unmarshaling principal: {}", err);
                } else {
                    debug!("[discovery-acl] Failed unmarshaling principal: {}", err);
                }
                String::new()
            }
        }
    }
}
