//! # Domain Layer
//!
//! Principals, signed data and the error tiers. No I/O, no capabilities.

pub mod errors;
pub mod principal;
pub mod signed_data;

pub use errors::{AclError, CapabilityError, IntegrityViolation, PrincipalError};
pub use principal::{
    MspPrincipal, MspRole, MspRoleType, OrganizationUnit, Principal, PrincipalClassification,
    SerializedIdentity,
};
pub use signed_data::SignedData;
