//! # MSP Principals
//!
//! An [`MspPrincipal`] is the wire form of an access-control predicate: a
//! classification tag plus an opaque payload whose schema depends on the tag.
//! [`Principal`] is the decoded, typed view of the same thing.
//!
//! Payloads use `bincode` with trailing bytes rejected, so a payload with
//! anything appended to it fails to decode instead of silently parsing.

use crate::domain::errors::PrincipalError;
use bincode::Options;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

/// Classification tag of an [`MspPrincipal`].
///
/// Wire values: ROLE=0, ORGANIZATION_UNIT=1, IDENTITY=2, ANONYMITY=3,
/// COMBINED=4. Anything else is kept as `Unrecognized`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalClassification {
    Role,
    OrganizationUnit,
    Identity,
    Anonymity,
    Combined,
    Unrecognized(i32),
}

impl PrincipalClassification {
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Self::Role,
            1 => Self::OrganizationUnit,
            2 => Self::Identity,
            3 => Self::Anonymity,
            4 => Self::Combined,
            other => Self::Unrecognized(other),
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Self::Role => 0,
            Self::OrganizationUnit => 1,
            Self::Identity => 2,
            Self::Anonymity => 3,
            Self::Combined => 4,
            Self::Unrecognized(other) => other,
        }
    }

    /// Short name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Role => "ROLE",
            Self::OrganizationUnit => "ORGANIZATION_UNIT",
            Self::Identity => "IDENTITY",
            Self::Anonymity => "ANONYMITY",
            Self::Combined => "COMBINED",
            Self::Unrecognized(_) => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for PrincipalClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(value) => write!(f, "UNRECOGNIZED({value})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Role an identity holds inside its MSP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MspRoleType {
    #[default]
    Member,
    Admin,
    Client,
    Peer,
}

/// Payload of a ROLE principal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MspRole {
    pub msp_identifier: String,
    pub role: MspRoleType,
}

/// Payload of an IDENTITY principal; also the shape of raw identity bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIdentity {
    pub mspid: String,
    pub id_bytes: Vec<u8>,
}

/// Payload of an ORGANIZATION_UNIT principal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnit {
    pub msp_identifier: String,
    pub organizational_unit_identifier: String,
    pub certifiers_identifier: Vec<u8>,
}

/// Wire form of an access-control principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MspPrincipal {
    pub classification: PrincipalClassification,
    pub principal: Vec<u8>,
}

impl MspPrincipal {
    /// Wrap an already-encoded payload.
    pub fn new(classification: PrincipalClassification, principal: Vec<u8>) -> Self {
        Self {
            classification,
            principal,
        }
    }

    /// Build a well-formed ROLE principal.
    pub fn role(role: &MspRole) -> Result<Self, PrincipalError> {
        Ok(Self::new(PrincipalClassification::Role, encode(role)?))
    }

    /// Build a well-formed IDENTITY principal.
    pub fn identity(identity: &SerializedIdentity) -> Result<Self, PrincipalError> {
        Ok(Self::new(PrincipalClassification::Identity, encode(identity)?))
    }

    /// Build a well-formed ORGANIZATION_UNIT principal.
    pub fn organization_unit(ou: &OrganizationUnit) -> Result<Self, PrincipalError> {
        Ok(Self::new(
            PrincipalClassification::OrganizationUnit,
            encode(ou)?,
        ))
    }
}

/// Decoded view of an [`MspPrincipal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    Role(MspRole),
    Identity(SerializedIdentity),
    OrganizationUnit(OrganizationUnit),
    /// Classifications that do not name an organization (including
    /// unrecognized ones). The payload is never decoded.
    Other(PrincipalClassification),
}

impl Principal {
    /// Decode the payload according to its declared classification.
    pub fn decode(principal: &MspPrincipal) -> Result<Self, PrincipalError> {
        let classification = principal.classification;
        let bytes = principal.principal.as_slice();
        Ok(match classification {
            PrincipalClassification::Role => Principal::Role(decode(classification, bytes)?),
            PrincipalClassification::Identity => {
                Principal::Identity(decode(classification, bytes)?)
            }
            PrincipalClassification::OrganizationUnit => {
                Principal::OrganizationUnit(decode(classification, bytes)?)
            }
            other => Principal::Other(other),
        })
    }

    /// MSP that issued this principal, if the classification carries one.
    pub fn into_msp_identifier(self) -> Option<String> {
        match self {
            Principal::Role(role) => Some(role.msp_identifier),
            Principal::Identity(identity) => Some(identity.mspid),
            Principal::OrganizationUnit(ou) => Some(ou.msp_identifier),
            Principal::Other(_) => None,
        }
    }
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

/// Encode a principal payload.
pub fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, PrincipalError> {
    codec().serialize(payload).map_err(PrincipalError::Encoding)
}

fn decode<T: DeserializeOwned>(
    classification: PrincipalClassification,
    bytes: &[u8],
) -> Result<T, PrincipalError> {
    codec()
        .deserialize(bytes)
        .map_err(|source| PrincipalError::Malformed {
            classification: classification.name(),
            source,
        })
}
