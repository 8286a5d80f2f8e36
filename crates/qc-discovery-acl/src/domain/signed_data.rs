//! # Signed Data
//!
//! Input to eligibility checks. Never mutated by this crate.

use serde::{Deserialize, Serialize};

/// A payload, the signature over it and the serialized identity that signed it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedData {
    pub data: Vec<u8>,
    pub identity: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedData {
    pub fn new(data: Vec<u8>, identity: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            data,
            identity,
            signature,
        }
    }
}
