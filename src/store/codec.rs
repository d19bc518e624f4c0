//! Record encodings.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::StoreError;

/// How records are turned into stored bytes.
///
/// `Json` is the default and what other readers of the store expect.
/// `Bitcode` is a compact binary form for stores that only this crate reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Json,
    Bitcode,
}

impl Codec {
    pub fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, StoreError> {
        match self {
            Codec::Json => {
                serde_json::to_vec(record).map_err(|e| StoreError::Encode(e.to_string()))
            }
            Codec::Bitcode => {
                bitcode::serialize(record).map_err(|e| StoreError::Encode(e.to_string()))
            }
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, StoreError> {
        match self {
            Codec::Json => {
                serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
            }
            Codec::Bitcode => {
                bitcode::deserialize(bytes).map_err(|e| StoreError::Decode(e.to_string()))
            }
        }
    }
}
