use multihash::Multihash;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::{Cid, DAG_CBOR_CODEC, SHA2_256_CODE};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode block: {0}")]
    Encode(String),
    #[error("failed to decode block: {0}")]
    Decode(String),
    #[error("multihash error: {0}")]
    Multihash(#[from] multihash::Error),
}

/// A block codec, identified by its multicodec code
pub trait Codec {
    const CODE: u64;

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError>;
    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DagCborCodec;

impl Codec for DagCborCodec {
    const CODE: u64 = DAG_CBOR_CODEC;

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        serde_ipld_dagcbor::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
        serde_ipld_dagcbor::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Types that can be written to and read from a block store
///  under a particular codec. Implementors opt in with an
///  empty impl block.
pub trait BlockEncoded<C: Codec>: Serialize + DeserializeOwned + Sized {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        C::encode(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        C::decode(bytes)
    }

    /// Encode and compute the CID of the resulting block
    fn to_block(&self) -> Result<(Cid, Vec<u8>), CodecError> {
        let data = self.encode()?;
        let cid = cid_for(C::CODE, &data)?;
        Ok((cid, data))
    }
}

/// Compute the CIDv1 of `data` under `codec`, hashed with sha2-256
pub fn cid_for(codec: u64, data: &[u8]) -> Result<Cid, CodecError> {
    let digest = Sha256::digest(data);
    let hash = Multihash::<64>::wrap(SHA2_256_CODE, &digest)?;
    Ok(Cid::new_v1(codec, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linked_data::RAW_CODEC;

    #[test]
    fn test_cid_for_is_deterministic() {
        let a = cid_for(RAW_CODEC, b"hello").unwrap();
        let b = cid_for(RAW_CODEC, b"hello").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.codec(), RAW_CODEC);
        assert_eq!(a.hash().code(), SHA2_256_CODE);
    }

    #[test]
    fn test_cid_for_depends_on_codec_and_data() {
        let raw = cid_for(RAW_CODEC, b"hello").unwrap();
        let cbor = cid_for(DAG_CBOR_CODEC, b"hello").unwrap();
        let other = cid_for(RAW_CODEC, b"world").unwrap();
        assert_ne!(raw, cbor);
        assert_ne!(raw, other);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<Vec<String>, _> = DagCborCodec::decode(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }
}
