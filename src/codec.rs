use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::account::{Account, DocType, RawValue, Transaction};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode {record}: {source}")]
    Encode {
        record: &'static str,
        source: serde_json::Error,
    },
    #[error("Stored value is not a valid {record}: {source}")]
    Malformed {
        record: &'static str,
        source: serde_json::Error,
    },
    #[error("Expected a {expected:?} record, found {found:?}")]
    UnexpectedDocType { expected: DocType, found: DocType },
    #[error("Stored value `{value}` is not an integer")]
    NotAnInteger { value: String },
    #[error("Account stored under `{key}` is named `{name}`")]
    KeyMismatch { key: String, name: String },
}

/// Conversion between a record and the bytes kept in the store.
///
/// Encoding is deterministic. Decoding never fills in defaults: bytes of a
/// different record shape are an error.
pub trait Codec: Sized {
    fn encode(&self) -> Result<Vec<u8>, CodecError>;
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

fn encode_json<T: Serialize>(record: &'static str, value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|source| CodecError::Encode { record, source })
}

fn decode_json<T: DeserializeOwned>(record: &'static str, bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|source| CodecError::Malformed { record, source })
}

fn expect_doc_type(expected: DocType, found: DocType) -> Result<(), CodecError> {
    if expected == found {
        Ok(())
    } else {
        Err(CodecError::UnexpectedDocType { expected, found })
    }
}

impl Codec for Transaction {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_json("transaction", self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let tx: Transaction = decode_json("transaction", bytes)?;
        expect_doc_type(DocType::Transaction, tx.doc_type)?;
        Ok(tx)
    }
}

impl Codec for Account {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode_json("account", self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let acc: Account = decode_json("account", bytes)?;
        expect_doc_type(DocType::Customer, acc.doc_type)?;
        for tx in &acc.history {
            expect_doc_type(DocType::Transaction, tx.doc_type)?;
        }
        Ok(acc)
    }
}

impl Codec for RawValue {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.0.to_string().into_bytes())
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let text = String::from_utf8_lossy(bytes);
        text.parse()
            .map(RawValue)
            .map_err(|_| CodecError::NotAnInteger {
                value: text.into_owned(),
            })
    }
}
