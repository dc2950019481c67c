use std::fmt;

use thiserror::Error;

use crate::{
    account::AccountError,
    codec::CodecError,
    command::CommandError,
    store::{StateStore, StoreError},
};

pub mod operation_table;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    CodecErr(#[from] CodecError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error("Entity not found: {name}")]
    NotFound { name: String },
    #[error("This account already exists: {name}")]
    AlreadyExists { name: String },
    #[error("Phone number does not match the one registered for {name}")]
    PhoneNumberMismatch { name: String },
}

/// Failure classes reported to the invocation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PrecheckFailed,
    DecodeError,
    StoreError,
    UnknownOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::CommandErr(CommandError::UnknownOperation { .. }) => {
                ErrorKind::UnknownOperation
            }
            LedgerError::CommandErr(_) | LedgerError::AccountErr(_) => ErrorKind::InvalidArgument,
            LedgerError::CodecErr(_) => ErrorKind::DecodeError,
            LedgerError::StoreErr(_) => ErrorKind::StoreError,
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            LedgerError::PhoneNumberMismatch { .. } => ErrorKind::PrecheckFailed,
        }
    }
}

/// Successful outcome of an operation, optionally carrying a payload.
pub type Payload = Option<Vec<u8>>;

pub type Handler = fn(&mut dyn StateStore, &[String]) -> Result<Payload, LedgerError>;
