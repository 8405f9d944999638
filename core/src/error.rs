use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Could not read from storage: {0}")]
    Read(String),
    #[error("Could not write to storage: {0}")]
    Write(String),
    #[error("Could not serialize scores: {0}")]
    Serialize(String),
}

pub type Result<T> = core::result::Result<T, StoreError>;
