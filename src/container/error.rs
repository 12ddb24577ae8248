use thiserror::Error;

use crate::engine::CodecError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("invalid container magic")]
    InvalidMagic,

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u16),

    #[error("truncated container")]
    Truncated,

    #[error("invalid container header: {0}")]
    InvalidHeader(String),

    #[error("checksum mismatch: expected {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
