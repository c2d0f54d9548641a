//! The exact status taxonomy of a self-describing wavelet container,
//! as a `thiserror` enum instead of a C-style status-by-value return.

use thiserror::Error;

/// Every way a call into this crate can fail, matching the container's
/// status taxonomy one-for-one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("generic error")]
    Error,
    #[error("operation not implemented")]
    NotImplemented,

    #[error("not enough memory")]
    NoEnoughMemory,

    #[error("invalid callbacks")]
    InvalidCallbacks,
    #[error("invalid input")]
    InvalidInput,
    #[error("invalid settings")]
    InvalidSettings,
    #[error("invalid tiles dimension")]
    InvalidTilesDimension,
    #[error("invalid dimensions")]
    InvalidDimensions,
    #[error("invalid channels count")]
    InvalidChannelsNo,
    #[error("invalid depth")]
    InvalidDepth,

    #[error("truncated image head")]
    TruncatedImageHead,
    #[error("truncated tile head")]
    TruncatedTileHead,
    #[error("truncated tile data")]
    TruncatedTileData,
    #[error("not a valid container file")]
    NotAnAkoFile,
    #[error("invalid color tag")]
    InvalidColor,
    #[error("invalid wavelet tag")]
    InvalidWavelet,
    #[error("invalid wrap tag")]
    InvalidWrap,
    #[error("invalid compression tag")]
    InvalidCompression,
    #[error("invalid tile head")]
    InvalidTileHead,
}

pub type Result<T> = std::result::Result<T, CodecError>;
