//! Status taxonomy shared by every fallible operation in the crate.
//!
//! Success is `Ok(_)`; every failure is one of the [`StatusCode`] variants and is
//! propagated unchanged to the caller so it can branch on the exact kind.

use thiserror::Error;

/// Failure kinds reported by factories, registries and the pseudolayer index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Requested entry does not exist.
    #[error("not found")]
    NotFound,

    /// Entry already exists where a unique insertion was requested.
    #[error("already present")]
    AlreadyPresent,

    /// Generic, unspecified failure.
    #[error("failure")]
    Failure,

    /// Parameter value is outside the supported model (e.g. unknown cell geometry).
    #[error("invalid parameter")]
    InvalidParameter,

    /// Lookup matched more than one entry.
    #[error("out of range")]
    OutOfRange,

    /// Required value was never set.
    #[error("not initialized")]
    NotInitialized,
}

/// Result type for operations reporting a [`StatusCode`].
pub type StatusResult<T> = std::result::Result<T, StatusCode>;
