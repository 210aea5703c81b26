//! Finite field GF(2^113).
//!
//! This module exposes the field element type `GFnb113` (a
//! specialization of the backend-provided implementation) along with
//! the error type reported by the fallible operations (deserialization
//! and the general quadratic equation solver).

pub use crate::backend::GFnb113;

/// Error type for fallible field operations.
///
/// Field arithmetic itself is infallible; errors can occur only at the
/// serialization boundary and in the general quadratic equation solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// An encoded element has one of its 15 reserved high bits set.
    InvalidElement,

    /// An encoded element does not have the expected length of exactly
    /// 15 bytes.
    LengthMismatch,

    /// The destination buffer is too small to receive the 15-byte
    /// encoding of an element.
    BufferTooSmall,

    /// A parameter value is out of the allowed domain (e.g. a zero
    /// leading coefficient for a quadratic equation).
    InvalidArgument,
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            FieldError::InvalidElement =>
                "encoded value is not a valid GF(2^113) element",
            FieldError::LengthMismatch =>
                "encoded element must be exactly 15 bytes",
            FieldError::BufferTooSmall =>
                "destination buffer is smaller than 15 bytes",
            FieldError::InvalidArgument =>
                "parameter is out of the allowed domain",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError { }
