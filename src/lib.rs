//! GFnb113 is a Rust library implementing arithmetic in the binary
//! field GF(2^113), represented with respect to a type 2 optimal normal
//! basis.
//!
//! In a normal basis, the basis vectors are `b^(2^i)` for `i` in the
//! 0 to 112 range, where `b = g + 1/g` and `g` is a primitive 227-th
//! root of unity in GF(2^226) (227 = 2*113 + 1 is prime). An element is
//! thus a vector of 113 bits. This representation makes the Frobenius
//! automorphism (squaring) a plain cyclic rotation of the coefficient
//! vector, and square root extraction the inverse rotation; both are
//! essentially free. General multiplication uses the precomputed
//! lambda-matrix of the basis, which for an optimal basis has exactly
//! two nonzero entries per row (one for the first row).
//!
//! The element type is `field::GFnb113`, with a portable 64-bit
//! implementation defined in `backend`. Supported operations are
//! addition and subtraction (both XOR; negation is the identity, since
//! the field has characteristic 2), multiplication, division, squaring,
//! square root, inversion, trace, resolution of quadratic equations,
//! and serialization to/from a 15-byte little-endian format.
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the
//! standard library; disabling default features yields a core-only
//! library in which all functionality is still available, except the
//! vector-returning quadratic equation solver, which requires the
//! `alloc` feature.
//!
//! # Conventions
//!
//! All implemented functions are constant-time in the element values,
//! unless explicitly documented otherwise. In order to avoid unwanted
//! side-channel leaks, Booleans are avoided (compilers tend to
//! "optimize" things a bit too eagerly when handling `bool` values).
//! All functions that return or use a potentially secret Boolean value
//! use the `u32` type; the convention is that 0xFFFFFFFF means "true",
//! and 0x00000000 means "false". No other value shall be used, for they
//! would lead to unpredictable results. Similarly, the `Eq` or
//! `PartialEq` traits are not implemented.
//!
//! Algebraic operations on field elements are performed with the usual
//! operators (e.g. `+`); appropriate traits are defined so that
//! structure types and pointers to structure types can be used more or
//! less interchangeably. Throughout the code, functions that modify the
//! object on which they are called tend to have a name in `set_*()`
//! (e.g. for an element `x`, `x.set_square()` replaces the value with
//! its square in place, while `x.square()` leaves `x` unmodified and
//! returns the square as a new instance).

#![no_std]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
pub(crate) use alloc::vec::Vec;

#[cfg(feature = "std")]
pub(crate) use std::vec::Vec;

pub use rand_core::{CryptoRng, RngCore};

pub mod backend;
pub mod field;
