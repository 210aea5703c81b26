//! Implementations of the field arithmetic.
//!
//! This module provides the structure that implements GF(2^113). There
//! can be several actual implementations of a given field (e.g. using
//! carryless multiplication opcodes where available); the portable
//! 64-bit implementation is currently the only one, and is selected
//! unconditionally.
//!
//! The following properties apply to the field element type:
//!
//!  - An instance encapsulates a field element. Within an instance, the
//!    15 unused high bits of the 128-bit storage are always zero; all
//!    constructors and operations maintain that invariant.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively. In a normal basis, the
//!    multiplicative identity has all its 113 coefficients set.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, `/`, and the compound assignments `+=`, `-=`, `*=` and `/=`).
//!    Since the field has characteristic 2, addition and subtraction are
//!    the same operation (bitwise XOR) and negation is the identity.
//!    Division by zero is tolerated, and yields zero (regardless of the
//!    dividend). Operators can use both the raw types, and references
//!    thereof.
//!
//!  - Function `set_square(&mut self)` squares a field element (in
//!    place). Corresponding function `square(self) -> Self` returns the
//!    result as a new instance. In a normal basis, squaring is a cyclic
//!    rotation of the coefficient vector and is much faster than a
//!    general multiplication; the same holds for the square root
//!    (`set_sqrt()` and `sqrt()`, the inverse rotation; every element
//!    of the field has exactly one square root). Sequences of multiple
//!    squarings can be performed with `set_xsquare(&mut self, n: u32)`
//!    (and a corresponding `xsquare()` to get the result as a new
//!    instance).
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` sets the
//!    instance to the value of the other instance `a` if `ctl` is equal
//!    to 0xFFFFFFFF, or leaves the instance value unmodified if `ctl`
//!    is equal to 0x00000000.
//!
//!  - Function `select(a0: &Self, a1: &Self, ctl: u32) -> Self` returns
//!    a copy of `a0` if `ctl` is 0x00000000, or a copy of `a1` if
//!    `ctl` is 0xFFFFFFFF.
//!
//!  - Function `cswap(a: &mut Self, b: &mut Self, ctl: u32)`
//!    exchanges the contents of `a` and `b` if `ctl` is 0xFFFFFFFF,
//!    or leaves them unmodified if `ctl` is 0x00000000.
//!
//!  - Constant values can be defined with the const-qualified `w64le()`
//!    function, which takes the value as two 64-bit limbs in
//!    little-endian order. The value is implicitly truncated to the
//!    113-bit coefficient window.
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF
//!    if `self` and `rhs` represent the same value, or 0x00000000
//!    otherwise. Functions `iszero(self) -> u32` and
//!    `isone(self) -> u32` are specialized subcases that compare
//!    `self` with zero and one, respectively.
//!
//!  - Function `trace(self) -> u32` returns the field trace (0 or 1).
//!
//!  - Functions `qsolve(self) -> Option<Self>` and (with the `alloc`
//!    feature) `solve_quadratic(a, b, c)` solve quadratic equations;
//!    see their documentation for the exact contracts.
//!
//!  - Function `encode(self) -> [u8; 15]` encodes an element as exactly
//!    15 bytes, little-endian convention; the top 7 bits of the last
//!    byte are always zero. `encode_into()` writes the same encoding
//!    into a caller-provided buffer. Function
//!    `decode(buf: &[u8]) -> Result<Self, FieldError>` is the
//!    validating inverse; `decode_ct(buf: &[u8]) -> (Self, u32)`
//!    performs the same operation but reports success or failure as a
//!    `u32` mask, and shields the decoded value (though not the
//!    outcome) from side-channel leaks.

pub mod gfnb113_m64;

/// Element of GF(2^113) in a type 2 optimal normal basis (portable
/// 64-bit implementation).
pub use gfnb113_m64::GFnb113;

// Return 0xFFFFFFFFFFFFFFFF if the high bit of x is 1, 0 otherwise
// (i.e. extend the sign bit of x over the whole word).
#[inline(always)]
pub(crate) const fn sgnw(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}
