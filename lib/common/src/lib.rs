//! Numeric trait aliases shared by the objweld crates.

use std::{fmt, hash::Hash, str::FromStr};

use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};

pub mod macros;

/// Trait for types which can act as indices within an array (or an array-like structure), such as
/// the index buffer of a mesh.
pub trait ArrayIndex:
    PrimInt + Unsigned + AsPrimitive<usize> + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Convert a `usize` into this index type, if it fits.
    #[inline]
    fn from_usize(value: usize) -> Option<Self> {
        <Self as NumCast>::from(value)
    }
}
impl<P> ArrayIndex for P where
    P: PrimInt
        + Unsigned
        + AsPrimitive<usize>
        + Hash
        + fmt::Debug
        + fmt::Display
        + Send
        + Sync
        + 'static
{
}

/// Trait for floating-point types, so that meshes can be generic over {f32, f64}.
///
/// # Safety
///
/// * This is only intended to be implemented on floating-point types.
#[allow(unsafe_code)]
pub unsafe trait Real:
    num_traits::Float
    + nalgebra::Scalar
    + FromStr
    + fmt::Display
    + Copy
    + Send
    + Sync
{
    const ZERO: Self;
}

crate::item_with! {R: f32, f64 => unsafe impl Real for R {
    #![allow(unsafe_code)]
    const ZERO: Self = 0.0;
}}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_from_usize() {
        assert_eq!(<u8 as ArrayIndex>::from_usize(255), Some(255u8));
        assert_eq!(<u8 as ArrayIndex>::from_usize(256), None);
        assert_eq!(<u32 as ArrayIndex>::from_usize(70_000), Some(70_000u32));
    }

    #[test]
    fn real_parses() {
        assert_eq!("1.5".parse::<f32>().ok(), Some(1.5));
        assert_eq!(<f64 as Real>::ZERO, 0.0);
    }
}
