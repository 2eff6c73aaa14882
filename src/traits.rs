use core::fmt::{Debug, Display, LowerHex};
use core::hash::Hash;
use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// A fixed-width unsigned machine word used as one base-2^W digit of a big number.
///
/// Every cell type comes with a double-width accumulator (`Double`) so that one cell times one
/// cell plus two carries, or two cells divided by one, can be computed without loss.
pub trait Cell:
    PrimInt + Unsigned + Default + Hash + Debug + Display + LowerHex + AsPrimitive<u64> + 'static
{
    /// Unsigned type with twice as many bits as the cell.
    type Double: PrimInt + Unsigned + From<Self> + AsPrimitive<Self> + 'static;

    /// Number of bits in the cell (W).
    const BITS: usize;
    /// Number of bits in a half cell.
    const HALF_BITS: usize = Self::BITS / 2;
    /// Number of bytes of the little-endian raw encoding.
    const BYTES: usize = Self::BITS / 8;

    /// `self + rhs + carry`, returning the wrapped sum and the outgoing carry.
    fn add_with_carry(self, rhs: Self, carry: bool) -> (Self, bool);

    /// `self - rhs - borrow`, returning the wrapped difference and the outgoing borrow.
    fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool);

    /// Truncating conversion from a `u64`.
    fn from_u64_truncated(value: u64) -> Self;

    fn write_le(self, out: &mut Vec<u8>);

    /// Read a cell from its little-endian encoding, `bytes.len()` must be `Self::BYTES`.
    fn read_le(bytes: &[u8]) -> Self;

    #[inline]
    fn widen(self) -> Self::Double {
        Self::Double::from(self)
    }

    /// Assemble a double-width value from its high and low cells.
    #[inline]
    fn join(high: Self, low: Self) -> Self::Double {
        (high.widen() << Self::BITS) | low.widen()
    }

    /// Split a double-width value into its `(low, high)` cells.
    #[inline]
    fn split(wide: Self::Double) -> (Self, Self) {
        (wide.as_(), (wide >> Self::BITS).as_())
    }

    /// `self * rhs + addend + carry` in the double-width accumulator, as `(low, high)` cells.
    ///
    /// Never overflows: `(B-1)^2 + 2(B-1) = B^2 - 1`.
    #[inline]
    fn mul_add_carry(self, rhs: Self, addend: Self, carry: Self) -> (Self, Self) {
        Self::split(self.widen() * rhs.widen() + addend.widen() + carry.widen())
    }

    /// Mask keeping the `bits` lowest bits of a cell, `bits <= BITS`.
    #[inline]
    fn low_mask(bits: usize) -> Self {
        if bits >= Self::BITS {
            Self::max_value()
        } else {
            (Self::one() << bits) - Self::one()
        }
    }

    #[inline]
    fn as_u64(self) -> u64 {
        self.as_()
    }
}

macro_rules! impl_cell {
    ($t:ty, $double:ty) => {
        impl Cell for $t {
            type Double = $double;
            const BITS: usize = <$t>::BITS as usize;

            #[inline]
            fn add_with_carry(self, rhs: Self, carry: bool) -> (Self, bool) {
                let (sum, first) = self.overflowing_add(rhs);
                let (sum, second) = sum.overflowing_add(carry as $t);
                (sum, first || second)
            }

            #[inline]
            fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool) {
                let (diff, first) = self.overflowing_sub(rhs);
                let (diff, second) = diff.overflowing_sub(borrow as $t);
                (diff, first || second)
            }

            #[inline]
            fn from_u64_truncated(value: u64) -> Self {
                value as $t
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buffer = [0u8; <$t>::BITS as usize / 8];
                buffer.copy_from_slice(bytes);
                <$t>::from_le_bytes(buffer)
            }
        }
    };
}
impl_cell!(u8, u16);
impl_cell!(u16, u32);
impl_cell!(u32, u64);
impl_cell!(u64, u128);

/// Result of a conversion that may lose information.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Return the carried value, whether it is exact or not.
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) | Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_test() {
        assert_eq!(0xFFu8.add_with_carry(1, false), (0, true));
        assert_eq!(0xFEu8.add_with_carry(1, true), (0, true));
        assert_eq!(0x7Fu8.add_with_carry(0x7F, true), (0xFF, false));
        assert_eq!(0u32.sub_with_borrow(1, false), (u32::MAX, true));
        assert_eq!(1u32.sub_with_borrow(1, true), (u32::MAX, true));
        assert_eq!(5u64.sub_with_borrow(2, true), (2, false));
    }

    #[test]
    fn double_width_test() {
        assert_eq!(u8::join(0x12, 0x34), 0x1234u16);
        assert_eq!(u8::split(0xABCD), (0xCD, 0xAB));
        assert_eq!(0xFFu8.mul_add_carry(0xFF, 0xFF, 0xFF), (0xFF, 0xFF));
        assert_eq!(u64::MAX.mul_add_carry(2, 0, 1), (u64::MAX, 1));
        assert_eq!(u16::low_mask(4), 0xF);
        assert_eq!(u16::low_mask(16), 0xFFFF);
        assert_eq!(u32::HALF_BITS, 16);
    }

    #[test]
    fn raw_bytes_test() {
        let mut out = Vec::new();
        0x0102_0304u32.write_le(&mut out);
        assert_eq!(out, vec![4, 3, 2, 1]);
        assert_eq!(u32::read_le(&out), 0x0102_0304);
        assert_eq!(<u64 as Cell>::BYTES, 8);
    }

    #[test]
    fn approximation_test() {
        assert!(Approximation::Exact(3).is_exact());
        assert_eq!(Approximation::Approximated(2).value(), 2);
    }
}
