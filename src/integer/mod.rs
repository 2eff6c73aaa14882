//! Unsigned arbitrary-precision integers.
//!
//! [BigInteger] owns a [GrowableCells] store that is kept normalized (no most significant zero
//! cell) after every public mutating call, so zero is the empty store and derived equality and
//! hashing compare values.

mod division;
pub(crate) mod format;
mod gcd;
mod ops;

pub use division::DivisionResult;
pub use format::{ReadError, ReadErrorKind, TextFormat};
pub use gcd::BezoutResult;

use crate::cells::{CellStorage, FixedCells, GrowableCells};
use crate::traits::Cell;
use core::cmp::Ordering;
use num_traits::{CheckedSub, Float, FromPrimitive, One, Pow, ToPrimitive, Unsigned, Zero};

/// Unsigned integer of unbounded size, stored as base-2^W cells, least significant first.
///
/// The cell type defaults to `u32`. Narrower cells are mostly useful for testing the multi-cell
/// paths with small values.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInteger<C: Cell = u32> {
    cells: GrowableCells<C>,
}

impl<C: Cell> BigInteger<C> {
    /// Zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            cells: GrowableCells::new(),
        }
    }

    /// Create from cells, least significant first.
    pub fn from_cells(cells: Vec<C>) -> Self {
        let mut cells = GrowableCells::from_vec(cells);
        cells.normalize();
        Self { cells }
    }

    #[inline]
    pub fn from_cell(cell: C) -> Self {
        Self::from_cells(vec![cell])
    }

    /// The normalized cells, least significant first. Zero has no cells.
    #[inline]
    pub fn cells(&self) -> &[C] {
        self.cells.cells()
    }

    #[inline]
    pub fn into_cells(self) -> Vec<C> {
        self.cells.into_vec()
    }

    #[inline]
    pub fn storage(&self) -> &GrowableCells<C> {
        &self.cells
    }

    /// Whether the value fits in a single cell.
    #[inline]
    pub fn is_atomic(&self) -> bool {
        self.cells.len() <= 1
    }

    /// The least significant cell.
    #[inline]
    pub fn low_cell(&self) -> C {
        self.cells.get(0)
    }

    /// `floor(log2(self)) + 1`, or 0 for zero.
    #[inline]
    pub fn bit_length(&self) -> usize {
        self.cells.bit_length()
    }

    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        self.cells.bit(index)
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        self.cells.set_bit(index, value);
        self.cells.normalize();
    }

    /// Whether the `bits` least significant bits are zero.
    #[inline]
    pub fn has_zero_low(&self, bits: usize) -> bool {
        self.cells.has_zero_low(bits)
    }

    /// Read the `len` bits starting at bit `first_bit`, `0 < len <= W`.
    ///
    /// The field may straddle two cells.
    pub fn value_at(&self, first_bit: usize, len: usize) -> C {
        assert!(len > 0 && len <= C::BITS, "bit field of {} bits", len);
        let index = first_bit / C::BITS;
        let mut window =
            FixedCells::<C, 2>::from_cells([self.cells.get(index), self.cells.get(index + 1)]);
        window.shift_right(first_bit % C::BITS);
        window.get(0) & C::low_mask(len)
    }

    /// Overwrite the `len` bits starting at bit `first_bit` with `value`, `0 < len <= W`.
    pub fn set_value_at(&mut self, first_bit: usize, len: usize, value: C) {
        assert!(len > 0 && len <= C::BITS, "bit field of {} bits", len);
        assert!(
            value <= C::low_mask(len),
            "value {:x} does not fit in {} bits",
            value,
            len
        );
        let (index, shift) = (first_bit / C::BITS, first_bit % C::BITS);
        let mut mask = FixedCells::<C, 2>::from_cells([C::low_mask(len), C::zero()]);
        let mut field = FixedCells::<C, 2>::from_cells([value, C::zero()]);
        mask.shift_left(shift);
        field.shift_left(shift);

        for offset in 0..2 {
            let cell_mask = mask.get(offset);
            if cell_mask.is_zero() {
                continue;
            }
            let cell = (self.cells.get(index + offset) & !cell_mask) | field.get(offset);
            self.cells.set(index + offset, cell);
        }
        self.cells.normalize();
    }

    // apply `op(cell, mask)` to every cell overlapping the `bits` low bits
    fn map_low_bits(&mut self, bits: usize, op: impl Fn(C, C) -> C) {
        let (whole, rest) = (bits / C::BITS, bits % C::BITS);
        let len = whole + (rest > 0) as usize;
        self.cells.reserve_cells(len);
        for (index, cell) in self.cells.cells_mut()[..len].iter_mut().enumerate() {
            let mask = if index < whole {
                C::max_value()
            } else {
                C::low_mask(rest)
            };
            *cell = op(*cell, mask);
        }
        self.cells.normalize();
    }

    /// Complement the `bits` least significant bits.
    pub fn neg_low(&mut self, bits: usize) {
        self.map_low_bits(bits, |cell, mask| cell ^ mask)
    }

    /// Set the `bits` least significant bits to zero.
    pub fn clear_low(&mut self, bits: usize) {
        self.map_low_bits(bits, |cell, mask| cell & !mask)
    }

    /// Set the `bits` least significant bits to one.
    pub fn saturate_low(&mut self, bits: usize) {
        self.map_low_bits(bits, |cell, mask| cell | mask)
    }

    /// Keep only the `bits` least significant bits.
    pub fn clear_high(&mut self, bits: usize) {
        let (whole, rest) = (bits / C::BITS, bits % C::BITS);
        if self.cells.len() > whole {
            self.cells.truncate(whole + (rest > 0) as usize);
            if rest > 0 {
                let top = self.cells.get(whole) & C::low_mask(rest);
                self.cells.set(whole, top);
            }
            self.cells.normalize();
        }
    }

    pub fn inc(&mut self) {
        if self.cells.inc() {
            self.cells.push(C::one());
        }
    }

    /// Subtract one. Decrementing zero is a precondition failure.
    pub fn dec(&mut self) {
        assert!(!self.is_zero(), "decrement of zero");
        self.cells.dec();
        self.cells.normalize();
    }

    fn add_big(&mut self, other: &Self) {
        if self.cells.add_cells(&other.cells) {
            self.cells.push(C::one());
        }
    }

    fn sub_big(&mut self, other: &Self) {
        assert!(*self >= *other, "subtraction underflow");
        self.cells.sub_cells(&other.cells);
        self.cells.normalize();
    }

    /// Schoolbook product into a fresh `n + m` cell buffer.
    fn mul_big(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let (lhs, rhs) = (self.cells(), other.cells());
        let mut product = vec![C::zero(); lhs.len() + rhs.len()];
        for (j, &factor) in rhs.iter().enumerate() {
            if factor.is_zero() {
                continue;
            }
            let mut carry = C::zero();
            for (i, &cell) in lhs.iter().enumerate() {
                let (low, high) = cell.mul_add_carry(factor, product[i + j], carry);
                product[i + j] = low;
                carry = high;
            }
            product[j + lhs.len()] = carry;
        }
        Self::from_cells(product)
    }

    /// Multiply in place by one cell.
    pub fn mul_cell(&mut self, factor: C) {
        let carry = self.cells.mul_cell(factor);
        if !carry.is_zero() {
            self.cells.push(carry);
        }
        self.cells.normalize();
    }

    fn shl_big(&mut self, shift: usize) {
        if self.is_zero() || shift == 0 {
            return;
        }
        let len = self.cells.len() + shift / C::BITS + 1;
        self.cells.reserve_cells(len);
        self.cells.shift_left(shift);
        self.cells.normalize();
    }

    fn shr_big(&mut self, shift: usize) {
        self.cells.shift_right(shift);
        self.cells.normalize();
    }

    fn and_big(&mut self, other: &Self) {
        self.cells.and_cells(&other.cells);
        self.cells.normalize();
    }

    fn or_big(&mut self, other: &Self) {
        self.cells.or_cells(&other.cells);
    }

    fn xor_big(&mut self, other: &Self) {
        self.cells.xor_cells(&other.cells);
        self.cells.normalize();
    }

    fn from_native(mut value: u128) -> Self {
        let mut cells = GrowableCells::new();
        while value != 0 {
            cells.push(C::from_u64_truncated(value as u64));
            value >>= C::BITS;
        }
        Self { cells }
    }

    fn to_u128_checked(&self) -> Option<u128> {
        if self.bit_length() > 128 {
            return None;
        }
        Some(self.cells().iter().rev().fold(0u128, |acc, cell| {
            (acc << C::BITS) | cell.as_u64() as u128
        }))
    }
}

impl<C: Cell> PartialOrd for BigInteger<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cell> Ord for BigInteger<C> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.cells.compare(&other.cells)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl<C: Cell> From<$t> for BigInteger<C> {
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_native(value as u128)
            }
        }
    )*};
}
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl<C: Cell> Zero for BigInteger<C> {
    #[inline]
    fn zero() -> Self {
        Self::new()
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.cells.len() == 0
    }
}

impl<C: Cell> One for BigInteger<C> {
    #[inline]
    fn one() -> Self {
        Self::from_cell(C::one())
    }
    #[inline]
    fn is_one(&self) -> bool {
        self.cells.len() == 1 && self.low_cell().is_one()
    }
}

impl<C: Cell> Unsigned for BigInteger<C> {}

impl<C: Cell> CheckedSub for BigInteger<C> {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        if self < v {
            return None;
        }
        let mut result = self.clone();
        result.sub_big(v);
        Some(result)
    }
}

impl<C: Cell> Pow<u32> for &BigInteger<C> {
    type Output = BigInteger<C>;

    /// Square and multiply.
    fn pow(self, mut exponent: u32) -> BigInteger<C> {
        let mut result = BigInteger::one();
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.mul_big(&base);
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.mul_big(&base);
            }
        }
        result
    }
}

impl<C: Cell> Pow<u32> for BigInteger<C> {
    type Output = BigInteger<C>;
    #[inline]
    fn pow(self, exponent: u32) -> BigInteger<C> {
        (&self).pow(exponent)
    }
}

impl<C: Cell> FromPrimitive for BigInteger<C> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        if n < 0 {
            None
        } else {
            Some(Self::from_native(n as u128))
        }
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from_native(n as u128))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<Self> {
        Some(Self::from_native(n))
    }

    /// Truncating conversion of a finite, non-negative float.
    fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() || n < 0. {
            return None;
        }
        let (mantissa, exponent, _) = Float::integer_decode(n);
        let mantissa = Self::from(mantissa);
        Some(if exponent >= 0 {
            mantissa << exponent as usize
        } else {
            mantissa >> (-exponent) as usize
        })
    }
}

impl<C: Cell> ToPrimitive for BigInteger<C> {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.to_u128_checked().and_then(|v| v.to_i64())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.to_u128_checked().and_then(|v| v.to_u64())
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        self.to_u128_checked()
    }

    fn to_f64(&self) -> Option<f64> {
        let scale = 2f64.powi(C::BITS as i32);
        Some(
            self.cells()
                .iter()
                .rev()
                .fold(0f64, |acc, cell| acc * scale + cell.as_u64() as f64),
        )
    }
}

#[cfg(feature = "num-bigint")]
mod bigint_conversion {
    use super::BigInteger;
    use crate::traits::Cell;
    use num_bigint::BigUint;

    impl<C: Cell> From<&BigUint> for BigInteger<C> {
        fn from(value: &BigUint) -> Self {
            let bytes = value.to_bytes_le();
            let cells = bytes
                .chunks(C::BYTES)
                .map(|chunk| {
                    let mut buffer = vec![0u8; C::BYTES];
                    buffer[..chunk.len()].copy_from_slice(chunk);
                    C::read_le(&buffer)
                })
                .collect();
            BigInteger::from_cells(cells)
        }
    }

    impl<C: Cell> From<&BigInteger<C>> for BigUint {
        fn from(value: &BigInteger<C>) -> Self {
            let mut bytes = Vec::with_capacity(value.cells().len() * C::BYTES);
            for cell in value.cells() {
                cell.write_le(&mut bytes);
            }
            BigUint::from_bytes_le(&bytes)
        }
    }
}
