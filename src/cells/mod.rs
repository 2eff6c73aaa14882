//! Word-level storage for big numbers.
//!
//! A cell store is an ordered sequence of [`Cell`]s where index 0 holds the least significant
//! word. Two shapes exist:
//! 1. [FixedCells][FixedCells] has a capacity known at the type level; addressing a cell beyond it
//!    is a precondition failure.
//! 2. [GrowableCells][GrowableCells] extends itself on demand, zero-filling the new cells, and can
//!    drop its redundant most significant zero cells with `normalize`.
//!
//! All carry-aware primitives are provided methods of [CellStorage][CellStorage], so one algorithm
//! body serves both shapes.

mod fixed;
mod growable;

pub use fixed::FixedCells;
pub use growable::GrowableCells;

use crate::traits::Cell;
use core::cmp::Ordering;
use num_traits::AsPrimitive;

/// Shared contract of the fixed-capacity and growable cell stores.
///
/// Reading a cell beyond the current length yields zero. Writing beyond it extends a growable
/// store and fails on a fixed one.
pub trait CellStorage<C: Cell> {
    fn cells(&self) -> &[C];

    fn cells_mut(&mut self) -> &mut [C];

    /// Make sure at least `len` cells are addressable.
    fn reserve_cells(&mut self, len: usize);

    /// Drop redundant most significant zero cells, if the store is able to shrink.
    fn normalize(&mut self) {}

    #[inline]
    fn len(&self) -> usize {
        self.cells().len()
    }

    /// Number of cells up to and including the most significant nonzero one.
    fn significant_len(&self) -> usize {
        self.cells()
            .iter()
            .rposition(|c| !c.is_zero())
            .map_or(0, |index| index + 1)
    }

    #[inline]
    fn get(&self, index: usize) -> C {
        self.cells().get(index).copied().unwrap_or_else(C::zero)
    }

    #[inline]
    fn set(&mut self, index: usize, value: C) {
        self.reserve_cells(index + 1);
        self.cells_mut()[index] = value;
    }

    fn bit(&self, index: usize) -> bool {
        let cell = self.get(index / C::BITS);
        (cell >> (index % C::BITS)) & C::one() == C::one()
    }

    fn set_bit(&mut self, index: usize, value: bool) {
        let (position, shift) = (index / C::BITS, index % C::BITS);
        let mask = C::one() << shift;
        if value {
            self.reserve_cells(position + 1);
            let cell = &mut self.cells_mut()[position];
            *cell = *cell | mask;
        } else if position < self.len() {
            let cell = &mut self.cells_mut()[position];
            *cell = *cell & !mask;
        }
    }

    /// Half cell `index`: half `2k` is the low half of cell `k`, half `2k+1` its high half.
    fn half_cell(&self, index: usize) -> C {
        let cell = self.get(index / 2);
        if index % 2 == 0 {
            cell & C::low_mask(C::HALF_BITS)
        } else {
            cell >> C::HALF_BITS
        }
    }

    fn set_half_cell(&mut self, index: usize, value: C) {
        debug_assert!(value <= C::low_mask(C::HALF_BITS));
        let position = index / 2;
        self.reserve_cells(position + 1);
        let low_mask = C::low_mask(C::HALF_BITS);
        let cell = &mut self.cells_mut()[position];
        *cell = if index % 2 == 0 {
            (*cell & !low_mask) | value
        } else {
            (*cell & low_mask) | (value << C::HALF_BITS)
        };
    }

    /// Compare from the most significant cell down, missing cells counting as zero.
    fn compare<S: CellStorage<C> + ?Sized>(&self, other: &S) -> Ordering {
        let len = self.len().max(other.len());
        for index in (0..len).rev() {
            match self.get(index).cmp(&other.get(index)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.cells().iter().all(|c| c.is_zero())
    }

    /// Whether the `bits` least significant bits are all zero.
    fn has_zero_low(&self, bits: usize) -> bool {
        let (whole, rest) = (bits / C::BITS, bits % C::BITS);
        (0..whole).all(|index| self.get(index).is_zero())
            && (self.get(whole) & C::low_mask(rest)).is_zero()
    }

    /// Number of significant bits, 0 for zero. This is `floor(log2(x)) + 1`.
    fn bit_length(&self) -> usize {
        match self.significant_len() {
            0 => 0,
            len => len * C::BITS - self.cells()[len - 1].leading_zeros() as usize,
        }
    }

    /// Add `other` in place and return the carry escaping the top cell.
    ///
    /// The store is extended to the significant length of `other` first.
    fn add_cells<S: CellStorage<C> + ?Sized>(&mut self, other: &S) -> bool {
        let other_len = other.significant_len();
        self.reserve_cells(other_len);
        let mut carry = false;
        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            if index >= other_len && !carry {
                break;
            }
            let (sum, next) = cell.add_with_carry(other.get(index), carry);
            *cell = sum;
            carry = next;
        }
        carry
    }

    /// Subtract `other` in place and return the borrow escaping the top cell.
    ///
    /// Requires `self >= other`, in which case the returned borrow is always false.
    fn sub_cells<S: CellStorage<C> + ?Sized>(&mut self, other: &S) -> bool {
        let other_len = other.significant_len();
        self.reserve_cells(other_len);
        let mut borrow = false;
        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            if index >= other_len && !borrow {
                break;
            }
            let (diff, next) = cell.sub_with_borrow(other.get(index), borrow);
            *cell = diff;
            borrow = next;
        }
        borrow
    }

    /// Add one, returning the carry escaping the top cell.
    fn inc(&mut self) -> bool {
        for cell in self.cells_mut().iter_mut() {
            let (sum, carry) = cell.add_with_carry(C::one(), false);
            *cell = sum;
            if !carry {
                return false;
            }
        }
        true
    }

    /// Subtract one, returning the borrow escaping the top cell.
    fn dec(&mut self) -> bool {
        for cell in self.cells_mut().iter_mut() {
            let (diff, borrow) = cell.sub_with_borrow(C::one(), false);
            *cell = diff;
            if !borrow {
                return false;
            }
        }
        true
    }

    /// Shift left by `shift` bits within the current length; bits leaving the top are lost.
    fn shift_left(&mut self, shift: usize) {
        let (cell_shift, bit_shift) = (shift / C::BITS, shift % C::BITS);
        let cells = self.cells_mut();
        let len = cells.len();
        for index in (0..len).rev() {
            let mut value = C::zero();
            if index >= cell_shift {
                value = cells[index - cell_shift] << bit_shift;
                if bit_shift > 0 && index > cell_shift {
                    value = value | (cells[index - cell_shift - 1] >> (C::BITS - bit_shift));
                }
            }
            cells[index] = value;
        }
    }

    /// Shift right by `shift` bits; bits leaving the bottom are lost.
    fn shift_right(&mut self, shift: usize) {
        let (cell_shift, bit_shift) = (shift / C::BITS, shift % C::BITS);
        let cells = self.cells_mut();
        let len = cells.len();
        for index in 0..len {
            let source = index + cell_shift;
            let mut value = C::zero();
            if source < len {
                value = cells[source] >> bit_shift;
                if bit_shift > 0 && source + 1 < len {
                    value = value | (cells[source + 1] << (C::BITS - bit_shift));
                }
            }
            cells[index] = value;
        }
    }

    fn and_cells<S: CellStorage<C> + ?Sized>(&mut self, other: &S) {
        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            *cell = *cell & other.get(index);
        }
    }

    fn or_cells<S: CellStorage<C> + ?Sized>(&mut self, other: &S) {
        self.reserve_cells(other.significant_len());
        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            *cell = *cell | other.get(index);
        }
    }

    fn xor_cells<S: CellStorage<C> + ?Sized>(&mut self, other: &S) {
        self.reserve_cells(other.significant_len());
        for (index, cell) in self.cells_mut().iter_mut().enumerate() {
            *cell = *cell ^ other.get(index);
        }
    }

    /// Complement every cell of the current length.
    fn not_cells(&mut self) {
        for cell in self.cells_mut().iter_mut() {
            *cell = !*cell;
        }
    }

    /// Multiply in place by one cell and return the carry cell escaping the top.
    fn mul_cell(&mut self, factor: C) -> C {
        let mut carry = C::zero();
        for cell in self.cells_mut().iter_mut() {
            let (low, high) = cell.mul_add_carry(factor, C::zero(), carry);
            *cell = low;
            carry = high;
        }
        carry
    }

    /// Divide in place by one cell through the double-width accumulator, returning the remainder.
    fn div_cell(&mut self, divisor: C) -> C {
        assert!(!divisor.is_zero(), "division by zero");
        let wide_divisor = divisor.widen();
        let mut remainder = C::zero();
        for cell in self.cells_mut().iter_mut().rev() {
            let accumulator = C::join(remainder, *cell);
            *cell = (accumulator / wide_divisor).as_();
            remainder = (accumulator % wide_divisor).as_();
        }
        remainder
    }

    /// Divide in place by a divisor fitting in a half cell, one half cell at a time.
    ///
    /// The running remainder is below the divisor, so `remainder * 2^(W/2) + half` fits in a
    /// single cell and no double-width arithmetic is needed.
    fn div_half_cell(&mut self, divisor: C) -> C {
        assert!(!divisor.is_zero(), "division by zero");
        assert!(
            divisor <= C::low_mask(C::HALF_BITS),
            "divisor {:x} does not fit in a half cell",
            divisor
        );
        let mut remainder = C::zero();
        for index in (0..2 * self.len()).rev() {
            let accumulator = (remainder << C::HALF_BITS) | self.half_cell(index);
            self.set_half_cell(index, accumulator / divisor);
            remainder = accumulator % divisor;
        }
        remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_test() {
        let a = GrowableCells::<u8>::from_vec(vec![1, 2]);
        let b = FixedCells::<u8, 4>::from_cells([1, 2, 0, 0]);
        let c = FixedCells::<u8, 4>::from_cells([0, 3, 0, 0]);
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_eq!(a.compare(&c), Ordering::Less);
        assert_eq!(c.compare(&a), Ordering::Greater);
        assert_eq!(GrowableCells::<u8>::new().compare(&FixedCells::<u8, 2>::new()), Ordering::Equal);
    }

    #[test]
    fn add_sub_carry_test() {
        let mut a = GrowableCells::<u8>::from_vec(vec![0xFF, 0xFF]);
        assert!(a.add_cells(&FixedCells::<u8, 1>::from_cells([1])));
        assert_eq!(a.cells(), &[0, 0]);

        let mut a = GrowableCells::<u8>::from_vec(vec![0xFF, 0x01]);
        assert!(!a.add_cells(&GrowableCells::from_vec(vec![0x01, 0x00, 0x00])));
        assert_eq!(a.cells(), &[0, 2]);

        let mut a = GrowableCells::<u8>::from_vec(vec![0x00, 0x01]);
        assert!(!a.sub_cells(&GrowableCells::from_vec(vec![0x01])));
        assert_eq!(a.cells(), &[0xFF, 0]);

        let mut a = FixedCells::<u8, 2>::from_cells([0, 0]);
        assert!(a.sub_cells(&FixedCells::<u8, 2>::from_cells([1, 0])));
        assert_eq!(a.cells(), &[0xFF, 0xFF]);
    }

    #[test]
    fn inc_dec_test() {
        let mut a = FixedCells::<u8, 2>::from_cells([0xFF, 0xFF]);
        assert!(a.inc());
        assert!(a.is_zero());
        assert!(a.dec());
        assert_eq!(a.cells(), &[0xFF, 0xFF]);

        let mut b = GrowableCells::<u16>::from_vec(vec![0xFFFF, 0]);
        assert!(!b.inc());
        assert_eq!(b.cells(), &[0, 1]);
    }

    #[test]
    fn shift_test() {
        let mut a = FixedCells::<u8, 3>::from_cells([0x81, 0x42, 0x00]);
        a.shift_left(9);
        assert_eq!(a.cells(), &[0x00, 0x02, 0x85]);
        a.shift_right(9);
        assert_eq!(a.cells(), &[0x81, 0x42, 0x00]);
        a.shift_left(8);
        assert_eq!(a.cells(), &[0x00, 0x81, 0x42]);
        a.shift_right(3);
        assert_eq!(a.cells(), &[0x20, 0x50, 0x08]);
        a.shift_left(24);
        assert!(a.is_zero());
    }

    #[test]
    fn bit_access_test() {
        let mut a = GrowableCells::<u8>::new();
        a.set_bit(17, true);
        assert_eq!(a.cells(), &[0, 0, 2]);
        assert!(a.bit(17));
        assert!(!a.bit(16));
        assert!(!a.bit(1000));
        a.set_bit(17, false);
        a.set_bit(90, false);
        assert_eq!(a.len(), 3);
        assert!(a.is_zero());
        assert_eq!(a.bit_length(), 0);

        a.set_bit(9, true);
        assert_eq!(a.bit_length(), 10);
        assert!(a.has_zero_low(9));
        assert!(!a.has_zero_low(10));
    }

    #[test]
    fn half_cell_test() {
        let mut a = FixedCells::<u16, 2>::from_cells([0xABCD, 0x1234]);
        assert_eq!(a.half_cell(0), 0xCD);
        assert_eq!(a.half_cell(1), 0xAB);
        assert_eq!(a.half_cell(3), 0x12);
        assert_eq!(a.half_cell(7), 0);
        a.set_half_cell(2, 0xEF);
        assert_eq!(a.cells(), &[0xABCD, 0x12EF]);
    }

    #[test]
    #[should_panic]
    fn fixed_out_of_capacity_test() {
        let mut a = FixedCells::<u32, 2>::new();
        a.set(2, 1);
    }

    #[test]
    fn bitwise_test() {
        let mut a = GrowableCells::<u8>::from_vec(vec![0xF0, 0x0F]);
        a.and_cells(&GrowableCells::from_vec(vec![0x3C]));
        assert_eq!(a.cells(), &[0x30, 0x00]);
        a.or_cells(&GrowableCells::from_vec(vec![0x01, 0x00, 0x80]));
        assert_eq!(a.cells(), &[0x31, 0x00, 0x80]);
        a.xor_cells(&GrowableCells::from_vec(vec![0x31]));
        assert_eq!(a.cells(), &[0x00, 0x00, 0x80]);
        a.not_cells();
        assert_eq!(a.cells(), &[0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn single_cell_mul_div_test() {
        let mut a = GrowableCells::<u8>::from_vec(vec![0xFF, 0xFF]);
        assert_eq!(a.mul_cell(0xFF), 0xFE);
        assert_eq!(a.cells(), &[0x01, 0xFF]);

        // 0xFE_FF01 / 0xFF = 0xFFFF
        let mut b = GrowableCells::<u8>::from_vec(vec![0x01, 0xFF, 0xFE]);
        assert_eq!(b.div_cell(0xFF), 0);
        assert_eq!(b.cells(), &[0xFF, 0xFF, 0x00]);

        let mut c = GrowableCells::<u32>::from_vec(vec![100]);
        assert_eq!(c.div_half_cell(7), 2);
        assert_eq!(c.cells(), &[14]);

        let mut d = GrowableCells::<u8>::from_vec(vec![0x34, 0x12]);
        assert_eq!(d.div_half_cell(10), (0x1234 % 10) as u8);
        assert_eq!(d.cells(), &[(0x1234 / 10) as u8, (0x1234 / 10 >> 8) as u8]);
    }

    #[test]
    #[should_panic]
    fn half_cell_divisor_too_wide_test() {
        let mut a = GrowableCells::<u8>::from_vec(vec![0x34]);
        a.div_half_cell(0x10);
    }
}
