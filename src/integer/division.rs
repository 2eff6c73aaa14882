use super::BigInteger;
use crate::cells::{CellStorage, GrowableCells};
use crate::traits::Cell;
use num_traits::{AsPrimitive, CheckedDiv, One, Zero};

/// Quotient and remainder of a Euclidean division of unsigned integers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DivisionResult<C: Cell = u32> {
    quotient: BigInteger<C>,
    remainder: BigInteger<C>,
}

impl<C: Cell> DivisionResult<C> {
    #[inline]
    pub fn quotient(&self) -> &BigInteger<C> {
        &self.quotient
    }

    #[inline]
    pub fn remainder(&self) -> &BigInteger<C> {
        &self.remainder
    }

    #[inline]
    pub fn has_remainder(&self) -> bool {
        !self.remainder.is_zero()
    }

    /// Return `(quotient, remainder)`.
    #[inline]
    pub fn into_parts(self) -> (BigInteger<C>, BigInteger<C>) {
        (self.quotient, self.remainder)
    }
}

impl<C: Cell> BigInteger<C> {
    /// Divide by `divisor`, returning `q` and `r` with `q * divisor + r == self` and
    /// `r < divisor`. Dividing by zero is a precondition failure.
    ///
    /// A divisor fitting in half a cell is handled half cell by half cell, a single-cell divisor
    /// goes through the double-width accumulator, anything wider uses normalized long division.
    pub fn divide(&self, divisor: &Self) -> DivisionResult<C> {
        assert!(!divisor.is_zero(), "division by zero");
        if self < divisor {
            return DivisionResult {
                quotient: Self::zero(),
                remainder: self.clone(),
            };
        }

        if divisor.is_atomic() {
            let mut quotient = self.clone();
            let remainder = quotient.div_cell(divisor.low_cell());
            return DivisionResult {
                quotient,
                remainder: Self::from_cell(remainder),
            };
        }

        self.div_normalized(divisor)
    }

    /// Divide in place by one cell and return the remainder.
    pub fn div_cell(&mut self, divisor: C) -> C {
        let remainder = if divisor <= C::low_mask(C::HALF_BITS) {
            log::trace!("half cell division by {:x}", divisor);
            self.cells.div_half_cell(divisor)
        } else {
            log::trace!("single cell division by {:x}", divisor);
            self.cells.div_cell(divisor)
        };
        self.cells.normalize();
        remainder
    }

    /// Remainder of the division by one cell, leaving `self` untouched.
    pub fn rem_cell(&self, divisor: C) -> C {
        assert!(!divisor.is_zero(), "division by zero");
        let wide_divisor = divisor.widen();
        self.cells().iter().rev().fold(C::zero(), |remainder, &cell| {
            (C::join(remainder, cell) % wide_divisor).as_()
        })
    }

    /// Long division with a divisor of at least two cells and `self >= divisor`.
    ///
    /// Both operands are shifted left until the top bit of the divisor is set, so that the trial
    /// quotient digit taken from the two top cells of the running remainder is at most two above
    /// the true digit. The remainder is shifted back at the end; the bits it loses must be zero.
    fn div_normalized(&self, divisor: &Self) -> DivisionResult<C> {
        let n = divisor.cells.len();
        let m = self.cells.len() - n;
        let shift = divisor.cells()[n - 1].leading_zeros() as usize;
        log::trace!(
            "normalized division of {} cells by {} cells, shift {}",
            m + n,
            n,
            shift
        );

        let mut u = self.cells.clone();
        u.push(C::zero());
        u.shift_left(shift);
        let mut u = u.into_vec();
        let mut v = divisor.cells.clone();
        v.shift_left(shift);
        let v = v.into_vec();

        let base = C::one().widen() << C::BITS;
        let (v_top, v_next) = (v[n - 1].widen(), v[n - 2].widen());
        let mut quotient = vec![C::zero(); m + 1];

        for j in (0..=m).rev() {
            // estimate the digit from the two top cells, then refine it with the third one
            let numerator = C::join(u[j + n], u[j + n - 1]);
            let mut qhat = numerator / v_top;
            let mut rhat = numerator % v_top;
            while qhat >= base || qhat * v_next > ((rhat << C::BITS) | u[j + n - 2].widen()) {
                qhat = qhat - C::Double::one();
                rhat = rhat + v_top;
                if rhat >= base {
                    break;
                }
            }
            debug_assert!(qhat < base);
            let mut digit: C = qhat.as_();

            // u[j..=j+n] -= digit * v
            let (mut carry, mut borrow) = (C::zero(), false);
            for i in 0..n {
                let (low, high) = v[i].mul_add_carry(digit, C::zero(), carry);
                carry = high;
                let (diff, next) = u[i + j].sub_with_borrow(low, borrow);
                u[i + j] = diff;
                borrow = next;
            }
            let (diff, negative) = u[j + n].sub_with_borrow(carry, borrow);
            u[j + n] = diff;

            if negative {
                log::trace!("add back at digit {}", j);
                digit = digit - C::one();
                let mut carry = false;
                for i in 0..n {
                    let (sum, next) = u[i + j].add_with_carry(v[i], carry);
                    u[i + j] = sum;
                    carry = next;
                }
                u[j + n] = u[j + n].add_with_carry(C::zero(), carry).0;
            }
            quotient[j] = digit;
        }

        u.truncate(n);
        let mut remainder = GrowableCells::from_vec(u);
        assert!(
            remainder.has_zero_low(shift),
            "normalized remainder has nonzero bits below the shift"
        );
        remainder.shift_right(shift);
        remainder.normalize();

        DivisionResult {
            quotient: Self::from_cells(quotient),
            remainder: Self { cells: remainder },
        }
    }

    pub(super) fn div_big_assign(&mut self, rhs: &Self) {
        *self = self.divide(rhs).quotient;
    }

    pub(super) fn rem_big_assign(&mut self, rhs: &Self) {
        *self = self.divide(rhs).remainder;
    }
}

impl<C: Cell> CheckedDiv for BigInteger<C> {
    fn checked_div(&self, v: &Self) -> Option<Self> {
        if v.is_zero() {
            None
        } else {
            Some(self.divide(v).quotient)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    type Big = BigInteger;
    type Big8 = BigInteger<u8>;

    fn check_u8(a: u128, b: u128) {
        let result = Big8::from(a).divide(&Big8::from(b));
        assert_eq!(result.quotient().to_u128(), Some(a / b), "{:#x} / {:#x}", a, b);
        assert_eq!(result.remainder().to_u128(), Some(a % b), "{:#x} % {:#x}", a, b);
    }

    #[test]
    fn small_division_test() {
        let result = Big::from(100u8).divide(&Big::from(7u8));
        assert_eq!(result.quotient(), &Big::from(14u8));
        assert_eq!(result.remainder(), &Big::from(2u8));
        assert!(result.has_remainder());

        let (q, r) = Big::from(42u8).divide(&Big::from(100u8)).into_parts();
        assert!(q.is_zero());
        assert_eq!(r, Big::from(42u8));

        assert!(!Big::from(49u8).divide(&Big::from(7u8)).has_remainder());
        assert_eq!(Big::from(1000u32) / Big::from(10u32), Big::from(100u32));
        assert_eq!(Big::from(1001u32) % Big::from(10u32), Big::one());
    }

    #[test]
    fn single_cell_path_test() {
        // 0xC3 does not fit in a half cell of a u8
        check_u8(0x1234_5678, 0xC3);
        check_u8(0xFFFF_FFFF_FFFF, 0xFF);
        check_u8(0xFFFF_FFFF_FFFF, 0x0F);

        let mut a = Big::from(u64::MAX);
        assert_eq!(a.div_cell(0x1_0001), (u64::MAX % 0x1_0001) as u32);
        assert_eq!(a, Big::from(u64::MAX / 0x1_0001));
        assert_eq!(Big::from(u64::MAX).rem_cell(0xFFFF_FFFF), 0);
        assert_eq!(Big8::from(1000u32).rem_cell(7), (1000 % 7) as u8);
    }

    #[test]
    fn normalized_division_test() {
        // shift 0: top bit of the divisor already set
        check_u8(0x1234_5678_9ABC, 0x8001);
        // shift 7: divisor top cell is 1
        check_u8(0x1234_5678_9ABC, 0x0123);
        check_u8(0xFFFF_FFFF_FFFF_FFFF, 0x0100);
        // equal lengths
        check_u8(0xFFFF, 0x8000);
        check_u8(0x1_0000, 0xFFFF);
        check_u8(0xABCD_EF01, 0xABCD_EF01);

        let a = Big::from(u128::MAX);
        let b = Big::from(0x1_0000_0001u64);
        let (q, r) = a.divide(&b).into_parts();
        assert_eq!(q.to_u128(), Some(u128::MAX / 0x1_0000_0001));
        assert_eq!(r.to_u128(), Some(u128::MAX % 0x1_0000_0001));
    }

    #[test]
    fn add_back_test() {
        // trial digits overshooting by one, caught after the multiply-subtract step
        check_u8(0xB8_92BC_F755, 0xF1_13CF);
        check_u8(0x7C_4EC7_694E, 0x17_6AF5);
        check_u8(0xDB_8D31_3E2A, 0xDF_098D);
    }

    #[test]
    fn wide_division_test() {
        let a = (Big::one() << 200) + Big::from(12345u32);
        let b = (Big::one() << 100) + Big::one();
        let (q, r) = a.divide(&b).into_parts();
        assert!(r < b);
        assert_eq!(&q * &b + &r, a);
    }

    #[test]
    fn checked_div_test() {
        assert_eq!(Big::from(9u8).checked_div(&Big::zero()), None);
        assert_eq!(Big::from(9u8).checked_div(&Big::from(2u8)), Some(Big::from(4u8)));
    }

    #[test]
    #[should_panic]
    fn division_by_zero_test() {
        let _ = Big::from(9u8) / Big::zero();
    }
}
