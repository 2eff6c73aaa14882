use super::BigInteger;
use crate::traits::Cell;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

// Every binary operator is funneled into one in-place method taking the right operand by
// reference, the value and reference forms only decide what gets cloned.
macro_rules! binop_impl {
    (impl $imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident, $inplace:ident) => {
        impl<C: Cell> $imp_assign<&BigInteger<C>> for BigInteger<C> {
            #[inline]
            fn $method_assign(&mut self, rhs: &BigInteger<C>) {
                self.$inplace(rhs)
            }
        }

        impl<C: Cell> $imp_assign<BigInteger<C>> for BigInteger<C> {
            #[inline]
            fn $method_assign(&mut self, rhs: BigInteger<C>) {
                self.$inplace(&rhs)
            }
        }

        impl<C: Cell> $imp<&BigInteger<C>> for BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(mut self, rhs: &BigInteger<C>) -> BigInteger<C> {
                self.$inplace(rhs);
                self
            }
        }

        impl<C: Cell> $imp<BigInteger<C>> for BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(mut self, rhs: BigInteger<C>) -> BigInteger<C> {
                self.$inplace(&rhs);
                self
            }
        }

        impl<C: Cell> $imp<&BigInteger<C>> for &BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(self, rhs: &BigInteger<C>) -> BigInteger<C> {
                let mut result = self.clone();
                result.$inplace(rhs);
                result
            }
        }

        impl<C: Cell> $imp<BigInteger<C>> for &BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(self, rhs: BigInteger<C>) -> BigInteger<C> {
                let mut result = self.clone();
                result.$inplace(&rhs);
                result
            }
        }
    };
}

binop_impl!(impl Add, add, AddAssign, add_assign, add_big);
binop_impl!(impl Sub, sub, SubAssign, sub_assign, sub_big);
binop_impl!(impl Mul, mul, MulAssign, mul_assign, mul_big_assign);
binop_impl!(impl Div, div, DivAssign, div_assign, div_big_assign);
binop_impl!(impl Rem, rem, RemAssign, rem_assign, rem_big_assign);
binop_impl!(impl BitAnd, bitand, BitAndAssign, bitand_assign, and_big);
binop_impl!(impl BitOr, bitor, BitOrAssign, bitor_assign, or_big);
binop_impl!(impl BitXor, bitxor, BitXorAssign, bitxor_assign, xor_big);

impl<C: Cell> BigInteger<C> {
    #[inline]
    fn mul_big_assign(&mut self, rhs: &Self) {
        *self = self.mul_big(rhs);
    }
}

macro_rules! shift_impl {
    (impl $imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident, $inplace:ident) => {
        impl<C: Cell> $imp_assign<usize> for BigInteger<C> {
            #[inline]
            fn $method_assign(&mut self, rhs: usize) {
                self.$inplace(rhs)
            }
        }

        impl<C: Cell> $imp<usize> for BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(mut self, rhs: usize) -> BigInteger<C> {
                self.$inplace(rhs);
                self
            }
        }

        impl<C: Cell> $imp<usize> for &BigInteger<C> {
            type Output = BigInteger<C>;
            #[inline]
            fn $method(self, rhs: usize) -> BigInteger<C> {
                let mut result = self.clone();
                result.$inplace(rhs);
                result
            }
        }
    };
}

shift_impl!(impl Shl, shl, ShlAssign, shl_assign, shl_big);
shift_impl!(impl Shr, shr, ShrAssign, shr_assign, shr_big);
