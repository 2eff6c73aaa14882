//! Exact signed fractions over [BigInteger].
//!
//! A [Rational] is a sign flag with an unsigned numerator and a nonzero unsigned denominator.
//! Arithmetic only performs the cheap reduction of [Rational::simplify], so the fraction is not
//! kept in lowest terms between operations; [Rational::normalize] forces it.

use crate::integer::format::{peek, skip_whitespace};
use crate::integer::{BigInteger, ReadError, ReadErrorKind, TextFormat};
use crate::traits::{Approximation, Cell};
use core::cmp::Ordering;
use core::fmt;
use core::mem;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use core::str::FromStr;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{Float, FromPrimitive, Num, One, Signed, ToPrimitive, Zero};
use std::io::{self, BufRead, Read, Write};

#[derive(Clone, Debug)]
pub struct Rational<C: Cell = u32> {
    negative: bool,
    numerator: BigInteger<C>,
    denominator: BigInteger<C>,
}

/// `numerator / denominator` when both are at least 2, the numerator is not shorter than the
/// denominator and the division is exact.
fn exact_quotient<C: Cell>(
    numerator: &BigInteger<C>,
    denominator: &BigInteger<C>,
) -> Option<BigInteger<C>> {
    let two = BigInteger::from(2u8);
    if *numerator < two
        || *denominator < two
        || numerator.bit_length() < denominator.bit_length()
    {
        return None;
    }
    let (quotient, remainder) = numerator.divide(denominator).into_parts();
    if remainder.is_zero() {
        Some(quotient)
    } else {
        None
    }
}

impl<C: Cell> Rational<C> {
    /// Create `numerator / denominator` as given, without any reduction.
    ///
    /// # Panics
    /// If the denominator is zero.
    pub fn new(numerator: BigInteger<C>, denominator: BigInteger<C>) -> Self {
        Self::new_signed(false, numerator, denominator)
    }

    /// Create `-(numerator / denominator)` if `negative`, without any reduction.
    pub fn new_signed(negative: bool, numerator: BigInteger<C>, denominator: BigInteger<C>) -> Self {
        assert!(!denominator.is_zero(), "zero denominator");
        Rational {
            negative,
            numerator,
            denominator,
        }
    }

    #[inline]
    pub fn numerator(&self) -> &BigInteger<C> {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &BigInteger<C> {
        &self.denominator
    }

    /// Value of the sign flag. A zero may carry either flag.
    #[inline]
    pub fn has_negative_flag(&self) -> bool {
        self.negative
    }

    /// Change the sign in place.
    #[inline]
    pub fn opposite(&mut self) {
        self.negative = !self.negative;
    }

    /// Replace by the reciprocal. Inverting zero is a precondition failure.
    pub fn inverse(&mut self) {
        assert!(!self.numerator.is_zero(), "inverse of zero");
        mem::swap(&mut self.numerator, &mut self.denominator);
        self.simplify();
    }

    /// Opportunistic reduction: when one of numerator or denominator is an exact multiple of the
    /// other, divide it out. This does not guarantee lowest terms.
    pub fn simplify(&mut self) {
        if let Some(quotient) = exact_quotient(&self.numerator, &self.denominator) {
            self.numerator = quotient;
            self.denominator = BigInteger::one();
        } else if let Some(quotient) = exact_quotient(&self.denominator, &self.numerator) {
            self.numerator = BigInteger::one();
            self.denominator = quotient;
        }
    }

    /// Reduce to lowest terms. Zero becomes a positive `0/1`.
    pub fn normalize(&mut self) {
        if self.numerator.is_zero() {
            self.negative = false;
            self.denominator = BigInteger::one();
            return;
        }
        let pgcd = self.numerator.pgcd(&self.denominator);
        if !pgcd.is_one() {
            self.numerator /= &pgcd;
            self.denominator /= &pgcd;
        }
    }

    /// A normalized copy.
    pub fn normalized(&self) -> Self {
        let mut result = self.clone();
        result.normalize();
        result
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one() || self.numerator.is_multiple_of(&self.denominator)
    }

    /// Integer part truncated toward zero, keeping the sign.
    pub fn trunc(&self) -> Self {
        Rational {
            negative: self.negative,
            numerator: self.cast_to_integer(),
            denominator: BigInteger::one(),
        }
    }

    /// Magnitude of the integer part, exact when the fraction is an integer.
    pub fn to_integer(&self) -> Approximation<BigInteger<C>> {
        let (quotient, remainder) = self.numerator.divide(&self.denominator).into_parts();
        if remainder.is_zero() {
            Approximation::Exact(quotient)
        } else {
            Approximation::Approximated(quotient)
        }
    }

    /// Magnitude of the integer part, truncated toward zero.
    pub fn cast_to_integer(&self) -> BigInteger<C> {
        if self.numerator.is_zero() {
            return BigInteger::zero();
        }
        self.to_integer().value()
    }

    /// Magnitude of a value known to be an integer.
    ///
    /// # Panics
    /// If the value is not an integer.
    pub fn get_integer(&self) -> BigInteger<C> {
        match self.to_integer() {
            Approximation::Exact(value) => value,
            Approximation::Approximated(_) => panic!("{} is not an integer", self),
        }
    }

    /// Unsigned magnitude as a `num_rational::Ratio`.
    pub fn to_ratio(&self) -> Ratio<BigInteger<C>> {
        Ratio::new_raw(self.numerator.clone(), self.denominator.clone())
    }

    // self += (-1)^other_negative * |other|
    fn add_signed(&mut self, other: &Self, other_negative: bool) {
        if self.denominator == other.denominator {
            if self.negative == other_negative {
                self.numerator += &other.numerator;
            } else if self.numerator >= other.numerator {
                self.numerator -= &other.numerator;
            } else {
                self.numerator = &other.numerator - &self.numerator;
                self.negative = !self.negative;
            }
        } else {
            let lhs = &self.numerator * &other.denominator;
            let rhs = &other.numerator * &self.denominator;
            self.denominator *= &other.denominator;
            if self.negative == other_negative {
                self.numerator = lhs + rhs;
            } else if lhs >= rhs {
                self.numerator = lhs - rhs;
            } else {
                self.numerator = rhs - lhs;
                self.negative = !self.negative;
            }
        }
        self.simplify();
    }

    fn add_rational(&mut self, other: &Self) {
        self.add_signed(other, other.negative)
    }

    fn sub_rational(&mut self, other: &Self) {
        self.add_signed(other, !other.negative)
    }

    fn mul_rational(&mut self, other: &Self) {
        // (a/b) * (c/d), cancelling b against c or d against a when one divides the other
        if let Some(factor) = exact_quotient(&other.numerator, &self.denominator) {
            self.numerator *= factor;
            self.denominator = other.denominator.clone();
        } else if let Some(factor) = exact_quotient(&self.numerator, &other.denominator) {
            self.numerator = factor * &other.numerator;
        } else {
            self.numerator *= &other.numerator;
            self.denominator *= &other.denominator;
        }
        self.negative = self.negative != other.negative;
        self.simplify();
    }

    fn div_rational(&mut self, other: &Self) {
        assert!(!other.numerator.is_zero(), "division by zero");
        // (a/b) / (c/d) = (a*d) / (b*c)
        if let Some(factor) = exact_quotient(&other.denominator, &self.denominator) {
            self.numerator *= factor;
            self.denominator = other.numerator.clone();
        } else if let Some(factor) = exact_quotient(&self.numerator, &other.numerator) {
            self.numerator = factor * &other.denominator;
        } else {
            self.numerator *= &other.denominator;
            self.denominator *= &other.numerator;
        }
        self.negative = self.negative != other.negative;
        self.simplify();
    }

    // truncated remainder, carrying the sign of the dividend
    fn rem_rational(&mut self, other: &Self) {
        let quotient = (&*self / other).trunc();
        self.sub_rational(&(quotient * other));
    }

    // [+|-] integer [/ integer], the integers being read by `read_integer`
    fn read_parts<R, F>(input: &mut R, mut read_integer: F) -> Result<Self, ReadError>
    where
        R: BufRead,
        F: FnMut(&mut R) -> Result<BigInteger<C>, ReadError>,
    {
        skip_whitespace(input)?;
        let negative = match peek(input)? {
            Some(b'-') => {
                input.consume(1);
                true
            }
            Some(b'+') => {
                input.consume(1);
                false
            }
            _ => false,
        };
        skip_whitespace(input)?;
        let numerator = read_integer(input)?;
        skip_whitespace(input)?;
        let denominator = if peek(input)? == Some(b'/') {
            input.consume(1);
            skip_whitespace(input)?;
            read_integer(input)?
        } else {
            BigInteger::one()
        };

        if denominator.is_zero() {
            return Err(ReadError::new(ReadErrorKind::ZeroDenominator));
        }
        let mut result = Rational {
            negative,
            numerator,
            denominator,
        };
        result.simplify();
        Ok(result)
    }

    /// Read `[+|-]numerator[/denominator]` with both integers in `format`. A missing denominator
    /// means 1. The value is simplified after reading.
    pub fn read_text<R: BufRead>(input: &mut R, format: TextFormat) -> Result<Self, ReadError> {
        Self::read_parts(input, |input| BigInteger::read_text(input, format))
    }

    pub fn from_text(text: &str, format: TextFormat) -> Result<Self, ReadError> {
        let mut input = text.as_bytes();
        let value = Self::read_text(&mut input, format)?;
        if input.is_empty() {
            Ok(value)
        } else {
            Err(ReadError::new(ReadErrorKind::TrailingCharacters))
        }
    }

    /// Write `[-]numerator/denominator` in lowest terms.
    pub fn write_text<W: fmt::Write>(&self, out: &mut W, format: TextFormat) -> fmt::Result {
        let value = self.normalized();
        if value.negative {
            out.write_char('-')?;
        }
        value.numerator.write_text(out, format)?;
        out.write_char('/')?;
        value.denominator.write_text(out, format)
    }

    pub fn to_text(&self, format: TextFormat) -> String {
        let mut text = String::new();
        let _ = self.write_text(&mut text, format);
        text
    }

    /// One sign byte followed by the raw numerator and denominator, in lowest terms.
    pub fn write_raw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let value = self.normalized();
        out.write_all(&[value.negative as u8])?;
        value.numerator.write_raw(out)?;
        value.denominator.write_raw(out)
    }

    pub fn read_raw<R: Read>(input: &mut R) -> Result<Self, ReadError> {
        let mut sign = [0u8; 1];
        input.read_exact(&mut sign)?;
        let numerator = BigInteger::read_raw(input)?;
        let denominator = BigInteger::read_raw(input)?;
        if denominator.is_zero() {
            return Err(ReadError::new(ReadErrorKind::ZeroDenominator));
        }
        Ok(Rational {
            negative: sign[0] != 0,
            numerator,
            denominator,
        })
    }
}

impl<C: Cell> Default for Rational<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: Cell> From<BigInteger<C>> for Rational<C> {
    fn from(value: BigInteger<C>) -> Self {
        Self::new(value, BigInteger::one())
    }
}

impl<C: Cell> From<i64> for Rational<C> {
    fn from(value: i64) -> Self {
        Self::new_signed(
            value < 0,
            BigInteger::from(value.unsigned_abs()),
            BigInteger::one(),
        )
    }
}

impl<C: Cell> From<Ratio<i64>> for Rational<C> {
    fn from(value: Ratio<i64>) -> Self {
        let (numer, denom): (i64, i64) = value.into();
        Self::new_signed(
            (numer < 0) != (denom < 0),
            BigInteger::from(numer.unsigned_abs()),
            BigInteger::from(denom.unsigned_abs()),
        )
    }
}

impl<C: Cell> From<Ratio<u64>> for Rational<C> {
    fn from(value: Ratio<u64>) -> Self {
        let (numer, denom): (u64, u64) = value.into();
        Self::new(BigInteger::from(numer), BigInteger::from(denom))
    }
}

impl<C: Cell> PartialEq for Rational<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Cell> Eq for Rational<C> {}

impl<C: Cell> PartialOrd for Rational<C> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cell> Ord for Rational<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // zero compares equal whatever its sign flag
        let lhs_negative = self.negative && !self.numerator.is_zero();
        let rhs_negative = other.negative && !other.numerator.is_zero();
        if lhs_negative != rhs_negative {
            return if lhs_negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let fst = &self.numerator * &other.denominator;
        let snd = &other.numerator * &self.denominator;
        if lhs_negative {
            snd.cmp(&fst)
        } else {
            fst.cmp(&snd)
        }
    }
}

impl<C: Cell> fmt::Display for Rational<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, TextFormat::Decimal)
    }
}

impl<C: Cell> FromStr for Rational<C> {
    type Err = ReadError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, TextFormat::Decimal)
    }
}

macro_rules! arith_impl {
    (impl $imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident, $inplace:ident) => {
        impl<C: Cell> $imp_assign<&Rational<C>> for Rational<C> {
            #[inline]
            fn $method_assign(&mut self, rhs: &Rational<C>) {
                self.$inplace(rhs)
            }
        }

        impl<C: Cell> $imp_assign<Rational<C>> for Rational<C> {
            #[inline]
            fn $method_assign(&mut self, rhs: Rational<C>) {
                self.$inplace(&rhs)
            }
        }

        impl<C: Cell> $imp<&Rational<C>> for Rational<C> {
            type Output = Rational<C>;
            #[inline]
            fn $method(mut self, rhs: &Rational<C>) -> Rational<C> {
                self.$inplace(rhs);
                self
            }
        }

        impl<C: Cell> $imp<Rational<C>> for Rational<C> {
            type Output = Rational<C>;
            #[inline]
            fn $method(mut self, rhs: Rational<C>) -> Rational<C> {
                self.$inplace(&rhs);
                self
            }
        }

        impl<C: Cell> $imp<&Rational<C>> for &Rational<C> {
            type Output = Rational<C>;
            #[inline]
            fn $method(self, rhs: &Rational<C>) -> Rational<C> {
                let mut result = self.clone();
                result.$inplace(rhs);
                result
            }
        }

        impl<C: Cell> $imp<Rational<C>> for &Rational<C> {
            type Output = Rational<C>;
            #[inline]
            fn $method(self, rhs: Rational<C>) -> Rational<C> {
                let mut result = self.clone();
                result.$inplace(&rhs);
                result
            }
        }
    };
}

arith_impl!(impl Add, add, AddAssign, add_assign, add_rational);
arith_impl!(impl Sub, sub, SubAssign, sub_assign, sub_rational);
arith_impl!(impl Mul, mul, MulAssign, mul_assign, mul_rational);
arith_impl!(impl Div, div, DivAssign, div_assign, div_rational);
arith_impl!(impl Rem, rem, RemAssign, rem_assign, rem_rational);

impl<C: Cell> Neg for Rational<C> {
    type Output = Rational<C>;
    #[inline]
    fn neg(mut self) -> Rational<C> {
        self.opposite();
        self
    }
}

impl<C: Cell> Neg for &Rational<C> {
    type Output = Rational<C>;
    #[inline]
    fn neg(self) -> Rational<C> {
        -self.clone()
    }
}

impl<C: Cell> Zero for Rational<C> {
    #[inline]
    fn zero() -> Self {
        Self::new(BigInteger::zero(), BigInteger::one())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl<C: Cell> One for Rational<C> {
    #[inline]
    fn one() -> Self {
        Self::new(BigInteger::one(), BigInteger::one())
    }
    #[inline]
    fn is_one(&self) -> bool {
        !self.negative && self.numerator == self.denominator
    }
}

impl<C: Cell> Num for Rational<C> {
    type FromStrRadixErr = ReadError;

    /// Parse `[+|-]numerator[/denominator]` with both integers in `radix`.
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, ReadError> {
        if !(2..=36).contains(&radix) {
            return Err(ReadError::new(ReadErrorKind::UnsupportedRadix));
        }
        let mut input = str.as_bytes();
        let value = Self::read_parts(&mut input, |input| BigInteger::read_radix(input, radix))?;
        if input.is_empty() {
            Ok(value)
        } else {
            Err(ReadError::new(ReadErrorKind::InvalidDigit))
        }
    }
}

impl<C: Cell> Signed for Rational<C> {
    #[inline]
    fn abs(&self) -> Self {
        Rational {
            negative: false,
            ..self.clone()
        }
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero()
        } else {
            self - other
        }
    }

    fn signum(&self) -> Self {
        if self.numerator.is_zero() {
            Self::zero()
        } else if self.negative {
            -Self::one()
        } else {
            Self::one()
        }
    }

    #[inline]
    fn is_positive(&self) -> bool {
        !self.negative && !self.numerator.is_zero()
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.negative && !self.numerator.is_zero()
    }
}

impl<C: Cell> FromPrimitive for Rational<C> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(BigInteger::from(n)))
    }

    /// Exact conversion of a finite float.
    fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }
        let (mantissa, exponent, sign) = Float::integer_decode(n);
        let mantissa = BigInteger::from(mantissa);
        let mut result = if exponent >= 0 {
            Self::from(mantissa << exponent as usize)
        } else {
            Self::new(mantissa, BigInteger::one() << (-exponent) as usize)
        };
        result.negative = sign < 0;
        result.normalize();
        Some(result)
    }
}

impl<C: Cell> ToPrimitive for Rational<C> {
    fn to_i64(&self) -> Option<i64> {
        let magnitude = self.cast_to_integer().to_u64()?;
        if self.negative {
            if magnitude == i64::MIN.unsigned_abs() {
                Some(i64::MIN)
            } else {
                magnitude.to_i64().map(|v| -v)
            }
        } else {
            magnitude.to_i64()
        }
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        self.cast_to_integer().to_u64()
    }

    /// Nearest float, computed from a quotient carrying 65 significant bits so that huge
    /// numerators and denominators do not overflow on their own.
    fn to_f64(&self) -> Option<f64> {
        if self.numerator.is_zero() {
            return Some(0.);
        }
        let (numerator_bits, denominator_bits) = (
            self.numerator.bit_length() as i64,
            self.denominator.bit_length() as i64,
        );
        let shift = denominator_bits + 65 - numerator_bits;
        let quotient = if shift >= 0 {
            (&self.numerator << shift as usize) / &self.denominator
        } else {
            &self.numerator / (&self.denominator << (-shift) as usize)
        };
        let value = scale_by_power_of_two(quotient.to_f64()?, -shift);
        Some(if self.negative { -value } else { value })
    }
}

// value * 2^exponent, in steps that keep every factor representable
fn scale_by_power_of_two(mut value: f64, mut exponent: i64) -> f64 {
    const STEP: i64 = 1000;
    while exponent > STEP && value.is_finite() {
        value *= 2f64.powi(STEP as i32);
        exponent -= STEP;
    }
    while exponent < -STEP && value != 0. {
        value *= 2f64.powi(-STEP as i32);
        exponent += STEP;
    }
    value * 2f64.powi(exponent as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Big = BigInteger;
    type Rat = Rational;

    fn rat(numer: i64, denom: i64) -> Rat {
        Rat::from(Ratio::new_raw(numer, denom))
    }

    fn parts(value: &Rat) -> (bool, u64, u64) {
        (
            value.has_negative_flag(),
            value.numerator().to_u64().unwrap(),
            value.denominator().to_u64().unwrap(),
        )
    }

    #[test]
    fn normalize_test() {
        let mut value = rat(6, 8);
        value.normalize();
        assert_eq!(parts(&value), (false, 3, 4));
        assert_eq!(value, rat(3, 4));

        let mut again = value.clone();
        again.normalize();
        assert_eq!(parts(&again), parts(&value));

        let mut zero = rat(0, -5);
        zero.normalize();
        assert_eq!(parts(&zero), (false, 0, 1));
    }

    #[test]
    fn simplify_test() {
        let mut value = rat(6, 3);
        value.simplify();
        assert_eq!(parts(&value), (false, 2, 1));

        let mut value = rat(3, 6);
        value.simplify();
        assert_eq!(parts(&value), (false, 1, 2));

        // not an exact multiple, left alone
        let mut value = rat(4, 6);
        value.simplify();
        assert_eq!(parts(&value), (false, 4, 6));

        let mut value = rat(1, 1);
        value.simplify();
        assert_eq!(parts(&value), (false, 1, 1));
    }

    #[test]
    fn add_sub_test() {
        let sum = rat(1, 2) + rat(1, 3);
        assert_eq!(sum, rat(5, 6));
        assert_eq!(parts(&sum), (false, 5, 6));

        assert_eq!(rat(1, 3) - rat(1, 2), rat(-1, 6));
        assert_eq!(rat(3, 7) - rat(5, 7), rat(-2, 7));
        assert_eq!(rat(-3, 7) + rat(5, 7), rat(2, 7));
        assert_eq!(rat(-1, 2) - rat(1, 2), rat(-1, 1));
        assert!((rat(1, 2) - rat(2, 4)).is_zero());

        let mut value = rat(1, 4);
        value += &rat(3, 4);
        assert!(value.is_one());
        value -= rat(5, 2);
        assert_eq!(value, rat(-3, 2));
    }

    #[test]
    fn mul_div_test() {
        assert_eq!(rat(2, 3) * rat(3, 4), rat(1, 2));
        assert_eq!(rat(4, 3) * rat(5, 2), rat(10, 3));
        assert_eq!(rat(-2, 5) * rat(7, 3), rat(-14, 15));
        assert_eq!(rat(-2, 5) * rat(-5, 2), rat(1, 1));

        assert_eq!(rat(1, 2) / rat(1, 4), rat(2, 1));
        assert_eq!(rat(6, 5) / rat(3, 7), rat(14, 5));
        assert_eq!(rat(2, 3) / rat(-4, 9), rat(-3, 2));
        assert_eq!(&rat(5, 7) / &rat(5, 7), Rat::one());
    }

    #[test]
    #[should_panic]
    fn division_by_zero_test() {
        let _ = rat(1, 2) / Rat::zero();
    }

    #[test]
    #[should_panic]
    fn zero_denominator_test() {
        Rat::new(Big::one(), Big::zero());
    }

    #[test]
    fn compare_test() {
        assert!(rat(-1, 2) < rat(1, 3));
        assert!(rat(1, 3) < rat(1, 2));
        assert!(rat(-1, 2) < rat(-1, 3));
        assert!(rat(0, 1) < rat(1, 1000));
        assert_eq!(rat(2, 4), rat(1, 2));
        assert_eq!(rat(0, 1), -rat(0, 3));
        assert_eq!(rat(7, 3).max(rat(9, 4)), rat(7, 3));
    }

    #[test]
    fn integer_extraction_test() {
        assert!(rat(6, 3).is_integer());
        assert!(!rat(7, 3).is_integer());
        assert_eq!(rat(7, 3).to_integer(), Approximation::Approximated(Big::from(2u8)));
        assert_eq!(rat(9, 3).to_integer(), Approximation::Exact(Big::from(3u8)));
        assert_eq!(rat(-7, 2).cast_to_integer(), Big::from(3u8));
        assert_eq!(rat(-8, 2).get_integer(), Big::from(4u8));
        assert_eq!(rat(-7, 2).trunc(), rat(-3, 1));
        assert_eq!(rat(-7, 2).to_i64(), Some(-3));
        assert_eq!(rat(7, 2).to_u64(), Some(3));
        assert_eq!(rat(-7, 2).to_u64(), None);
    }

    #[test]
    #[should_panic]
    fn get_integer_of_fraction_test() {
        rat(7, 2).get_integer();
    }

    #[test]
    fn opposite_inverse_test() {
        let mut value = rat(3, 4);
        value.opposite();
        assert_eq!(value, rat(-3, 4));
        value.inverse();
        assert_eq!(value, rat(-4, 3));

        let mut value = rat(1, 5);
        value.inverse();
        assert_eq!(parts(&value), (false, 5, 1));
    }

    #[test]
    fn text_test() {
        assert_eq!(rat(-5, 6).to_string(), "-5/6");
        assert_eq!(rat(6, 8).to_string(), "3/4");
        assert_eq!(rat(0, -8).to_string(), "0/1");
        assert_eq!(rat(255, 16).to_text(TextFormat::HexaDecimal), "ff/10");

        assert_eq!("-5/6".parse::<Rat>().unwrap(), rat(-5, 6));
        assert_eq!(" + 12 / 4".parse::<Rat>().unwrap(), rat(3, 1));
        assert_eq!("7".parse::<Rat>().unwrap(), rat(7, 1));
        assert_eq!(
            "1/0".parse::<Rat>().unwrap_err().kind(),
            ReadErrorKind::ZeroDenominator
        );
        assert_eq!(
            "1/".parse::<Rat>().unwrap_err().kind(),
            ReadErrorKind::Empty
        );

        let mut input: &[u8] = b"-3/9)";
        let value = Rat::read_text(&mut input, TextFormat::Decimal).unwrap();
        assert_eq!(value, rat(-1, 3));
        assert_eq!(input, b")");
    }

    #[test]
    fn from_str_radix_test() {
        assert_eq!(Rat::from_str_radix("-ff/10", 16).unwrap(), rat(-255, 16));
        assert_eq!(Rat::from_str_radix("101", 2).unwrap(), rat(5, 1));
        assert!(Rat::from_str_radix("12/5", 4).is_err());
    }

    #[test]
    fn raw_test() {
        let mut bytes = Vec::new();
        rat(-10, 12).write_raw(&mut bytes).unwrap();
        assert_eq!(
            bytes,
            vec![1, 1, 0, 0, 0, 5, 0, 0, 0, 1, 0, 0, 0, 6, 0, 0, 0]
        );
        assert_eq!(Rat::read_raw(&mut bytes.as_slice()).unwrap(), rat(-5, 6));

        let zero_denominator: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            Rat::read_raw(&mut &zero_denominator[..]).unwrap_err().kind(),
            ReadErrorKind::ZeroDenominator
        );
        let truncated: &[u8] = &[0, 1, 0, 0, 0];
        assert_eq!(
            Rat::read_raw(&mut &truncated[..]).unwrap_err().kind(),
            ReadErrorKind::Truncated
        );
    }

    #[test]
    fn num_traits_test() {
        assert_eq!(rat(-3, 4).abs(), rat(3, 4));
        assert_eq!(rat(-3, 4).signum(), rat(-1, 1));
        assert!(rat(0, 1).signum().is_zero());
        assert!(rat(-3, 4).is_negative());
        assert!(!(-Rat::zero()).is_negative());
        assert_eq!(rat(3, 4).abs_sub(&rat(1, 4)), rat(1, 2));
        assert!(rat(1, 4).abs_sub(&rat(3, 4)).is_zero());

        assert_eq!(Rat::from_f64(0.75), Some(rat(3, 4)));
        assert_eq!(Rat::from_f64(-2.5), Some(rat(-5, 2)));
        assert_eq!(Rat::from_f64(1024.0), Some(rat(1024, 1)));
        assert_eq!(Rat::from_f64(f64::NAN), None);
        assert_eq!(rat(-5, 2).to_f64(), Some(-2.5));
        assert_eq!(rat(1, 3).to_f64(), Some(1. / 3.));
        assert_eq!(rat(0, 7).to_f64(), Some(0.));

        assert_eq!(rat(7, 2) % rat(1, 1), rat(1, 2));
        assert_eq!(rat(-7, 2) % rat(1, 1), rat(-1, 2));
        assert_eq!(Rat::default(), Rat::zero());
    }

    #[test]
    fn huge_parts_to_f64_test() {
        let value = Rat::new(Big::one() << 1100, Big::one() << 1099);
        assert_eq!(value.to_f64(), Some(2.));

        let value = Rat::new_signed(true, Big::from(3u8) << 2000, Big::one() << 2000);
        assert_eq!(value.to_f64(), Some(-3.));

        assert_eq!(Rat::new(Big::one(), Big::one() << 2000).to_f64(), Some(0.));
        assert_eq!(Rat::new(Big::one() << 2000, Big::one()).to_f64(), Some(f64::INFINITY));
        assert_eq!(Rat::new(Big::one(), Big::one() << 1070).to_f64(), Some(f64::from_bits(1 << 4)));
    }

    #[test]
    fn ratio_conversion_test() {
        assert_eq!(rat(3, -4), rat(-3, 4));
        assert_eq!(Rat::from(Ratio::new(10u64, 4)), rat(5, 2));
        let ratio = rat(-6, 4).to_ratio();
        assert_eq!(ratio.numer(), &Big::from(6u8));
        assert_eq!(ratio.denom(), &Big::from(4u8));
    }

    #[test]
    fn narrow_cells_test() {
        let a: Rational<u8> = "123456789/1000".parse().unwrap();
        let b: Rational<u8> = "-987654321/77".parse().unwrap();
        let sum = &a + &b;
        assert_eq!(sum.to_string(), "-978148148247/77000");
        assert_eq!(&sum - &b, a);
    }
}
