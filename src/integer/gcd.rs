use super::BigInteger;
use crate::traits::Cell;
use core::mem;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Coefficients of the Bezout identity of `(a, b)`.
///
/// With `u = multiplicand` and `v = source_multiplicand`, `a*u - b*v == pgcd` when
/// `is_this_positive()`, and `b*v - a*u == pgcd` otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BezoutResult<C: Cell = u32> {
    pgcd: BigInteger<C>,
    multiplicand: BigInteger<C>,
    source_multiplicand: BigInteger<C>,
    this_positive: bool,
}

impl<C: Cell> BezoutResult<C> {
    #[inline]
    pub fn pgcd(&self) -> &BigInteger<C> {
        &self.pgcd
    }

    /// Coefficient of the receiver `a`.
    #[inline]
    pub fn multiplicand(&self) -> &BigInteger<C> {
        &self.multiplicand
    }

    /// Coefficient of the argument `b`.
    #[inline]
    pub fn source_multiplicand(&self) -> &BigInteger<C> {
        &self.source_multiplicand
    }

    #[inline]
    pub fn is_this_positive(&self) -> bool {
        self.this_positive
    }
}

// Bezout coefficients alternate in sign, so they are tracked as a magnitude and a flag.
#[derive(Clone, Debug)]
struct SignedMagnitude<C: Cell> {
    magnitude: BigInteger<C>,
    negative: bool,
}

impl<C: Cell> SignedMagnitude<C> {
    fn new(magnitude: BigInteger<C>, negative: bool) -> Self {
        let negative = negative && !magnitude.is_zero();
        Self {
            magnitude,
            negative,
        }
    }

    /// `self - quotient * other`
    fn sub_mul(&self, quotient: &BigInteger<C>, other: &Self) -> Self {
        let product = quotient * &other.magnitude;
        if self.negative != other.negative {
            Self::new(&self.magnitude + product, self.negative)
        } else if self.magnitude >= product {
            Self::new(&self.magnitude - product, self.negative)
        } else {
            Self::new(product - &self.magnitude, !self.negative)
        }
    }
}

impl<C: Cell> BigInteger<C> {
    /// Greatest common divisor. `pgcd(a, 0) == a`.
    ///
    /// The larger value is reduced by division while the two magnitudes are far apart, and by
    /// plain subtraction once their bit lengths are within one of each other.
    pub fn pgcd(&self, other: &Self) -> Self {
        if other.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return other.clone();
        }

        let (mut fst, mut snd) = if self >= other {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };
        let (mut divisions, mut subtractions) = (0usize, 0usize);
        // fst >= snd > 0
        loop {
            if fst.bit_length() > snd.bit_length() + 1 {
                fst = fst.divide(&snd).into_parts().1;
                divisions += 1;
            } else {
                fst.sub_big(&snd);
                subtractions += 1;
            }
            if fst < snd {
                mem::swap(&mut fst, &mut snd);
            }
            if snd.is_zero() {
                break;
            }
        }
        log::trace!(
            "pgcd found after {} divisions and {} subtractions",
            divisions,
            subtractions
        );
        fst
    }

    /// Least common multiple, zero if either operand is zero.
    pub fn ppcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        (self / &self.pgcd(other)) * other
    }

    /// Extended Euclidean algorithm, see [BezoutResult] for the sign convention.
    ///
    /// The signs are reported for `(self, other)` in this order, whichever is larger.
    pub fn retrieve_bezout(&self, other: &Self) -> BezoutResult<C> {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (
            SignedMagnitude::new(Self::one(), false),
            SignedMagnitude::new(Self::zero(), false),
        );
        let (mut t0, mut t1) = (
            SignedMagnitude::new(Self::zero(), false),
            SignedMagnitude::new(Self::one(), false),
        );

        let mut steps = 0usize;
        while !r1.is_zero() {
            let (quotient, remainder) = r0.divide(&r1).into_parts();
            let s2 = s0.sub_mul(&quotient, &s1);
            let t2 = t0.sub_mul(&quotient, &t1);
            r0 = mem::replace(&mut r1, remainder);
            s0 = mem::replace(&mut s1, s2);
            t0 = mem::replace(&mut t1, t2);
            steps += 1;
        }
        log::trace!("bezout coefficients found after {} steps", steps);

        // s0 and t0 never share a strict sign
        let this_positive = !s0.negative && !s0.magnitude.is_zero();
        BezoutResult {
            pgcd: r0,
            multiplicand: s0.magnitude,
            source_multiplicand: t0.magnitude,
            this_positive,
        }
    }
}

impl<C: Cell> Integer for BigInteger<C> {
    #[inline]
    fn div_floor(&self, other: &Self) -> Self {
        self.divide(other).into_parts().0
    }

    #[inline]
    fn mod_floor(&self, other: &Self) -> Self {
        self.divide(other).into_parts().1
    }

    #[inline]
    fn gcd(&self, other: &Self) -> Self {
        self.pgcd(other)
    }

    #[inline]
    fn lcm(&self, other: &Self) -> Self {
        self.ppcm(other)
    }

    #[inline]
    fn divides(&self, other: &Self) -> bool {
        self.is_multiple_of(other)
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        !self.divide(other).has_remainder()
    }

    #[inline]
    fn is_even(&self) -> bool {
        !self.bit(0)
    }

    #[inline]
    fn is_odd(&self) -> bool {
        self.bit(0)
    }

    #[inline]
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        self.divide(other).into_parts()
    }
}
