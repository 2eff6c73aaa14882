//! `num-exact` provides arbitrary precision unsigned integers and signed rationals built on
//! top of a pluggable cell storage, so that the same algorithms run on `u8` up to `u64` digits.

pub mod cells;
mod integer;
mod proptests;
mod rational;
pub mod traits;

pub use cells::{CellStorage, FixedCells, GrowableCells};
pub use integer::{
    BezoutResult, BigInteger, DivisionResult, ReadError, ReadErrorKind, TextFormat,
};
pub use rational::Rational;
pub use traits::{Approximation, Cell};
