//! Text and raw binary encodings of [BigInteger].

use super::BigInteger;
use crate::cells::{CellStorage, FixedCells};
use crate::traits::Cell;
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;
use num_traits::{Num, Zero};
use std::io::{self, BufRead, Read, Write};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Text encodings understood by [BigInteger::write_text] and [BigInteger::read_text].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Decimal,
    /// Lower-case hexadecimal without prefix.
    HexaDecimal,
    /// Plain `0`/`1` digits without prefix.
    Binary,
    /// Exactly `n` binary digits of the `n` low bits, zero padded.
    FullBinary(usize),
    /// `ceil(n / 4)` hexadecimal digits of the `n` low bits, zero padded.
    FullHexaDecimal(usize),
    /// Every cell in decimal, most significant first, separated by one space.
    IntegerCell,
}

impl Default for TextFormat {
    fn default() -> Self {
        TextFormat::Decimal
    }
}

impl TextFormat {
    fn radix(self) -> u32 {
        match self {
            TextFormat::Decimal | TextFormat::IntegerCell => 10,
            TextFormat::HexaDecimal | TextFormat::FullHexaDecimal(_) => 16,
            TextFormat::Binary | TextFormat::FullBinary(_) => 2,
        }
    }
}

/// Malformed text or raw input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReadError {
    kind: ReadErrorKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// No digit where a number was expected.
    Empty,
    /// A character that is not a digit of the requested radix.
    InvalidDigit,
    /// The number was followed by unexpected characters.
    TrailingCharacters,
    /// A group of [TextFormat::IntegerCell] does not fit in a cell.
    CellOverflow,
    /// The raw encoding ended early.
    Truncated,
    ZeroDenominator,
    UnsupportedRadix,
    Io(io::ErrorKind),
}

impl ReadError {
    pub(crate) fn new(kind: ReadErrorKind) -> Self {
        log::debug!("read failed: {:?}", kind);
        ReadError { kind }
    }

    #[inline]
    pub fn kind(&self) -> ReadErrorKind {
        self.kind
    }
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => ReadError::new(ReadErrorKind::Truncated),
            kind => ReadError::new(ReadErrorKind::Io(kind)),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReadErrorKind::Empty => write!(f, "no digits to parse"),
            ReadErrorKind::InvalidDigit => write!(f, "invalid digit found"),
            ReadErrorKind::TrailingCharacters => write!(f, "unexpected characters after number"),
            ReadErrorKind::CellOverflow => write!(f, "cell value too large"),
            ReadErrorKind::Truncated => write!(f, "raw encoding is truncated"),
            ReadErrorKind::ZeroDenominator => write!(f, "zero denominator"),
            ReadErrorKind::UnsupportedRadix => write!(f, "radix must be within 2..=36"),
            ReadErrorKind::Io(kind) => write!(f, "i/o error: {:?}", kind),
        }
    }
}

impl std::error::Error for ReadError {}

#[inline]
pub(crate) fn peek<R: BufRead>(input: &mut R) -> Result<Option<u8>, ReadError> {
    Ok(input.fill_buf()?.first().copied())
}

pub(crate) fn skip_whitespace<R: BufRead>(input: &mut R) -> Result<(), ReadError> {
    while let Some(byte) = peek(input)? {
        if !byte.is_ascii_whitespace() {
            break;
        }
        input.consume(1);
    }
    Ok(())
}

// a space continues a cell list only when a digit is buffered right after it
fn at_cell_separator<R: BufRead>(input: &mut R) -> Result<bool, ReadError> {
    let buffer = input.fill_buf()?;
    Ok(buffer.len() >= 2 && buffer[0] == b' ' && buffer[1].is_ascii_digit())
}

// largest power of radix fitting in one cell, with its number of digits
fn radix_chunk<C: Cell>(radix: u32) -> (C, usize) {
    let (max, radix) = (C::max_value().as_u64(), radix as u64);
    let (mut power, mut digits) = (radix, 1);
    while power <= max / radix {
        power *= radix;
        digits += 1;
    }
    (C::from_u64_truncated(power), digits)
}

impl<C: Cell> BigInteger<C> {
    fn add_cell(&mut self, value: C) {
        if self.cells.add_cells(&FixedCells::from_cells([value])) {
            self.cells.push(C::one());
        }
    }

    /// Digits in `radix`, most significant first, by repeated division by the largest power of
    /// the radix fitting in a cell.
    pub fn to_str_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "radix {} out of range", radix);
        if self.is_zero() {
            return String::from("0");
        }

        let (chunk, chunk_digits) = radix_chunk::<C>(radix);
        let mut scratch = self.clone();
        let mut digits = Vec::with_capacity(self.bit_length() / 3 + 1);
        while !scratch.is_zero() {
            let mut rest = scratch.div_cell(chunk).as_u64();
            for _ in 0..chunk_digits {
                if scratch.is_zero() && rest == 0 {
                    break;
                }
                digits.push(DIGITS[(rest % radix as u64) as usize]);
                rest /= radix as u64;
            }
        }
        digits.iter().rev().map(|&d| char::from(d)).collect()
    }

    pub fn write_text<W: fmt::Write>(&self, out: &mut W, format: TextFormat) -> fmt::Result {
        match format {
            TextFormat::Decimal | TextFormat::HexaDecimal | TextFormat::Binary => {
                out.write_str(&self.to_str_radix(format.radix()))
            }
            TextFormat::FullBinary(len) => {
                for index in (0..len).rev() {
                    out.write_char(if self.bit(index) { '1' } else { '0' })?;
                }
                Ok(())
            }
            TextFormat::FullHexaDecimal(len) => {
                for digit in (0..(len + 3) / 4).rev() {
                    let width = (len - 4 * digit).min(4);
                    let value = self.value_at(4 * digit, width).as_u64();
                    out.write_char(char::from(DIGITS[value as usize]))?;
                }
                Ok(())
            }
            TextFormat::IntegerCell => {
                if self.is_zero() {
                    return out.write_char('0');
                }
                for (index, cell) in self.cells().iter().rev().enumerate() {
                    if index > 0 {
                        out.write_char(' ')?;
                    }
                    out.write_str(&cell.to_string())?;
                }
                Ok(())
            }
        }
    }

    pub fn to_text(&self, format: TextFormat) -> String {
        let mut text = String::new();
        // writing into a String cannot fail
        let _ = self.write_text(&mut text, format);
        text
    }

    // accumulate digits of `radix` until the first byte that is not one, which stays unread
    pub(crate) fn read_radix<R: BufRead>(input: &mut R, radix: u32) -> Result<Self, ReadError> {
        let factor = C::from_u64_truncated(radix as u64);
        let mut value = Self::zero();
        let mut count = 0usize;
        while let Some(byte) = peek(input)? {
            let digit = match char::from(byte).to_digit(radix) {
                Some(digit) => digit,
                None => break,
            };
            input.consume(1);
            value.mul_cell(factor);
            value.add_cell(C::from_u64_truncated(digit as u64));
            count += 1;
        }

        if count == 0 {
            Err(ReadError::new(ReadErrorKind::Empty))
        } else {
            Ok(value)
        }
    }

    fn read_integer_cells<R: BufRead>(input: &mut R) -> Result<Self, ReadError> {
        let max = C::max_value().as_u64();
        let mut value = Self::zero();
        let mut groups = 0usize;
        loop {
            let mut group = 0u64;
            let mut count = 0usize;
            while let Some(byte) = peek(input)? {
                if !byte.is_ascii_digit() {
                    break;
                }
                input.consume(1);
                group = group
                    .checked_mul(10)
                    .and_then(|g| g.checked_add((byte - b'0') as u64))
                    .filter(|&g| g <= max)
                    .ok_or_else(|| ReadError::new(ReadErrorKind::CellOverflow))?;
                count += 1;
            }
            if count == 0 {
                break;
            }
            value.shl_big(C::BITS);
            value.add_cell(C::from_u64_truncated(group));
            groups += 1;

            if !at_cell_separator(input)? {
                break;
            }
            input.consume(1);
        }

        if groups == 0 {
            Err(ReadError::new(ReadErrorKind::Empty))
        } else {
            Ok(value)
        }
    }

    /// Parse a number after optional leading whitespace. Reading stops at the first byte that
    /// cannot continue the number; that byte is left in `input`.
    pub fn read_text<R: BufRead>(input: &mut R, format: TextFormat) -> Result<Self, ReadError> {
        skip_whitespace(input)?;
        match format {
            TextFormat::IntegerCell => Self::read_integer_cells(input),
            _ => Self::read_radix(input, format.radix()),
        }
    }

    /// Parse a whole string, rejecting anything after the number.
    pub fn from_text(text: &str, format: TextFormat) -> Result<Self, ReadError> {
        let mut input = text.as_bytes();
        let value = Self::read_text(&mut input, format)?;
        if input.is_empty() {
            Ok(value)
        } else {
            Err(ReadError::new(ReadErrorKind::TrailingCharacters))
        }
    }

    /// Write the cell count as a little-endian `u32`, then every cell in little-endian order.
    pub fn write_raw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let count = u32::try_from(self.cells.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many cells"))?;
        let mut bytes = Vec::with_capacity(4 + self.cells.len() * C::BYTES);
        bytes.extend_from_slice(&count.to_le_bytes());
        for &cell in self.cells() {
            cell.write_le(&mut bytes);
        }
        out.write_all(&bytes)
    }

    pub fn read_raw<R: Read>(input: &mut R) -> Result<Self, ReadError> {
        let mut count = [0u8; 4];
        input.read_exact(&mut count)?;
        let count = u32::from_le_bytes(count) as usize;

        let mut buffer = vec![0u8; C::BYTES];
        let mut cells = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            input.read_exact(&mut buffer)?;
            cells.push(C::read_le(&buffer));
        }
        Ok(Self::from_cells(cells))
    }
}

impl<C: Cell> fmt::Display for BigInteger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_str_radix(10))
    }
}

impl<C: Cell> fmt::LowerHex for BigInteger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.to_str_radix(16))
    }
}

impl<C: Cell> fmt::Binary for BigInteger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0b", &self.to_str_radix(2))
    }
}

impl<C: Cell> fmt::Debug for BigInteger<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({:#x})", self)
    }
}

impl<C: Cell> FromStr for BigInteger<C> {
    type Err = ReadError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, TextFormat::Decimal)
    }
}

impl<C: Cell> Num for BigInteger<C> {
    type FromStrRadixErr = ReadError;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, ReadError> {
        if !(2..=36).contains(&radix) {
            return Err(ReadError::new(ReadErrorKind::UnsupportedRadix));
        }
        let mut input = str.as_bytes();
        let value = Self::read_radix(&mut input, radix)?;
        match input.first() {
            None => Ok(value),
            Some(_) => Err(ReadError::new(ReadErrorKind::InvalidDigit)),
        }
    }
}
