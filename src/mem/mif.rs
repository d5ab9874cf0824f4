//! Memory-initialization-format (MIF) text output.
//!
//! The field names and punctuation here are consumed by hardware memory
//! tooling and must not change. `WIDTH` is bits per word and `DEPTH` is the
//! word count; the two stay separate parameters the whole way through.

use std::io;
use std::str::FromStr;

use super::decode::word_bytes;
use super::endianness::mask_bits;
use super::error::MemImageError;

/// Numeric base used to render addresses and data values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Radix {
    Hex,
    Bin,
}

impl Radix {
    #[inline]
    pub const fn base(self) -> u128 {
        match self {
            Radix::Hex => 16,
            Radix::Bin => 2,
        }
    }

    const fn header_token(self) -> &'static str {
        match self {
            Radix::Hex => "HEX",
            Radix::Bin => "BIN",
        }
    }

    /// Renders `value` left-zero-padded to `width` digits.
    fn render(self, value: u128, width: usize) -> String {
        match self {
            Radix::Hex => format!("{value:0width$x}"),
            Radix::Bin => format!("{value:0width$b}"),
        }
    }
}

impl FromStr for Radix {
    type Err = MemImageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "hex" => Ok(Radix::Hex),
            "bin" => Ok(Radix::Bin),
            other => Err(MemImageError::InvalidRadix {
                token: other.to_string(),
            }),
        }
    }
}

/// Digits needed to render `maxval` in the given base. Integer arithmetic
/// only, so the width is exact for every value including powers of the base.
fn digit_width(radix: Radix, maxval: u128) -> usize {
    let base = radix.base();
    let mut digits = 1;
    let mut rest = maxval / base;
    while rest > 0 {
        digits += 1;
        rest /= base;
    }
    digits
}

/// Writes the memory image as a MIF document. Addresses run `0..words.len()`
/// in word order; every address and data value is zero-padded to the digit
/// count of the widest value in its column.
pub fn write_mif<W: io::Write>(
    out: &mut W,
    words: &[u128],
    word_bits: u32,
    address_radix: Radix,
    data_radix: Radix,
) -> Result<(), MemImageError> {
    word_bytes(word_bits)?;
    let address_width = digit_width(address_radix, words.len().saturating_sub(1) as u128);
    let data_width = digit_width(data_radix, mask_bits(word_bits));

    writeln!(out, "WIDTH = {word_bits};")?;
    writeln!(out, "DEPTH = {};", words.len())?;
    writeln!(out, "ADDRESS_RADIX = {};", address_radix.header_token())?;
    writeln!(out, "DATA_RADIX = {};", data_radix.header_token())?;
    writeln!(out, "CONTENT")?;
    writeln!(out, "BEGIN")?;
    writeln!(out)?;

    for (address, &data) in words.iter().enumerate() {
        writeln!(
            out,
            "{} : {};",
            address_radix.render(address as u128, address_width),
            data_radix.render(data, data_width)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "END;")?;
    Ok(())
}
