//! Randomized instruction-stream emitters for exercising the assembler.
//!
//! These are plain text generators: the only guarantee is that every emitted
//! line is syntactically valid assembly. A fixed seed reproduces a stream
//! exactly.

mod scalar;
mod vector;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub use scalar::emit_scalar_stream;
pub use vector::emit_vector_stream;

/// Number of architectural registers in each file.
pub const REGISTER_COUNT: u32 = 32;

/// Parameters shared by the scalar and vector emitters.
#[derive(Debug, Clone)]
pub struct StreamParams {
    pub count: usize,
    pub selection: Selection,
    pub seed: Option<u64>,
}

impl Default for StreamParams {
    fn default() -> Self {
        Self {
            count: 128,
            selection: Selection::All,
            seed: None,
        }
    }
}

pub(crate) fn stream_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Which registers the random operands may touch: every register, a
/// half-open `B:T` range, or an explicit comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Range(u32, u32),
    List(Vec<u32>),
}

impl Selection {
    pub(crate) fn choose<R: Rng>(&self, rng: &mut R) -> u32 {
        match self {
            Selection::All => rng.gen_range(0..REGISTER_COUNT),
            Selection::Range(bottom, top) => rng.gen_range(*bottom..*top),
            Selection::List(indices) => indices[rng.gen_range(0..indices.len())],
        }
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Selection::All);
        }
        if let Some((bottom, top)) = raw.split_once(':') {
            let bottom = parse_index(bottom)?;
            let top = parse_index(top)?;
            if top <= bottom {
                return Err(SelectionError {
                    token: raw.to_string(),
                });
            }
            return Ok(Selection::Range(bottom, top));
        }
        let indices = raw
            .split(',')
            .map(parse_index)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Selection::List(indices))
    }
}

fn parse_index(text: &str) -> Result<u32, SelectionError> {
    text.trim().parse::<u32>().map_err(|_| SelectionError {
        token: text.trim().to_string(),
    })
}

#[derive(Debug)]
pub struct SelectionError {
    token: String,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid register selection '{}': expected B:T or a comma-separated list",
            self.token
        )
    }
}

impl std::error::Error for SelectionError {}

/// Draws a random two's-complement value of the given bit width.
pub(crate) fn signed_immediate<R: Rng>(rng: &mut R, bits: u32) -> i64 {
    let raw = rng.gen_range(0..1u64 << bits);
    if raw >= 1 << (bits - 1) {
        raw as i64 - (1i64 << bits)
    } else {
        raw as i64
    }
}

/// Hex rendering with an explicit sign, `-0x2a` style.
pub(crate) fn hex_immediate(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}
