//! Binary memory images: fixed-width word decoding and MIF text output.
//!
//! Both halves are pure transforms. [`decode_words`] turns a raw byte stream
//! into addressed words; [`write_mif`] renders words as the textual
//! memory-initialization document hardware tooling consumes. Neither calls
//! into the ISA model.

mod decode;
mod endianness;
pub mod error;
mod mif;

pub use decode::decode_words;
pub use endianness::{Endianness, MAX_WORD_BYTES};
pub use error::MemImageError;
pub use mif::{Radix, write_mif};
