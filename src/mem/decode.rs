//! Fixed-width word decoding of raw binary images.

use super::endianness::Endianness;
use super::error::MemImageError;

/// Validates that `word_bits` is a positive multiple of 8 no wider than the
/// 128-bit word representation, returning the chunk size in bytes.
pub(crate) fn word_bytes(word_bits: u32) -> Result<usize, MemImageError> {
    if word_bits == 0 || word_bits % 8 != 0 || word_bits > 128 {
        return Err(MemImageError::InvalidWordWidth { bits: word_bits });
    }
    Ok(word_bits as usize / 8)
}

/// Splits the byte stream into `word_bits / 8`-byte chunks and decodes each
/// as an unsigned word in the given byte order. A trailing partial chunk is
/// dropped. Words keep their read order, so index doubles as address.
pub fn decode_words(
    bytes: &[u8],
    word_bits: u32,
    endianness: Endianness,
) -> Result<Vec<u128>, MemImageError> {
    let chunk = word_bytes(word_bits)?;
    Ok(bytes
        .chunks_exact(chunk)
        .map(|chunk| endianness.decode(chunk))
        .collect())
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::decode_words;
    use crate::mem::Endianness;
    use crate::mem::error::MemImageError;

    #[test]
    fn decodes_little_endian_words() {
        let words = decode_words(&hex!("0a 00 00 00"), 32, Endianness::Little).expect("decode");
        assert_eq!(words, vec![10]);
    }

    #[test]
    fn decodes_big_endian_words() {
        let words =
            decode_words(&hex!("00 00 00 0a de ad be ef"), 32, Endianness::Big).expect("decode");
        assert_eq!(words, vec![10, 0xDEAD_BEEF]);
    }

    #[test]
    fn single_byte_word_round_trips() {
        let words = decode_words(&[0x1A], 8, Endianness::Little).expect("decode");
        assert_eq!(words, vec![26]);
    }

    #[test]
    fn trailing_partial_chunk_is_dropped() {
        let words = decode_words(&hex!("11 22 33 44 55 66"), 32, Endianness::Little)
            .expect("decode");
        assert_eq!(words, vec![0x4433_2211]);
    }

    #[test]
    fn word_count_matches_stream_length() {
        let stream = [0xABu8; 6 * 2];
        let words = decode_words(&stream, 16, Endianness::Big).expect("decode");
        assert_eq!(words.len(), 6);
        assert!(words.iter().all(|&w| w < 1 << 16));
    }

    #[test]
    fn empty_stream_decodes_to_no_words() {
        let words = decode_words(&[], 32, Endianness::Little).expect("decode");
        assert!(words.is_empty());
    }

    #[test]
    fn rejects_invalid_word_widths() {
        for bits in [0u32, 4, 12, 31, 136] {
            let err = decode_words(&[], bits, Endianness::Little).unwrap_err();
            assert!(matches!(err, MemImageError::InvalidWordWidth { bits: b } if b == bits));
        }
    }
}
