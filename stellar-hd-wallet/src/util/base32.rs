//! RFC 4648 base32, upper case, without padding.
//!
//! The decoder is strict: it only accepts the canonical output of
//! the encoder. Lower case symbols, padding characters, impossible
//! lengths and non zero trailing bits are all rejected so that a
//! given byte string has exactly one textual representation.
//!
//! ```
//! use stellar_hd_wallet::util::base32::{encode, decode};
//!
//! assert_eq!(encode(b"foobar"), "MZXW6YTBOI");
//! assert_eq!(decode("MZXW6YTBOI").unwrap(), b"foobar");
//! ```
use std::{error, fmt, result};

const ALPHABET: &'static [u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// the symbol at the given index is not part of the alphabet
    InvalidCharacter(usize),
    /// no byte string encodes to a text of this length
    InvalidLength(usize),
    /// the unused trailing bits of the last symbol are not zero
    NonCanonicalEncoding,
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Error::InvalidCharacter(idx) => write!(f, "Invalid base32 symbol at index {}", idx),
            &Error::InvalidLength(len) => write!(f, "Invalid base32 length {}", len),
            &Error::NonCanonicalEncoding => write!(f, "Non canonical base32 encoding"),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// length of the encoded text for an input of `len` bytes
pub fn encoded_len(len: usize) -> usize {
    (len * 8 + 4) / 5
}

pub fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(input.len()));
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for &byte in input.iter() {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

fn symbol(idx: usize, byte: u8) -> Result<u32> {
    match byte {
        b'A'..=b'Z' => Ok((byte - b'A') as u32),
        b'2'..=b'7' => Ok((byte - b'2') as u32 + 26),
        _ => Err(Error::InvalidCharacter(idx)),
    }
}

pub fn decode(input: &str) -> Result<Vec<u8>> {
    let len = input.len();
    match len % 8 {
        1 | 3 | 6 => return Err(Error::InvalidLength(len)),
        _ => {}
    }

    let mut out = Vec::with_capacity(len * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for (idx, byte) in input.bytes().enumerate() {
        buffer = (buffer << 5) | symbol(idx, byte)?;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }

    if buffer != 0 {
        return Err(Error::NonCanonicalEncoding);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4648 section 10, padding stripped
    const RFC4648_VECTORS: [(&'static str, &'static str); 7] = [
        ("", ""),
        ("f", "MY"),
        ("fo", "MZXQ"),
        ("foo", "MZXW6"),
        ("foob", "MZXW6YQ"),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI"),
    ];

    #[test]
    fn rfc4648_encode() {
        for (input, expected) in RFC4648_VECTORS.iter() {
            assert_eq!(&encode(input.as_bytes()), expected);
        }
    }

    #[test]
    fn rfc4648_decode() {
        for (expected, input) in RFC4648_VECTORS.iter() {
            assert_eq!(decode(input).unwrap(), expected.as_bytes());
        }
    }

    #[test]
    fn encoded_len_matches_output() {
        for len in 0..40 {
            let input = vec![0xa5u8; len];
            assert_eq!(encode(&input).len(), encoded_len(len));
        }
    }

    #[test]
    fn rejects_lower_case() {
        assert_eq!(decode("mzxw6"), Err(Error::InvalidCharacter(0)));
    }

    #[test]
    fn rejects_padding() {
        assert_eq!(decode("MY======"), Err(Error::InvalidCharacter(2)));
    }

    #[test]
    fn rejects_impossible_lengths() {
        assert_eq!(decode("M"), Err(Error::InvalidLength(1)));
        assert_eq!(decode("MZX"), Err(Error::InvalidLength(3)));
        assert_eq!(decode("MZXW6Y"), Err(Error::InvalidLength(6)));
    }

    #[test]
    fn rejects_non_zero_trailing_bits() {
        // "MY" is the canonical form of "f", "MZ" carries a stray low bit
        assert_eq!(decode("MZ"), Err(Error::NonCanonicalEncoding));
    }

    quickcheck! {
        fn encode_decode(input: Vec<u8>) -> bool {
            decode(&encode(&input)).unwrap() == input
        }
    }
}
