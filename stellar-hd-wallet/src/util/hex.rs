//! simple implementation of hexadecimal encoding and decoding
//!
//! # Example
//!
//! ```
//! use stellar_hd_wallet::util::hex::{encode, decode};
//!
//! let example = b"some bytes";
//!
//! assert!(example.as_ref() == decode(&encode(example)).unwrap().as_slice());
//! ```
//!
use std::{error, fmt, result};

const ALPHABET: &'static [u8] = b"0123456789abcdef";

/// hexadecimal encoding/decoding potential errors
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// error when a given character is not part of the supported
    /// hexadecimal alphabet. Contains the index of the faulty byte
    UnknownSymbol(usize),
    /// the input does not contain an even number of hexadecimal digits.
    /// Contains the length of the input.
    OddLength(usize),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Error::UnknownSymbol(idx) => write!(f, "Unknown symbol at byte index {}", idx),
            &Error::OddLength(len) => write!(f, "Odd number of hexadecimal digits ({})", len),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// encode bytes into an hexadecimal string
///
///  # Example
///
/// ```
/// use stellar_hd_wallet::util::hex::encode;
///
/// let example = b"some bytes";
///
/// assert_eq!("736f6d65206279746573", encode(example));
/// ```
pub fn encode(input: &[u8]) -> String {
    let mut s = String::with_capacity(input.len() * 2);
    for &byte in input.iter() {
        s.push(ALPHABET[(byte >> 4) as usize] as char);
        s.push(ALPHABET[(byte & 0xf) as usize] as char);
    }
    s
}

fn symbol(idx: usize, byte: u8) -> Result<u8> {
    match byte {
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'0'..=b'9' => Ok(byte - b'0'),
        _ => Err(Error::UnknownSymbol(idx)),
    }
}

/// decode the given hexadecimal string
///
/// Both lower and upper case digits are accepted. Anything else,
/// whitespace included, is rejected.
///
///  # Example
///
/// ```
/// use stellar_hd_wallet::util::hex::{Error, decode};
///
/// assert_eq!(decode("736f6d65206279746573").unwrap(), b"some bytes");
/// assert_eq!(decode("abc"), Err(Error::OddLength(3)));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(Error::OddLength(bytes.len()));
    }

    let mut out = Vec::with_capacity(bytes.len() / 2);
    for (idx, pair) in bytes.chunks(2).enumerate() {
        let hi = symbol(idx * 2, pair[0])?;
        let lo = symbol(idx * 2 + 1, pair[1])?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}
