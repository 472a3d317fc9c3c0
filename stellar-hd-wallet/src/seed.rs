//! Binary seed given to the wallet
//!
//! The seed is either handed over as raw bytes or as an hexadecimal
//! string. The variant is resolved once, when the wallet is built.
//!
//! ```
//! use stellar_hd_wallet::seed::Seed;
//!
//! let from_hex: Seed = "000102030405060708090a0b0c0d0e0f".into();
//! let from_bin: Seed = (&[0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15][..]).into();
//!
//! assert_eq!(
//!     from_hex.to_bytes(&Default::default()).unwrap().as_ref(),
//!     from_bin.to_bytes(&Default::default()).unwrap().as_ref(),
//! );
//! ```
use crate::config::Config;
use crate::util::{hex, securemem::SecretBytes};
use std::{error, fmt, result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// the seed does not contain any byte
    Empty,
    /// the seed is shorter than the configured minimum
    TooShort { minimum: usize, given: usize },
    /// the hexadecimal text could not be decoded
    Hexadecimal(hex::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "Invalid seed: empty"),
            Error::TooShort { minimum, given } => write!(
                f,
                "Invalid seed: expected at least {} bytes, but received {} bytes",
                minimum, given
            ),
            Error::Hexadecimal(err) => write!(f, "Invalid seed: {}", err),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Hexadecimal(err) => Some(err),
            _ => None,
        }
    }
}
impl From<hex::Error> for Error {
    fn from(e: hex::Error) -> Self {
        Error::Hexadecimal(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy)]
pub enum Seed<'a> {
    Binary(&'a [u8]),
    Hex(&'a str),
}
impl<'a> Seed<'a> {
    /// resolve the seed into its bytes, enforcing the size policy of
    /// the given `Config`. The returned buffer is zeroed when dropped.
    pub fn to_bytes(&self, cfg: &Config) -> Result<SecretBytes> {
        let bytes = match self {
            Seed::Binary(bytes) => SecretBytes::new(bytes.to_vec()),
            Seed::Hex(text) => SecretBytes::new(hex::decode(text)?),
        };

        if bytes.is_empty() {
            return Err(Error::Empty);
        }
        if bytes.len() < cfg.minimum_seed_size {
            return Err(Error::TooShort {
                minimum: cfg.minimum_seed_size,
                given: bytes.len(),
            });
        }
        Ok(bytes)
    }
}
impl<'a> From<&'a [u8]> for Seed<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Seed::Binary(bytes)
    }
}
impl<'a> From<&'a Vec<u8>> for Seed<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Seed::Binary(bytes.as_slice())
    }
}
impl<'a> From<&'a str> for Seed<'a> {
    fn from(text: &'a str) -> Self {
        Seed::Hex(text)
    }
}
impl<'a> From<&'a String> for Seed<'a> {
    fn from(text: &'a String) -> Self {
        Seed::Hex(text.as_str())
    }
}
impl<'a> fmt::Debug for Seed<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Seed::Binary(bytes) => write!(f, "Seed::Binary({} bytes)", bytes.len()),
            Seed::Hex(text) => write!(f, "Seed::Hex({} chars)", text.len()),
        }
    }
}
