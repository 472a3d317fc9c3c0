//! Hardened derivation paths
//!
//! A path is written `m` followed by any number of `/<index>'`
//! segments, for example `m/44'/148'/0'`. Every segment must carry the
//! `'` hardening marker: ed25519 keys only support hardened derivation.
//!
//! The indices kept in a `DerivationPath` are the unhardened values,
//! always below `HARDENED_OFFSET`.
//!
//! ```
//! use stellar_hd_wallet::path::DerivationPath;
//!
//! let path: DerivationPath = "m/44'/148'/0'".parse().unwrap();
//!
//! assert_eq!(path.as_ref(), &[44, 148, 0]);
//! assert_eq!(path.to_string(), "m/44'/148'/0'");
//! ```
use crate::slip10::HARDENED_OFFSET;
use std::{error, fmt, result, str::FromStr};

const ROOT: &'static str = "m";
const SEPARATOR: char = '/';
const HARDENED_MARKER: char = '\'';

/// Error relating to parsing or building a `DerivationPath`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum Error {
    /// the path does not start with the `m` root
    MissingRoot,
    /// the segment at the given position is empty (`m//1'` or `m/`)
    EmptySegment(usize),
    /// the segment at the given position is not a decimal number
    /// followed by the hardening marker
    InvalidSegment(usize, String),
    /// the segment at the given position lacks the `'` marker. Soft
    /// derivation does not exist for ed25519.
    NotHardened(usize),
    /// the index is not below `HARDENED_OFFSET`. Indices too large to
    /// fit in 64 bits are reported as `u64::max_value()`.
    IndexOutOfRange(u64),
}
impl Error {
    /// `true` for every error except `IndexOutOfRange`
    pub fn is_malformed(&self) -> bool {
        match self {
            Error::IndexOutOfRange(_) => false,
            _ => true,
        }
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingRoot => write!(f, "Malformed path: expected to start with `{}`", ROOT),
            Error::EmptySegment(pos) => write!(f, "Malformed path: segment {} is empty", pos),
            Error::InvalidSegment(pos, segment) => write!(
                f,
                "Malformed path: segment {} (`{}`) is not a hardened index",
                pos, segment
            ),
            Error::NotHardened(pos) => write!(
                f,
                "Malformed path: segment {} is not hardened, only hardened derivation is supported",
                pos
            ),
            Error::IndexOutOfRange(index) => write!(
                f,
                "Index out of range, expected less than {} but received {}",
                HARDENED_OFFSET, index
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

fn check_index(index: u32) -> Result<u32> {
    if index >= HARDENED_OFFSET {
        return Err(Error::IndexOutOfRange(index as u64));
    }
    Ok(index)
}

/// ordered sequence of hardened indices, from the root to the leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<u32>);
impl DerivationPath {
    /// the path to the master key itself (`m`)
    pub fn root() -> Self {
        DerivationPath(Vec::new())
    }

    /// create a path from unhardened indices
    ///
    /// ```
    /// use stellar_hd_wallet::path::DerivationPath;
    ///
    /// assert!(DerivationPath::new(vec![44, 148, 0]).is_ok());
    /// assert!(DerivationPath::new(vec![44, 0x8000_0094]).is_err());
    /// ```
    pub fn new(indices: Vec<u32>) -> Result<Self> {
        for index in indices.iter() {
            check_index(*index)?;
        }
        Ok(DerivationPath(indices))
    }

    /// the path of the hardened child at `index` of this path
    pub fn child(&self, index: u32) -> Result<Self> {
        let mut indices = self.0.clone();
        indices.push(check_index(index)?);
        Ok(DerivationPath(indices))
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> ::std::slice::Iter<u32> {
        self.0.iter()
    }
}
impl AsRef<[u32]> for DerivationPath {
    fn as_ref(&self) -> &[u32] {
        self.0.as_ref()
    }
}
impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", ROOT)?;
        for index in self.0.iter() {
            write!(f, "{}{}{}", SEPARATOR, index, HARDENED_MARKER)?;
        }
        Ok(())
    }
}

fn parse_segment(pos: usize, segment: &str) -> Result<u32> {
    if segment.is_empty() {
        return Err(Error::EmptySegment(pos));
    }
    let digits = match segment.strip_suffix(HARDENED_MARKER) {
        Some(digits) => digits,
        None if segment.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(Error::NotHardened(pos))
        }
        None => return Err(Error::InvalidSegment(pos, segment.to_owned())),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidSegment(pos, segment.to_owned()));
    }

    let value = digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as u64)
    });
    if value >= HARDENED_OFFSET as u64 {
        return Err(Error::IndexOutOfRange(value));
    }
    Ok(value as u32)
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.split(SEPARATOR);
        match segments.next() {
            Some(ROOT) => {}
            _ => return Err(Error::MissingRoot),
        }

        let mut indices = Vec::new();
        for (pos, segment) in segments.enumerate() {
            indices.push(parse_segment(pos + 1, segment)?);
        }
        Ok(DerivationPath(indices))
    }
}
