//! Stellar strkey encoding
//!
//! Text representation of ed25519 public keys (`G...`) and secret
//! seeds (`S...`):
//!
//! ```text
//! base32( version_byte || payload (32 bytes) || crc16_xmodem_le(version_byte || payload) )
//! ```
//!
//! The base32 alphabet is the RFC 4648 one, upper case, without padding.
//! Every strkey handled here is 56 characters long.
//!
//! # Example
//!
//! ```
//! use stellar_hd_wallet::strkey::{self, Kind};
//!
//! let address = strkey::encode(Kind::PublicKey, &[0u8; 32]);
//! assert_eq!(address, "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF");
//!
//! assert_eq!(strkey::decode(&address).unwrap(), (Kind::PublicKey, [0u8; 32]));
//! ```
use crate::util::securemem::{self, SecretBytes};
use crate::util::{base32, crc16::crc16_xmodem};
use std::{error, fmt, result};

/// size of the key carried by a strkey
pub const PAYLOAD_SIZE: usize = 32;
/// size of a strkey once base32 decoded: version, payload and checksum
pub const DECODED_SIZE: usize = 1 + PAYLOAD_SIZE + 2;
/// length of a strkey text
pub const ENCODED_SIZE: usize = 56;

const VERSION_BYTE_PUBLIC_KEY: u8 = 6 << 3;
const VERSION_BYTE_SEED: u8 = 18 << 3;

/// the kind of key a strkey carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub enum Kind {
    /// ed25519 public key, the account id (`G...`)
    PublicKey,
    /// raw ed25519 seed, the account secret (`S...`)
    Seed,
}
impl Kind {
    pub fn version_byte(self) -> u8 {
        match self {
            Kind::PublicKey => VERSION_BYTE_PUBLIC_KEY,
            Kind::Seed => VERSION_BYTE_SEED,
        }
    }

    pub fn from_version_byte(byte: u8) -> Option<Self> {
        match byte {
            VERSION_BYTE_PUBLIC_KEY => Some(Kind::PublicKey),
            VERSION_BYTE_SEED => Some(Kind::Seed),
            _ => None,
        }
    }

    /// first character of every strkey of this kind
    pub fn prefix(self) -> char {
        match self {
            Kind::PublicKey => 'G',
            Kind::Seed => 'S',
        }
    }
}
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::PublicKey => write!(f, "public key"),
            Kind::Seed => write!(f, "secret seed"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// the text is not canonical base32
    Encoding(base32::Error),
    /// the decoded strkey does not have `DECODED_SIZE` bytes. The
    /// parameter is the decoded size.
    InvalidLength(usize),
    /// the checksum carried by the strkey does not match its content
    ChecksumMismatch { expected: u16, found: u16 },
    /// the version byte does not belong to any supported `Kind`
    UnknownVersionByte(u8),
    /// the strkey is valid but of another kind than the expected one
    UnexpectedKind { expected: Kind, found: Kind },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Encoding(err) => write!(f, "Invalid strkey encoding: {}", err),
            Error::InvalidLength(len) => write!(
                f,
                "Invalid strkey length, expected {} bytes but decoded {} bytes",
                DECODED_SIZE, len
            ),
            Error::ChecksumMismatch { expected, found } => write!(
                f,
                "Invalid strkey checksum, expected 0x{:04x} but found 0x{:04x}",
                expected, found
            ),
            Error::UnknownVersionByte(byte) => {
                write!(f, "Unknown strkey version byte 0x{:02x}", byte)
            }
            Error::UnexpectedKind { expected, found } => {
                write!(f, "Expected a strkey {} but found a {}", expected, found)
            }
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Encoding(err) => Some(err),
            _ => None,
        }
    }
}
impl From<base32::Error> for Error {
    fn from(e: base32::Error) -> Self {
        Error::Encoding(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// encode the given key into its strkey text
pub fn encode(kind: Kind, payload: &[u8; PAYLOAD_SIZE]) -> String {
    let mut buf = [0u8; DECODED_SIZE];
    buf[0] = kind.version_byte();
    buf[1..1 + PAYLOAD_SIZE].clone_from_slice(payload);

    let checksum = crc16_xmodem(&buf[0..1 + PAYLOAD_SIZE]);
    buf[1 + PAYLOAD_SIZE] = checksum as u8;
    buf[2 + PAYLOAD_SIZE] = (checksum >> 8) as u8;

    let encoded = base32::encode(&buf);
    securemem::zero(&mut buf);
    encoded
}

/// decode a strkey text, returning its kind and the key it carries
///
/// No best effort is made: the text must be canonical base32, decode to
/// exactly `DECODED_SIZE` bytes, carry a valid checksum and a known
/// version byte.
pub fn decode(s: &str) -> Result<(Kind, [u8; PAYLOAD_SIZE])> {
    let raw = SecretBytes::new(base32::decode(s)?);
    let raw = raw.as_ref();
    if raw.len() != DECODED_SIZE {
        return Err(Error::InvalidLength(raw.len()));
    }

    let (data, checksum) = raw.split_at(1 + PAYLOAD_SIZE);
    let expected = crc16_xmodem(data);
    let found = checksum[0] as u16 | (checksum[1] as u16) << 8;
    if expected != found {
        return Err(Error::ChecksumMismatch { expected, found });
    }

    let kind = match Kind::from_version_byte(data[0]) {
        Some(kind) => kind,
        None => return Err(Error::UnknownVersionByte(data[0])),
    };

    let mut payload = [0u8; PAYLOAD_SIZE];
    payload.clone_from_slice(&data[1..]);
    Ok((kind, payload))
}

/// decode a strkey text that must be of the given kind
///
/// ```
/// use stellar_hd_wallet::strkey::{self, Error, Kind};
///
/// let secret = "SAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSU2";
///
/// assert!(strkey::decode_check(Kind::Seed, secret).is_ok());
/// assert_eq!(
///     strkey::decode_check(Kind::PublicKey, secret),
///     Err(Error::UnexpectedKind { expected: Kind::PublicKey, found: Kind::Seed })
/// );
/// ```
pub fn decode_check(expected: Kind, s: &str) -> Result<[u8; PAYLOAD_SIZE]> {
    let (found, payload) = decode(s)?;
    if found != expected {
        return Err(Error::UnexpectedKind { expected, found });
    }
    Ok(payload)
}

/// tell if the given text is a valid strkey of the given kind
pub fn is_valid(kind: Kind, s: &str) -> bool {
    decode_check(kind, s).is_ok()
}
