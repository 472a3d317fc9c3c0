//! Stellar account keypairs
//!
//! A derived 32 bytes private key is used as an ed25519 seed (RFC 8032
//! key generation). The keypair gives access to the account id (the
//! `G...` strkey of the public key) and to the account secret (the
//! `S...` strkey of the seed).
//!
//! ```
//! use stellar_hd_wallet::keypair::Keypair;
//!
//! let keypair = Keypair::from_raw_ed25519_seed(&[0u8; 32]).unwrap();
//! let signature = keypair.sign(b"some bytes");
//!
//! assert!(keypair.public_key().starts_with('G'));
//! assert!(keypair.secret().starts_with('S'));
//! assert!(keypair.verify(b"some bytes", &signature));
//! ```

use cryptoxide::ed25519;

use crate::strkey::{self, Kind};
use crate::util::{hex, securemem};
use std::{error, fmt, result, str::FromStr};

/// size of the ed25519 seed, the derived private key
pub const SEED_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 32;
pub const SIGNATURE_SIZE: usize = 64;

const SECRET_SIZE: usize = SEED_SIZE + PUBLIC_KEY_SIZE;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// the ed25519 seed is not `SEED_SIZE` bytes long
    InvalidSeedLength(usize),
    /// the strkey text could not be decoded
    Strkey(strkey::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Error::InvalidSeedLength(sz) => write!(
                f,
                "Invalid ed25519 seed length, expected {} bytes but received {} bytes",
                SEED_SIZE, sz
            ),
            &Error::Strkey(err) => write!(f, "{}", err),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Strkey(err) => Some(err),
            _ => None,
        }
    }
}
impl From<strkey::Error> for Error {
    fn from(e: strkey::Error) -> Self {
        Error::Strkey(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// an ed25519 keypair, built from its 32 bytes seed
pub struct Keypair {
    // seed followed by the public key, as expected by `ed25519::signature`
    secret: [u8; SECRET_SIZE],
}
impl Keypair {
    /// create a keypair from an ed25519 seed of exactly `SEED_SIZE` bytes
    pub fn from_raw_ed25519_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() != SEED_SIZE {
            return Err(Error::InvalidSeedLength(seed.len()));
        }
        let (secret, _) = ed25519::keypair(seed);
        Ok(Keypair { secret })
    }

    /// create a keypair from its `S...` secret
    ///
    /// ```
    /// use stellar_hd_wallet::keypair::Keypair;
    ///
    /// let secret = "SAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSU2";
    /// let keypair = Keypair::from_secret(secret).unwrap();
    ///
    /// assert_eq!(keypair.secret(), secret);
    /// assert!(Keypair::from_secret(&keypair.public_key()).is_err());
    /// ```
    pub fn from_secret(secret: &str) -> Result<Self> {
        let mut seed = strkey::decode_check(Kind::Seed, secret)?;
        let keypair = Self::from_raw_ed25519_seed(&seed);
        securemem::zero(&mut seed);
        keypair
    }

    pub fn raw_seed(&self) -> &[u8] {
        &self.secret[0..SEED_SIZE]
    }

    pub fn raw_public_key(&self) -> &[u8] {
        &self.secret[SEED_SIZE..]
    }

    /// the account id, `G...`
    pub fn public_key(&self) -> String {
        self.verifying_key().to_string()
    }

    /// the account secret, `S...`
    pub fn secret(&self) -> String {
        let mut seed = [0u8; SEED_SIZE];
        seed.clone_from_slice(self.raw_seed());
        let encoded = strkey::encode(Kind::Seed, &seed);
        securemem::zero(&mut seed);
        encoded
    }

    pub fn verifying_key(&self) -> PublicKey {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        bytes.clone_from_slice(self.raw_public_key());
        PublicKey(bytes)
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(ed25519::signature(message, &self.secret))
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        ed25519::verify(message, self.raw_public_key(), signature.as_ref())
    }
}
impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Keypair({})", self.public_key())
    }
}
impl Drop for Keypair {
    fn drop(&mut self) {
        securemem::zero(&mut self.secret);
    }
}

/// ed25519 public key of an account, displayed as its `G...` strkey
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);
impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        ed25519::verify(message, &self.0, signature.as_ref())
    }
}
impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", strkey::encode(Kind::PublicKey, &self.0))
    }
}
impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}
impl FromStr for PublicKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(PublicKey(strkey::decode_check(Kind::PublicKey, s)?))
    }
}

pub struct Signature([u8; SIGNATURE_SIZE]);
impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Signature(bytes)
    }
}
impl Clone for Signature {
    fn clone(&self) -> Self {
        let mut bytes = [0; SIGNATURE_SIZE];
        bytes.copy_from_slice(&self.0);
        Signature(bytes)
    }
}
impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        PartialEq::eq(&self.0[..], &other.0[..])
    }
}
impl Eq for Signature {}
impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
