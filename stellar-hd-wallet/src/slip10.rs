//! SLIP-0010 Hierarchical Deterministic key derivation for ed25519
//!
//! Supports:
//! * Transform Seed to the master Extended Key
//! * Hardened derivation using 31 bits indices
//!
//! ed25519 has no public parent to public child derivation in SLIP-0010,
//! so there is no soft derivation here. Every index given to this module
//! is the unhardened value, the hardening offset is applied internally.
//!
use cryptoxide::hmac::Hmac;
use cryptoxide::mac::Mac;
use cryptoxide::sha2::Sha512;
use cryptoxide::util::fixed_time_eq;

use crate::util::securemem;
use std::{error, fmt, result};

pub const PRIVATE_KEY_SIZE: usize = 32;
pub const CHAIN_CODE_SIZE: usize = 32;
pub const EXTENDED_KEY_SIZE: usize = PRIVATE_KEY_SIZE + CHAIN_CODE_SIZE;

/// offset added to an index to mark it as hardened
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key used to generate the master key from the seed
const ED25519_SEED_KEY: &'static [u8] = b"ed25519 seed";

/// SLIP-0010 errors
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// the seed is empty
    InvalidSeed,
    /// the given index is not below `HARDENED_OFFSET`. The parameter is the given index.
    IndexOutOfRange(u32),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Error::InvalidSeed => write!(f, "Invalid seed: expected at least one byte"),
            &Error::IndexOutOfRange(index) => write!(
                f,
                "Index out of range, expected less than 0x{:x} but received 0x{:x}",
                HARDENED_OFFSET, index
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

pub type ChainCode = [u8; CHAIN_CODE_SIZE];

/// a node of the derivation tree: the 32 bytes ed25519 private key
/// and the 32 bytes chain code.
pub struct ExtendedKey {
    private_key: [u8; PRIVATE_KEY_SIZE],
    chain_code: ChainCode,
}
impl ExtendedKey {
    /// create the master `ExtendedKey` associated to the given seed
    ///
    /// This is a deterministic construction. The key returned will always be
    /// the same for the same given seed.
    ///
    /// ```
    /// use stellar_hd_wallet::slip10::ExtendedKey;
    ///
    /// let master = ExtendedKey::generate_from_seed(&[0u8; 64]).unwrap();
    /// assert_eq!(master, ExtendedKey::generate_from_seed(&[0u8; 64]).unwrap());
    ///
    /// assert!(ExtendedKey::generate_from_seed(&[]).is_err());
    /// ```
    pub fn generate_from_seed(seed: &[u8]) -> Result<Self> {
        if seed.is_empty() {
            return Err(Error::InvalidSeed);
        }
        Ok(hmac_sha512(ED25519_SEED_KEY, &[seed]))
    }

    /// derive the hardened child at the given index
    ///
    /// ```
    /// use stellar_hd_wallet::slip10::{ExtendedKey, HARDENED_OFFSET};
    ///
    /// let master = ExtendedKey::generate_from_seed(&[0u8; 64]).unwrap();
    ///
    /// assert!(master.derive(44).is_ok());
    /// assert!(master.derive(HARDENED_OFFSET).is_err());
    /// ```
    pub fn derive(&self, index: u32) -> Result<Self> {
        derive_child(self, index)
    }

    /// create an `ExtendedKey` from its raw private key and chain code
    pub fn from_parts(private_key: &[u8; PRIVATE_KEY_SIZE], chain_code: &ChainCode) -> Self {
        ExtendedKey {
            private_key: *private_key,
            chain_code: *chain_code,
        }
    }

    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.private_key
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }
}
impl PartialEq for ExtendedKey {
    fn eq(&self, rhs: &ExtendedKey) -> bool {
        // both halves are always compared, no early exit
        let keys = fixed_time_eq(&self.private_key, &rhs.private_key);
        let codes = fixed_time_eq(&self.chain_code, &rhs.chain_code);
        keys & codes
    }
}
impl Eq for ExtendedKey {}
impl Clone for ExtendedKey {
    fn clone(&self) -> Self {
        Self::from_parts(&self.private_key, &self.chain_code)
    }
}
impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ExtendedKey(..)")
    }
}
impl Drop for ExtendedKey {
    fn drop(&mut self) {
        securemem::zero(&mut self.private_key);
        securemem::zero(&mut self.chain_code);
    }
}

/// generate the master key of the derivation tree
pub fn generate_master(seed: &[u8]) -> Result<ExtendedKey> {
    ExtendedKey::generate_from_seed(seed)
}

/// derive the hardened child of `parent` at `index`
///
/// ```text
/// I = HMAC-SHA512(Key = c_par, Data = 0x00 || k_par || ser32(index + 2^31))
/// ```
pub fn derive_child(parent: &ExtendedKey, index: u32) -> Result<ExtendedKey> {
    if index >= HARDENED_OFFSET {
        return Err(Error::IndexOutOfRange(index));
    }
    let seri = be32(index | HARDENED_OFFSET);
    Ok(hmac_sha512(
        &parent.chain_code[..],
        &[&[0x00][..], &parent.private_key[..], &seri[..]],
    ))
}

fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> ExtendedKey {
    let mut mac = Hmac::new(Sha512::new(), key);
    for chunk in data.iter() {
        mac.input(chunk);
    }
    let mut out = [0u8; EXTENDED_KEY_SIZE];
    mac.raw_result(&mut out);
    mac.reset();

    let mut key = ExtendedKey {
        private_key: [0u8; PRIVATE_KEY_SIZE],
        chain_code: [0u8; CHAIN_CODE_SIZE],
    };
    key.private_key.clone_from_slice(&out[0..PRIVATE_KEY_SIZE]);
    key.chain_code.clone_from_slice(&out[PRIVATE_KEY_SIZE..]);
    securemem::zero(&mut out);
    key
}

fn be32(i: u32) -> [u8; 4] {
    [(i >> 24) as u8, (i >> 16) as u8, (i >> 8) as u8, i as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex;

    fn key_hex(key: &ExtendedKey) -> (String, String) {
        (hex::encode(key.private_key()), hex::encode(key.chain_code()))
    }

    #[test]
    fn be32_is_big_endian() {
        assert_eq!(be32(0x8000_002c), [0x80, 0x00, 0x00, 0x2c]);
    }

    #[test]
    fn empty_seed() {
        assert_eq!(generate_master(&[]).err(), Some(Error::InvalidSeed));
    }

    #[test]
    fn single_byte_seed() {
        assert!(generate_master(&[0]).is_ok());
    }

    #[test]
    fn master_split() {
        // SLIP-0010 test vector 1, chain m
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let master = generate_master(&seed).unwrap();
        assert_eq!(
            key_hex(&master),
            (
                "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7".to_owned(),
                "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb".to_owned()
            )
        );
    }

    #[test]
    fn child_split() {
        // SLIP-0010 test vector 1, chain m/0H
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let child = generate_master(&seed).unwrap().derive(0).unwrap();
        assert_eq!(
            key_hex(&child),
            (
                "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3".to_owned(),
                "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69".to_owned()
            )
        );
    }

    #[test]
    fn hardened_range() {
        let master = generate_master(&[1u8; 32]).unwrap();
        assert!(derive_child(&master, HARDENED_OFFSET - 1).is_ok());
        assert_eq!(
            derive_child(&master, HARDENED_OFFSET).err(),
            Some(Error::IndexOutOfRange(HARDENED_OFFSET))
        );
        assert_eq!(
            derive_child(&master, u32::max_value()).err(),
            Some(Error::IndexOutOfRange(u32::max_value()))
        );
    }

    #[test]
    fn parent_is_untouched() {
        let master = generate_master(&[7u8; 32]).unwrap();
        let copy = master.clone();
        let child = master.derive(1).unwrap();
        assert_eq!(master, copy);
        assert!(child != master);
    }

    #[test]
    fn from_parts() {
        let master = generate_master(&[3u8; 32]).unwrap();
        let rebuilt = ExtendedKey::from_parts(master.private_key(), master.chain_code());
        assert_eq!(master, rebuilt);
    }

    #[test]
    fn debug_is_redacted() {
        let master = generate_master(&[3u8; 32]).unwrap();
        assert_eq!(format!("{:?}", master), "ExtendedKey(..)");
    }

    quickcheck! {
        fn derivation_is_deterministic(seed: Vec<u8>, index: u32) -> bool {
            let seed = if seed.is_empty() { vec![0] } else { seed };
            let index = index % HARDENED_OFFSET;
            let k1 = generate_master(&seed).unwrap().derive(index).unwrap();
            let k2 = generate_master(&seed).unwrap().derive(index).unwrap();
            k1 == k2
        }

        fn siblings_differ(index: u32) -> bool {
            let index = index % (HARDENED_OFFSET - 1);
            let master = generate_master(&[42u8; 64]).unwrap();
            master.derive(index).unwrap() != master.derive(index + 1).unwrap()
        }
    }
}
