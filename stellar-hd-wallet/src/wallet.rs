//! Stellar HD wallet
//!
//! The wallet owns the SLIP-0010 master key generated from the binary
//! seed and derives every account keypair from it, following the
//! SEP-0005 convention `m/44'/148'/{index}'`.
//!
//! The wallet is never mutated after construction: every derivation is a
//! pure function of the master key and the path, so a `Wallet` can be
//! shared between threads freely.
//!
//! # Example
//!
//! ```
//! use stellar_hd_wallet::wallet::Wallet;
//!
//! let wallet = Wallet::from_seed("000102030405060708090a0b0c0d0e0f").unwrap();
//!
//! let keypair = wallet.get_keypair(0).unwrap();
//! assert_eq!(keypair.public_key(), wallet.get_public_key(0).unwrap());
//!
//! let key = wallet.derive("m/44'/148'/0'").unwrap();
//! assert_eq!(key.as_ref(), keypair.raw_seed());
//! ```

use crate::config::Config;
use crate::keypair::{self, Keypair};
use crate::path::{self, DerivationPath};
use crate::seed::{self, Seed};
use crate::slip10::{self, ExtendedKey, PRIVATE_KEY_SIZE};
use crate::sep5;
use crate::strkey;
use crate::util::{hex, securemem};
use std::{error, fmt, result};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// the seed is empty, too short or not valid hexadecimal
    InvalidSeed(seed::Error),
    /// the derivation path could not be parsed
    MalformedPath(path::Error),
    /// a hardened index is not below `2^31`
    IndexOutOfRange(u64),
    /// the ed25519 seed given to the keypair is not 32 bytes long
    InvalidSeedLength(usize),
    /// a strkey could not be decoded
    Strkey(strkey::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidSeed(err) => write!(f, "{}", err),
            Error::MalformedPath(err) => write!(f, "{}", err),
            Error::IndexOutOfRange(index) => write!(
                f,
                "Index out of range, expected less than {} but received {}",
                slip10::HARDENED_OFFSET,
                index
            ),
            Error::InvalidSeedLength(sz) => write!(
                f,
                "Invalid ed25519 seed length, expected {} bytes but received {} bytes",
                keypair::SEED_SIZE,
                sz
            ),
            Error::Strkey(err) => write!(f, "{}", err),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidSeed(err) => Some(err),
            Error::MalformedPath(err) => Some(err),
            Error::Strkey(err) => Some(err),
            _ => None,
        }
    }
}
impl From<seed::Error> for Error {
    fn from(e: seed::Error) -> Self {
        Error::InvalidSeed(e)
    }
}
impl From<path::Error> for Error {
    fn from(e: path::Error) -> Self {
        match e {
            path::Error::IndexOutOfRange(index) => Error::IndexOutOfRange(index),
            e => Error::MalformedPath(e),
        }
    }
}
impl From<slip10::Error> for Error {
    fn from(e: slip10::Error) -> Self {
        match e {
            slip10::Error::InvalidSeed => Error::InvalidSeed(seed::Error::Empty),
            slip10::Error::IndexOutOfRange(index) => Error::IndexOutOfRange(index as u64),
        }
    }
}
impl From<keypair::Error> for Error {
    fn from(e: keypair::Error) -> Self {
        match e {
            keypair::Error::InvalidSeedLength(sz) => Error::InvalidSeedLength(sz),
            keypair::Error::Strkey(err) => Error::Strkey(err),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// 32 bytes private key found at the end of a derivation path
///
/// This is the ed25519 seed of the account keypair.
pub struct PrivateKey([u8; PRIVATE_KEY_SIZE]);
impl PrivateKey {
    pub fn to_keypair(&self) -> Result<Keypair> {
        Ok(Keypair::from_raw_ed25519_seed(&self.0)?)
    }
}
impl AsRef<[u8]> for PrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        PrivateKey(self.0)
    }
}
impl PartialEq for PrivateKey {
    fn eq(&self, rhs: &Self) -> bool {
        cryptoxide::util::fixed_time_eq(&self.0, &rhs.0)
    }
}
impl Eq for PrivateKey {}
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
impl Drop for PrivateKey {
    fn drop(&mut self) {
        securemem::zero(&mut self.0);
    }
}

pub struct Wallet {
    master: ExtendedKey,
}
impl Wallet {
    /// create the wallet of the given seed, refusing seeds shorter than
    /// `config::MINIMUM_SEED_SIZE`
    pub fn from_seed<'a, S>(seed: S) -> Result<Self>
    where
        S: Into<Seed<'a>>,
    {
        Self::from_seed_with_config(seed, &Config::default())
    }

    /// create the wallet of the given seed with the given size policy
    ///
    /// ```
    /// use stellar_hd_wallet::{config::Config, wallet::Wallet};
    ///
    /// assert!(Wallet::from_seed("00").is_err());
    /// assert!(Wallet::from_seed_with_config("00", &Config::permissive()).is_ok());
    /// ```
    pub fn from_seed_with_config<'a, S>(seed: S, cfg: &Config) -> Result<Self>
    where
        S: Into<Seed<'a>>,
    {
        let bytes = seed.into().to_bytes(cfg)?;
        debug!("creating wallet from a {} bytes seed", bytes.len());
        let master = slip10::generate_master(bytes.as_ref())?;
        Ok(Wallet { master })
    }

    /// derive the private key at the given textual path
    pub fn derive(&self, path: &str) -> Result<PrivateKey> {
        let path: DerivationPath = path.parse()?;
        self.derive_path(&path)
    }

    /// derive the private key at the given path
    pub fn derive_path(&self, path: &DerivationPath) -> Result<PrivateKey> {
        let mut key = self.master.clone();
        for (depth, index) in path.iter().enumerate() {
            trace!("deriving depth {} index {}'", depth + 1, index);
            key = key.derive(*index)?;
        }
        Ok(PrivateKey(*key.private_key()))
    }

    /// keypair of the account at `m/44'/148'/{index}'`
    pub fn get_keypair(&self, index: u32) -> Result<Keypair> {
        let path = sep5::account_path(index)?;
        self.derive_path(&path)?.to_keypair()
    }

    /// `G...` account id of the account at `index`
    pub fn get_public_key(&self, index: u32) -> Result<String> {
        Ok(self.get_keypair(index)?.public_key())
    }

    /// `S...` secret of the account at `index`
    pub fn get_secret(&self, index: u32) -> Result<String> {
        Ok(self.get_keypair(index)?.secret())
    }
}
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Wallet(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const SEED: &'static str = "000102030405060708090a0b0c0d0e0f";

    fn wallet() -> Wallet {
        Wallet::from_seed(SEED).unwrap()
    }

    #[test]
    fn wallet_is_send_and_sync() {
        fn check<T: Send + Sync>() {}
        check::<Wallet>();
    }

    #[test]
    fn root_path_is_the_master_key() {
        // SLIP-0010 test vector 1, chain m
        assert_eq!(
            wallet().derive("m").unwrap().to_string(),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let w1 = wallet();
        let w2 = wallet();
        assert_eq!(
            w1.derive("m/44'/148'/3'").unwrap(),
            w2.derive("m/44'/148'/3'").unwrap()
        );
        assert_eq!(w1.get_secret(3).unwrap(), w2.get_secret(3).unwrap());
    }

    #[test]
    fn derivations_are_independent() {
        let w = wallet();
        let before = w.get_public_key(1).unwrap();
        let _ = w.get_keypair(0).unwrap();
        let _ = w.derive("m/0'/1'/2'").unwrap();
        assert_eq!(w.get_public_key(1).unwrap(), before);
    }

    #[test]
    fn textual_and_parsed_paths_agree() {
        let w = wallet();
        let path = sep5::account_path(7).unwrap();
        assert_eq!(w.derive_path(&path).unwrap(), w.derive("m/44'/148'/7'").unwrap());
    }

    #[test]
    fn get_keypair_follows_sep5() {
        let w = wallet();
        let keypair = w.get_keypair(2).unwrap();
        assert_eq!(keypair.raw_seed(), w.derive("m/44'/148'/2'").unwrap().as_ref());
        assert_eq!(keypair.public_key(), w.get_public_key(2).unwrap());
        assert_eq!(keypair.secret(), w.get_secret(2).unwrap());
    }

    #[test]
    fn keys_are_well_formed() {
        let w = wallet();
        for index in 0..4 {
            let public = w.get_public_key(index).unwrap();
            let secret = w.get_secret(index).unwrap();
            assert!(public.starts_with('G') && public.len() == 56);
            assert!(secret.starts_with('S') && secret.len() == 56);
        }
    }

    #[test]
    fn index_out_of_range() {
        let w = wallet();
        assert_eq!(
            w.get_keypair(0x8000_0000).err(),
            Some(Error::IndexOutOfRange(0x8000_0000))
        );
        assert_eq!(
            w.derive("m/44'/148'/2147483648'").err(),
            Some(Error::IndexOutOfRange(2147483648))
        );
        assert!(w.get_keypair(0x7fff_ffff).is_ok());
    }

    #[test]
    fn malformed_paths() {
        let w = wallet();
        assert_eq!(
            w.derive("m/44'/148'/0").err(),
            Some(Error::MalformedPath(path::Error::NotHardened(3)))
        );
        assert_eq!(
            w.derive("44'/148'").err(),
            Some(Error::MalformedPath(path::Error::MissingRoot))
        );
    }

    #[test]
    fn invalid_seeds() {
        assert_eq!(
            Wallet::from_seed("").err(),
            Some(Error::InvalidSeed(seed::Error::Empty))
        );
        assert_eq!(
            Wallet::from_seed("00zz").err(),
            Some(Error::InvalidSeed(seed::Error::Hexadecimal(
                hex::Error::UnknownSymbol(2)
            )))
        );
        assert!(Wallet::from_seed(&[0u8; 8][..]).is_err());
        assert!(Wallet::from_seed_with_config(&[0u8; 8][..], &Config::permissive()).is_ok());
    }

    #[test]
    fn hex_and_binary_seeds_agree() {
        let bytes = hex::decode(SEED).unwrap();
        assert_eq!(
            Wallet::from_seed(&bytes).unwrap().get_secret(0).unwrap(),
            wallet().get_secret(0).unwrap()
        );
    }

    #[test]
    fn concurrent_derivations() {
        let w = Arc::new(wallet());
        let expected: Vec<String> = (0..8).map(|i| w.get_public_key(i).unwrap()).collect();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let w = w.clone();
                thread::spawn(move || w.get_public_key(i).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), expected[i]);
        }
    }

    #[test]
    fn debug_is_redacted() {
        let w = wallet();
        assert_eq!(format!("{:?}", w), "Wallet(..)");
        assert_eq!(format!("{:?}", w.derive("m").unwrap()), "PrivateKey(..)");
    }
}
