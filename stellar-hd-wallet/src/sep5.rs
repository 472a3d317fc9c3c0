//! SEP-0005 account addressing
//!
//! Stellar accounts live at `m/44'/148'/{account}'`, all levels hardened.
//!
//! # Example
//!
//! ```
//! use stellar_hd_wallet::sep5::Account;
//!
//! let path = Account::new(8).unwrap().to_path();
//!
//! assert_eq!(path.to_string(), "m/44'/148'/8'");
//! ```

use crate::path::{self, DerivationPath};
use crate::slip10::HARDENED_OFFSET;
use std::fmt;

/// BIP44 purpose level
pub const PURPOSE: u32 = 44;
/// SLIP-0044 registered coin type of the Stellar lumen
pub const COIN_TYPE: u32 = 148;

/// Account index of a SEP-0005 path, always below `HARDENED_OFFSET`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub struct Account(u32);
impl Account {
    pub fn new(account: u32) -> path::Result<Self> {
        if account >= HARDENED_OFFSET {
            return Err(path::Error::IndexOutOfRange(account as u64));
        }
        Ok(Account(account))
    }

    pub fn get_account_number(&self) -> u32 {
        self.0
    }

    /// the index as it is fed to the HMAC, hardening bit set
    pub fn get_scheme_value(&self) -> u32 {
        self.0 | HARDENED_OFFSET
    }

    /// the next account, if any
    pub fn next(&self) -> Option<Self> {
        Account::new(self.0 + 1).ok()
    }

    /// return a path ready for derivation
    pub fn to_path(&self) -> DerivationPath {
        DerivationPath::new(vec![PURPOSE, COIN_TYPE, self.0])
            .expect("account number is already checked to be in range")
    }
}
impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// path of the SEP-0005 parent of every account, `m/44'/148'`
pub fn coin_path() -> DerivationPath {
    DerivationPath::root()
        .child(PURPOSE)
        .and_then(|p| p.child(COIN_TYPE))
        .expect("purpose and coin type are constant hardened indices")
}

/// path of the account at `index`, `m/44'/148'/{index}'`
pub fn account_path(index: u32) -> path::Result<DerivationPath> {
    Account::new(index).map(|account| account.to_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_path_display() {
        assert_eq!(coin_path().to_string(), "m/44'/148'");
    }

    #[test]
    fn account_path_is_child_of_coin_path() {
        assert_eq!(account_path(3).unwrap(), coin_path().child(3).unwrap());
    }

    #[test]
    fn account_bounds() {
        assert!(Account::new(0x7fff_ffff).is_ok());
        assert_eq!(
            Account::new(0x8000_0000),
            Err(path::Error::IndexOutOfRange(0x8000_0000))
        );
        assert!(account_path(u32::max_value()).is_err());
    }

    #[test]
    fn scheme_value() {
        let account = Account::new(5).unwrap();
        assert_eq!(account.get_account_number(), 5);
        assert_eq!(account.get_scheme_value(), 0x8000_0005);
    }

    #[test]
    fn next_stops_at_the_last_account() {
        assert_eq!(Account::new(1).unwrap().next(), Some(Account::new(2).unwrap()));
        assert_eq!(Account::new(0x7fff_ffff).unwrap().next(), None);
    }
}
