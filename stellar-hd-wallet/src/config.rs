//! Wallet construction settings
//!
//! The only policy knob is the minimum size of the binary seed the
//! master key is generated from. SLIP-0010 accepts any non empty seed,
//! but BIP-32 recommends at least 128 bits and BIP-39 seeds are 512
//! bits long, so short seeds are refused by default.
//!
//! ```
//! use stellar_hd_wallet::config::{Config, MINIMUM_SEED_SIZE};
//!
//! assert_eq!(Config::default().minimum_seed_size, MINIMUM_SEED_SIZE);
//! assert_eq!(Config::permissive().minimum_seed_size, 1);
//! ```

/// default minimum seed size in bytes (128 bits)
pub const MINIMUM_SEED_SIZE: usize = 16;

/// size in bytes of the seed produced by BIP-39 mnemonic stretching
pub const BIP39_SEED_SIZE: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "generic-serialization", serde(default))]
pub struct Config {
    /// seeds shorter than this many bytes are rejected with
    /// `seed::Error::TooShort`. A value of `0` behaves like `1`:
    /// an empty seed is never accepted.
    pub minimum_seed_size: usize,
}
impl Config {
    pub fn new(minimum_seed_size: usize) -> Self {
        Config { minimum_seed_size }
    }

    /// accept any non empty seed
    pub fn permissive() -> Self {
        Config::new(1)
    }
}
impl Default for Config {
    fn default() -> Self {
        Config::new(MINIMUM_SEED_SIZE)
    }
}
