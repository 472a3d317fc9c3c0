//! Stellar hierarchical deterministic wallet
//!
//! Derive Stellar account keypairs from a binary seed:
//!
//! * [`slip10`]: SLIP-0010 ed25519 master key generation and hardened
//!   child key derivation;
//! * [`path`] and [`sep5`]: derivation paths and the SEP-0005
//!   `m/44'/148'/{index}'` account convention;
//! * [`keypair`] and [`strkey`]: ed25519 keypairs and their `G...`/`S...`
//!   text representation;
//! * [`wallet`]: all of the above put together.
//!
//! Mnemonic to seed conversion (BIP-39) is left to the caller; the wallet
//! is built from the 64 bytes seed it produces.
//!
//! ```
//! use stellar_hd_wallet::Wallet;
//!
//! let seed = "e4a5a632e70943ae7f07659df1332160937fad82587216a4c64315a0fb39497e\
//!             e4a01f76ddab4cba68147977f3a147b6ad584c41808e8238a07f6cc4b582f186";
//! let wallet = Wallet::from_seed(seed).unwrap();
//!
//! assert_eq!(
//!     wallet.get_public_key(0).unwrap(),
//!     "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6"
//! );
//! ```

#[cfg(feature = "generic-serialization")]
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod config;
pub mod keypair;
pub mod path;
pub mod seed;
pub mod sep5;
pub mod slip10;
pub mod strkey;
pub mod util;
pub mod wallet;

pub use crate::config::Config;
pub use crate::keypair::Keypair;
pub use crate::path::DerivationPath;
pub use crate::wallet::{Error, Result, Wallet};
