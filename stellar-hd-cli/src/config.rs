use std::{error, fmt, fs, io, path::Path};

use stellar_hd_wallet::config::Config as WalletConfig;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Yaml(serde_yaml::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "cannot read the configuration file: {}", err),
            Error::Yaml(err) => write!(f, "invalid configuration file: {}", err),
        }
    }
}
impl error::Error for Error {}
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Yaml(e)
    }
}

/// command line settings, loaded from the YAML file given with `--config`
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// wallet construction settings
    pub wallet: WalletConfig,

    /// number of accounts listed by `keypair` when `--count` is not given
    pub accounts: u32,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            wallet: WalletConfig::default(),
            accounts: 1,
        }
    }
}
impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}
