use std::{error, fmt, io, result};

use clap::{App, Arg, ArgMatches, SubCommand};
use stellar_hd_wallet::strkey::{self, Kind, PAYLOAD_SIZE};
use stellar_hd_wallet::util::hex;
use stellar_hd_wallet::{path, sep5, wallet, Wallet};

use crate::config::Config;

const SEED_ENVIRONMENT: &'static str = "STELLAR_HD_SEED";

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Argument(clap::Error),
    MissingSeed,
    Wallet(wallet::Error),
    Hexadecimal(hex::Error),
    InvalidPayloadLength(usize),
    Strkey(strkey::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{}", err),
            Error::Argument(err) => write!(f, "{}", err),
            Error::MissingSeed => write!(
                f,
                "no seed given, use `--seed` or set {}",
                SEED_ENVIRONMENT
            ),
            Error::Wallet(err) => write!(f, "{}", err),
            Error::Hexadecimal(err) => write!(f, "invalid hexadecimal input: {}", err),
            Error::InvalidPayloadLength(sz) => write!(
                f,
                "invalid key length, expected {} bytes but received {} bytes",
                PAYLOAD_SIZE, sz
            ),
            Error::Strkey(err) => write!(f, "{}", err),
        }
    }
}
impl error::Error for Error {}
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
impl From<clap::Error> for Error {
    fn from(e: clap::Error) -> Self {
        Error::Argument(e)
    }
}
impl From<wallet::Error> for Error {
    fn from(e: wallet::Error) -> Self {
        Error::Wallet(e)
    }
}
impl From<path::Error> for Error {
    fn from(e: path::Error) -> Self {
        Error::Wallet(e.into())
    }
}
impl From<hex::Error> for Error {
    fn from(e: hex::Error) -> Self {
        Error::Hexadecimal(e)
    }
}
impl From<strkey::Error> for Error {
    fn from(e: strkey::Error) -> Self {
        Error::Strkey(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

pub trait HasCommand {
    const COMMAND: &'static str;

    fn clap_options<'a, 'b>() -> App<'a, 'b>;

    fn run<W: io::Write>(cfg: &Config, args: &ArgMatches, out: &mut W) -> Result<()>;
}

fn seed_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("SEED")
        .long("seed")
        .value_name("HEX")
        .env(SEED_ENVIRONMENT)
        .help("the binary seed of the wallet, hexadecimal encoded (the BIP-39 seed of the mnemonic)")
}

fn open_wallet(cfg: &Config, args: &ArgMatches) -> Result<Wallet> {
    match args.value_of("SEED") {
        None => Err(Error::MissingSeed),
        Some(seed) => Ok(Wallet::from_seed_with_config(seed, &cfg.wallet)?),
    }
}

fn kind_name(kind: Kind) -> &'static str {
    match kind {
        Kind::PublicKey => "public",
        Kind::Seed => "seed",
    }
}

/// print the raw private key found at a derivation path
pub struct Derive;
impl HasCommand for Derive {
    const COMMAND: &'static str = "derive";

    fn clap_options<'a, 'b>() -> App<'a, 'b> {
        SubCommand::with_name(Self::COMMAND)
            .about("derive the private key at the given hardened path")
            .arg(seed_definition())
            .arg(
                Arg::with_name("PATH")
                    .help("the derivation path, for example m/44'/148'/0'")
                    .required(true),
            )
    }

    fn run<W: io::Write>(cfg: &Config, args: &ArgMatches, out: &mut W) -> Result<()> {
        let wallet = open_wallet(cfg, args)?;
        let path = value_t!(args.value_of("PATH"), String)?;
        let key = wallet.derive(&path)?;
        writeln!(out, "{}", key)?;
        Ok(())
    }
}

/// print SEP-0005 account keypairs
pub struct Keypair;
impl HasCommand for Keypair {
    const COMMAND: &'static str = "keypair";

    fn clap_options<'a, 'b>() -> App<'a, 'b> {
        SubCommand::with_name(Self::COMMAND)
            .about("print the keypairs of the accounts m/44'/148'/{index}'")
            .arg(seed_definition())
            .arg(
                Arg::with_name("INDEX")
                    .long("index")
                    .value_name("INDEX")
                    .default_value("0")
                    .help("index of the first account"),
            )
            .arg(
                Arg::with_name("COUNT")
                    .long("count")
                    .value_name("COUNT")
                    .help("number of accounts to print, defaults to the configured `accounts`"),
            )
            .arg(
                Arg::with_name("PUBLIC_ONLY")
                    .long("public-only")
                    .help("do not print the secrets"),
            )
    }

    fn run<W: io::Write>(cfg: &Config, args: &ArgMatches, out: &mut W) -> Result<()> {
        let wallet = open_wallet(cfg, args)?;
        let first = value_t!(args.value_of("INDEX"), u32)?;
        let count = match args.value_of("COUNT") {
            None => cfg.accounts,
            Some(_) => value_t!(args.value_of("COUNT"), u32)?,
        };
        let public_only = args.is_present("PUBLIC_ONLY");

        for offset in 0..count {
            let index = first.saturating_add(offset);
            let keypair = wallet.get_keypair(index)?;
            let path = sep5::account_path(index)?;
            if public_only {
                writeln!(out, "{}\t{}", path, keypair.public_key())?;
            } else {
                writeln!(out, "{}\t{}\t{}", path, keypair.public_key(), keypair.secret())?;
            }
        }
        Ok(())
    }
}

/// encode a raw 32 bytes key as a strkey
pub struct Encode;
impl HasCommand for Encode {
    const COMMAND: &'static str = "encode";

    fn clap_options<'a, 'b>() -> App<'a, 'b> {
        SubCommand::with_name(Self::COMMAND)
            .about("encode a raw ed25519 key into its strkey text")
            .arg(
                Arg::with_name("KIND")
                    .help("the kind of key")
                    .possible_values(&["public", "seed"])
                    .required(true),
            )
            .arg(
                Arg::with_name("KEY")
                    .help("the 32 bytes key, hexadecimal encoded")
                    .required(true),
            )
    }

    fn run<W: io::Write>(_: &Config, args: &ArgMatches, out: &mut W) -> Result<()> {
        let kind = match args.value_of("KIND") {
            Some("seed") => Kind::Seed,
            _ => Kind::PublicKey,
        };
        let bytes = hex::decode(&value_t!(args.value_of("KEY"), String)?)?;
        if bytes.len() != PAYLOAD_SIZE {
            return Err(Error::InvalidPayloadLength(bytes.len()));
        }
        let mut payload = [0; PAYLOAD_SIZE];
        payload.copy_from_slice(&bytes);

        writeln!(out, "{}", strkey::encode(kind, &payload))?;
        Ok(())
    }
}

/// decode a strkey into its kind and raw key
pub struct Decode;
impl HasCommand for Decode {
    const COMMAND: &'static str = "decode";

    fn clap_options<'a, 'b>() -> App<'a, 'b> {
        SubCommand::with_name(Self::COMMAND)
            .about("decode a strkey text, G... or S..., into its raw key")
            .arg(
                Arg::with_name("STRKEY")
                    .help("the strkey text")
                    .required(true),
            )
    }

    fn run<W: io::Write>(_: &Config, args: &ArgMatches, out: &mut W) -> Result<()> {
        let text = value_t!(args.value_of("STRKEY"), String)?;
        let (kind, payload) = strkey::decode(&text)?;
        writeln!(out, "{}\t{}", kind_name(kind), hex::encode(&payload))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &'static str =
        "e4a5a632e70943ae7f07659df1332160937fad82587216a4c64315a0fb39497e\
         e4a01f76ddab4cba68147977f3a147b6ad584c41808e8238a07f6cc4b582f186";

    fn run<C: HasCommand>(cfg: &Config, args: &[&str]) -> Result<String> {
        let matches = C::clap_options().get_matches_from_safe(args)?;
        let mut out = Vec::new();
        C::run(cfg, &matches, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn derive_parent_key() {
        let out = run::<Derive>(&Config::default(), &["derive", "--seed", SEED, "m/44'/148'"]);
        assert_eq!(
            out.unwrap(),
            "e0eec84fe165cd427cb7bc9b6cfdef0555aa1cb6f9043ff1fe986c3c8ddd22e3\n"
        );
    }

    #[test]
    fn derive_malformed_path() {
        match run::<Derive>(&Config::default(), &["derive", "--seed", SEED, "m/44/148"]) {
            Err(Error::Wallet(wallet::Error::MalformedPath(_))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn keypair_range() {
        let out = run::<Keypair>(
            &Config::default(),
            &["keypair", "--seed", SEED, "--index", "1", "--count", "2"],
        )
        .unwrap();
        assert_eq!(
            out,
            "m/44'/148'/1'\t\
             GBAW5XGWORWVFE2XTJYDTLDHXTY2Q2MO73HYCGB3XMFMQ562Q2W2GJQX\t\
             SCEPFFWGAG5P2VX5DHIYK3XEMZYLTYWIPWYEKXFHSK25RVMIUNJ7CTIS\n\
             m/44'/148'/2'\t\
             GAY5PRAHJ2HIYBYCLZXTHID6SPVELOOYH2LBPH3LD4RUMXUW3DOYTLXW\t\
             SDAILLEZCSA67DUEP3XUPZJ7NYG7KGVRM46XA7K5QWWUIGADUZCZWTJP\n"
        );
    }

    #[test]
    fn keypair_count_from_config() {
        let cfg = Config {
            accounts: 3,
            ..Config::default()
        };
        let out = run::<Keypair>(&cfg, &["keypair", "--seed", SEED, "--public-only"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "m/44'/148'/0'\tGDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6"
        );
    }

    #[test]
    fn keypair_index_out_of_range() {
        let out = run::<Keypair>(
            &Config::default(),
            &["keypair", "--seed", SEED, "--index", "2147483648"],
        );
        match out {
            Err(Error::Wallet(wallet::Error::IndexOutOfRange(2147483648))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn short_seed_follows_the_config() {
        let args = ["derive", "--seed", "0011", "m"];
        assert!(run::<Derive>(&Config::default(), &args).is_err());

        let cfg = Config {
            wallet: stellar_hd_wallet::Config::permissive(),
            ..Config::default()
        };
        assert!(run::<Derive>(&cfg, &args).is_ok());
    }

    #[test]
    fn encode_decode() {
        let key = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
        let address = "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR";

        let out = run::<Encode>(&Config::default(), &["encode", "public", key]).unwrap();
        assert_eq!(out, format!("{}\n", address));

        let out = run::<Decode>(&Config::default(), &["decode", address]).unwrap();
        assert_eq!(out, format!("public\t{}\n", key));
    }

    #[test]
    fn encode_rejects_short_keys() {
        match run::<Encode>(&Config::default(), &["encode", "seed", "0011"]) {
            Err(Error::InvalidPayloadLength(2)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn decode_rejects_corrupted_strkeys() {
        let corrupted = "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUA";
        match run::<Decode>(&Config::default(), &["decode", corrupted]) {
            Err(Error::Strkey(strkey::Error::ChecksumMismatch { .. })) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
