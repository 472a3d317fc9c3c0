#[macro_use]
extern crate clap;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

mod commands;
mod config;

use commands::{Decode, Derive, Encode, HasCommand, Keypair};
use config::Config;

use std::io;

fn main() {
    use clap::{App, Arg};

    env_logger::init();
    trace!("Starting application, {}-{}", crate_name!(), crate_version!());

    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(Derive::clap_options())
        .subcommand(Keypair::clap_options())
        .subcommand(Encode::clap_options())
        .subcommand(Decode::clap_options())
        .get_matches();

    let cfg = match matches.value_of("config") {
        None => Config::default(),
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("{}", err);
                ::std::process::exit(1)
            }
        },
    };
    debug!("configuration: {:?}", cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match matches.subcommand() {
        (Derive::COMMAND, Some(args)) => Derive::run(&cfg, args, &mut out),
        (Keypair::COMMAND, Some(args)) => Keypair::run(&cfg, args, &mut out),
        (Encode::COMMAND, Some(args)) => Encode::run(&cfg, args, &mut out),
        (Decode::COMMAND, Some(args)) => Decode::run(&cfg, args, &mut out),
        _ => {
            eprintln!("{}", matches.usage());
            ::std::process::exit(1)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        ::std::process::exit(1)
    }
}
