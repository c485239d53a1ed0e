extern crate anyhow;
extern crate cfg_if;
extern crate clap;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate voxell_rng;
extern crate walkdir;

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use crate::cli::{Cli, Command};
use clap::Parser;
use std::process;

mod bitio;
mod cli;
mod huffman;

fn main() {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let failures = match cli.command {
        Command::Compress(args) => cli::compress::compress(args),
        Command::Decompress(args) => cli::decompress::decompress(args),
        Command::Test(args) => cli::test::test(args),
    };

    if failures > 0 {
        process::exit(1);
    }
}
