//! Buildify export CLI
//!
//! Usage:
//!   buildify-export [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>          react, vue or web-components
//!   -s, --styling <STYLING>        inline, stylesheet or css-in-js
//!   -t, --typescript               Emit TypeScript
//!   -n, --component-name <NAME>    Top-level component name
//!   -o, --out <DIR>                Write files into DIR instead of stdout

use std::io;

use buildify_cli::{Cli, run};
use clap::Parser;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli, io::stdin().lock(), io::stdout().lock()) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
