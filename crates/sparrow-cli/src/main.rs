#![deny(warnings)]

mod cli;
mod logging;
mod render;
mod store;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = cli::Cli::parse();
    cli::run(args)
}
