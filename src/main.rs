mod args;
mod migrate;

use clap::Parser;
use log::{warn, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    if let Err(e) = migrate::run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        for cause in e.iter_chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
