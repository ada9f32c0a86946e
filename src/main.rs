use clap::Parser;
use log::{debug, warn};

mod args;
mod tracker;

fn main() {
    let args = args::Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    debug!("main: args: {:?}", args);

    if let Err(e) = tracker::run_analysis(&args) {
        warn!("main: analysis failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
