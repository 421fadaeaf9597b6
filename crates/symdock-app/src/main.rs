//! Command-line entry point.

use clap::Parser;
use symdock_app::{CliArgs, run_to_json};

fn main() {
    env_logger::init();
    let args = CliArgs::parse();

    match run_to_json(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("symdock: {}", e);
            std::process::exit(1);
        }
    }
}
