//! metropack - JS bundle build orchestration.
//!
//! This binary turns a resolved bundler configuration and CLI bundle
//! arguments into on-disk artifacts: a bundle file (optionally with a source
//! map) and a set of extracted platform assets.

mod bundler;
mod cli;
mod config;
mod engine;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
