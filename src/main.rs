//! URL Timeline
//!
//! Annotate a fixed-length timeline with timestamped events and replay them.
//! The whole session lives in the URL query string.

mod app;
mod constants;
mod core;
mod state;
mod timeline;
mod utils;

use clap::Parser;

fn main() {
    env_logger::init();

    let cli = app::Cli::parse();
    if let Err(err) = app::run(cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
