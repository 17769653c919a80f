pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod exitcode;
pub mod httpclient;

pub use cli::execute_cmd;
pub use httpclient::{Authentication, Client, ClientOptions};

use clap::Parser;
use cli::opts::MainOpts;

/// Reads the program arguments into the `MainOpts` data structure.
pub fn read_args() -> MainOpts {
    log::debug!("Parsing command line options…");
    let m = MainOpts::parse();

    log::debug!("Parsed options: {:?}", m);
    m
}
