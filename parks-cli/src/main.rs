//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use parks_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = parks_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            // Help, version and usage errors carry their own exit codes.
            clap_err.exit();
        }
        eprintln!("parks: {err}");
        std::process::exit(1);
    }
}
