use std::process::ExitCode;

use driver::Driver;

mod cli;
mod driver;
mod editor;
mod report;

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cfg = <cli::Cli as clap::Parser>::parse();
    init_logger(cfg.verbose);

    match Driver::from_config(cfg).and_then(Driver::run) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
