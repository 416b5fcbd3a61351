use anyhow::Result;
use mdappend::cli::{level_filter, parse_args};
use mdappend::{apply_with, exit_codes};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::FATAL);
        }
    }
}

fn run() -> Result<i32> {
    let config = parse_args()?;

    env_logger::Builder::new()
        .filter_level(level_filter(config.verbosity))
        .parse_default_env()
        .init();

    let summary = apply_with(&config, |line| println!("{line}"))?;
    println!();
    println!("{}", summary.totals());
    Ok(exit_codes::for_summary(&summary))
}
