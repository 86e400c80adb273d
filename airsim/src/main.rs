//! Flight network simulation application.
#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::inline_always
)]

use std::convert::TryFrom;
use std::path::PathBuf;

use clap::Parser;

use airsim::scenario::Scenario;
use airsim::{output, Time};

/// Runs a flight network simulation.
#[derive(Parser)]
#[clap(version, author)]
struct Opt {
    /// Path to a scenario file in JSON format.
    #[clap(long)]
    scenario: PathBuf,

    /// Directory to write `flights.csv` and `history.csv` to.
    #[clap(long, default_value = "output")]
    output_dir: PathBuf,

    /// Stop after the last event at or before this time; by default, run until no events remain.
    #[clap(long)]
    until: Option<Time>,

    /// Verbosity.
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,

    /// Write logs to this file, replacing its contents.
    #[clap(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[clap(long)]
    no_stderr: bool,
}

/// `Warn` by default; each `-v` adds a level up to `Trace`.
fn log_level(verbose: i32) -> log::LevelFilter {
    [
        log::LevelFilter::Warn,
        log::LevelFilter::Info,
        log::LevelFilter::Debug,
        log::LevelFilter::Trace,
    ]
    .get(usize::try_from(verbose).unwrap_or(0))
    .copied()
    .unwrap_or(log::LevelFilter::Trace)
}

fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log_level(opt.verbose));
    if let Some(path) = &opt.log_output {
        dispatch = dispatch.chain(std::fs::File::create(path)?);
    }
    if !opt.no_stderr {
        dispatch = dispatch.chain(std::io::stderr());
    }
    dispatch.apply()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt)?;
    let scenario = Scenario::from_path(&opt.scenario)?;
    let (registry, mut simulation) = scenario.initialize()?;
    match opt.until {
        Some(limit) => {
            simulation.run_until(limit)?;
        }
        None => simulation.run()?,
    }
    output::write_results(&opt.output_dir, &simulation, &registry)
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, log::LevelFilter::Warn)]
    #[case(0, log::LevelFilter::Warn)]
    #[case(1, log::LevelFilter::Info)]
    #[case(2, log::LevelFilter::Debug)]
    #[case(3, log::LevelFilter::Trace)]
    #[case(7, log::LevelFilter::Trace)]
    fn test_log_level(#[case] verbose: i32, #[case] level: log::LevelFilter) {
        assert_eq!(log_level(verbose), level);
    }
}
