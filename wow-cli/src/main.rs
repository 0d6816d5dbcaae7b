use std::io;
use std::process::ExitCode;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use wow_cli::{ColorHelper, color_mode, command, resolve_config};
use wow_observations::PaginatedFetcher;

fn main() -> ExitCode {
    let matches = command().get_matches();

    let color_helper = ColorHelper::new(color_mode(&matches));
    color_helper.apply();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(color_helper.should_color_stderr())
        .with_writer(io::stderr)
        .init();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", color_helper.error_label(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    // Resolved before the client exists, so a missing key never reaches the network
    let config = resolve_config(matches, |name| std::env::var(name).ok())?;
    debug!(?config, "resolved configuration");
    let fetcher = PaginatedFetcher::new(&config)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    rt.block_on(fetcher.run(&mut out))?;
    Ok(())
}
