use clap::{Arg, ArgMatches, Command, value_parser};

use wow_observations::{FetcherConfig, Result};

use crate::colors::ColorMode;

/// Argument definitions for the `wow-observations` binary
pub fn command() -> Command {
    Command::new("wow-observations")
        .about("Page through Wild Orchid Watch observations and print a summary of each record")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Observations endpoint (overrides WOW_BASE_URL)"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .help("Records requested per page [default: 3]")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("max-pages")
                .long("max-pages")
                .value_name("N")
                .help("Stop after this many pages [default: 3]")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("fields")
                .long("fields")
                .value_name("N")
                .help("Observation field values printed per record [default: 2]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("user-agent")
                .long("user-agent")
                .value_name("UA")
                .help("User-Agent header (overrides WOW_USER_AGENT)"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Control color of error output")
                .value_parser(["auto", "always", "never"])
                .default_value("auto"),
        )
        .after_help(
            "ENVIRONMENT:\n\
             \x20 API_KEY          API key sent in the Authorization header (required)\n\
             \x20 WOW_BASE_URL     Observations endpoint\n\
             \x20 WOW_USER_AGENT   User-Agent header\n\
             \x20 RUST_LOG         Log filter for stderr diagnostics (default: warn)",
        )
}

/// Color mode selected on the command line
pub fn color_mode(matches: &ArgMatches) -> ColorMode {
    matches
        .get_one::<String>("color")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Build the run configuration: environment first, then command-line overrides.
pub fn resolve_config<F>(matches: &ArgMatches, lookup: F) -> Result<FetcherConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = FetcherConfig::from_lookup(lookup)?;

    if let Some(url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(url);
    }
    if let Some(&page_size) = matches.get_one::<u32>("page-size") {
        config = config.with_page_size(page_size);
    }
    if let Some(&max_pages) = matches.get_one::<u32>("max-pages") {
        config = config.with_max_pages(max_pages);
    }
    if let Some(&fields) = matches.get_one::<usize>("fields") {
        config = config.with_max_fields_shown(fields);
    }
    if let Some(ua) = matches.get_one::<String>("user-agent") {
        config = config.with_user_agent(ua);
    }

    config.validate()?;
    Ok(config)
}
