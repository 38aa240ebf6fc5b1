use crate::constants;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Determines if the invocation only touches configuration or history
/// and should skip name input entirely.
pub fn is_maintenance_mode(args: &Args) -> bool {
    args.list_config
        || args.clear_history
        || args.new_history_file.is_some()
        || args.clear_history_file
}

/// Constraint-aware team randomizer
///
/// Pairs a list of names into random teams. When the input matches the
/// configured roster, every team crosses the configured groups; names
/// listed as forbidden pairs never share a team. Optional modes deal
/// fixed-size teams, pair two hidden pools, or avoid repeating any
/// pairing recorded in earlier runs.
///
/// Names are read one per line from NAMES_FILE, or from standard input
/// when no file is given.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// File containing names, one per line. Reads standard input when omitted.
    #[arg(value_name = "NAMES_FILE")]
    pub names_file: Option<String>,

    /// Allow a leftover member to form a single-person team instead of
    /// rejecting the draw.
    #[arg(short = 's', long = "singles", help_heading = "Generation")]
    pub singles: bool,

    /// Build teams of exactly N members instead of pairs. The name
    /// count must be divisible by N.
    #[arg(long = "team-size", value_name = "N", help_heading = "Generation")]
    pub team_size: Option<usize>,

    /// Pair one member from each configured group, ignoring the name
    /// input. Both groups must be the same size.
    #[arg(long = "pools", help_heading = "Generation")]
    pub pools: bool,

    /// Never repeat a pairing recorded in the history file from
    /// earlier runs.
    #[arg(short = 'r', long = "avoid-repeats", help_heading = "Generation")]
    pub avoid_repeats: bool,

    /// Split the result into Set 1 (first N teams) and Set 2 (the
    /// rest). Overrides any split position from the config file.
    #[arg(long = "split", value_name = "N", help_heading = "Generation")]
    pub split: Option<usize>,

    /// Seed the random source for a reproducible draw.
    #[arg(long = "seed", value_name = "SEED", help_heading = "Generation")]
    pub seed: Option<u64>,

    /// Run the deal-one-pair-at-a-time HTTP server instead of
    /// generating a full team list.
    #[arg(
        long = "serve",
        help_heading = "Server",
        value_name = "ADDR",
        num_args = 0..=1,
        default_missing_value = constants::server::DEFAULT_ADDR
    )]
    pub serve: Option<String>,

    /// Erase the recorded pairing history and exit.
    #[arg(long = "clear-history", help_heading = "Configuration")]
    pub clear_history: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Update the history file path in config. This sets a persistent
    /// custom history location.
    #[arg(long = "set-history-file", help_heading = "Configuration")]
    pub new_history_file: Option<String>,

    /// Clear the custom history file path from config. This reverts to
    /// the default location.
    #[arg(long = "clear-history-file", help_heading = "Configuration")]
    pub clear_history_file: bool,

    /// Enable debug mode: info logs are echoed to the terminal in
    /// addition to the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be
    /// written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
