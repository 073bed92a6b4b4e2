use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyrank::config::Config;
use keyrank::geometry::GeometryModel;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank key sequences by typing effort", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/keyseq_effort.yml")]
    geometry: String,

    /// JSON file with ngram and rule settings; explicit flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Place pending ngrams into the ranking
    Sort(cmd::sort::SortArgs),
    /// Show the ranking with ngram facts
    View(cmd::view::ViewArgs),
    /// Validate geometry and ranking and report progress
    Check(cmd::check::CheckArgs),
}

/// File settings with explicit command line flags on top.
fn resolve_config(
    cli_config: &Config,
    file: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> keyrank::KrResult<Config> {
    let Some(path) = file else {
        return Ok(cli_config.clone());
    };

    info!("Loading settings from {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_config, m);
    }
    Ok(config)
}

fn main() {
    // Raw matches tell explicit flags apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let geometry = GeometryModel::load_from_file(&cli.geometry).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });
    let geometry = Arc::new(geometry);
    let sub_matches = matches.subcommand().map(|(_, m)| m);

    let result = match cli.command {
        Commands::Sort(args) => resolve_config(&args.config, cli.config.as_deref(), sub_matches)
            .and_then(|config| cmd::sort::run(args, config, geometry)),
        Commands::View(args) => cmd::view::run(args, geometry),
        Commands::Check(args) => resolve_config(&args.config, cli.config.as_deref(), sub_matches)
            .and_then(|config| cmd::check::run(args, config, geometry)),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
