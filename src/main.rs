// src/main.rs
use clap::Parser;
use pairup::cli::Args;
use pairup::config::{Config, SplitConfig};
use pairup::display;
use pairup::error::AppError;
use pairup::generator::{GenerateOptions, generate};
use pairup::history::HistoryStore;
use pairup::logging::setup_logging;
use pairup::names::parse_list;
use pairup::server;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::stdout;
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Validate argument combinations
    if args.team_size.is_some() && args.pools {
        return Err(AppError::config_error(
            "Cannot use both --team-size and --pools simultaneously",
        ));
    }

    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    // Handle configuration updates
    if args.new_history_file.is_some() || args.clear_history_file {
        let mut config = Config::load().await.unwrap_or_default();

        if let Some(new_path) = args.new_history_file {
            config.history_file = Some(new_path);
        } else if args.clear_history_file {
            config.history_file = None;
            println!("Custom history file path cleared. Using default location.");
        }

        config.save().await?;
        println!("Config updated successfully!");
        return Ok(());
    }

    // Load config first to fail early if there's an issue
    let mut config = Config::load().await?;

    if args.clear_history {
        let store = HistoryStore::new(config.history_path());
        store.clear().await?;
        println!("Pairing history cleared.");
        return Ok(());
    }

    if let Some(addr) = args.serve.as_deref() {
        return server::serve(addr, &config, args.seed).await;
    }

    // A --split on the command line overrides the configured position
    // but keeps the composed flag.
    if let Some(position) = args.split {
        let composed = config.split.as_ref().map(|s| s.composed).unwrap_or(false);
        config.split = Some(SplitConfig {
            position: Some(position),
            composed,
        });
    }

    let text = match &args.names_file {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    let names = parse_list(&text);

    let options = GenerateOptions {
        allow_singles: args.singles,
        team_size: args.team_size,
        pools_hidden: args.pools,
    };
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let result = if args.avoid_repeats {
        let store = HistoryStore::new(config.history_path());
        let mut history = store.load().await?;
        let result = generate(&names, &config, &options, Some(&mut history), &mut rng);
        // Only successful generations are written back.
        if result.is_ok() {
            store.save(&history).await?;
        }
        result
    } else {
        generate(&names, &config, &options, None, &mut rng)
    };

    match result {
        Ok(generation) => {
            display::render_generation(&mut stdout(), &generation)?;
            Ok(())
        }
        Err(err) if err.is_input_error() || err.is_constraint_error() => {
            tracing::warn!("generation failed: {err}");
            display::render_error(&mut stdout(), &err)?;
            Ok(())
        }
        Err(err) => Err(err),
    }
}
