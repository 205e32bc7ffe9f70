//! AIFA CLI - Main entry point

use aifa_cli::config::Config;
use aifa_cli::intake::{IntakeForm, IntakeSource};
use aifa_cli::store::StoreEvent;
use aifa_cli::{commands, CliError, Cli, Commands, ConfigCommand};
use aifa_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::io::Read;
use std::process;
use tracing::{debug, error, info};

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("aifa")
        .build();

    // Environment variables take precedence over the flag-derived defaults
    let log_config = log_config.clone().with_env_overrides().unwrap_or(log_config);

    // The CLI works without logging, so a failed setup is not fatal
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> aifa_cli::Result<()> {
    let Some(ref command) = cli.command else {
        return Err(CliError::validation("A subcommand is required"));
    };

    let config = load_config(cli)?;

    if let Commands::Config { command } = command {
        return match command {
            ConfigCommand::Get { key } => commands::config::get(&config, key),
            ConfigCommand::Show => commands::config::show(&config),
            ConfigCommand::Path => commands::config::path(),
        };
    }

    let mut store = config.open_store()?;
    debug!(location = %store.location(), files = store.len(), "Store ready");
    store.subscribe(log_change);

    match command {
        Commands::Add {
            path,
            ai,
            name,
            file_type,
            description,
            tags,
            date,
            stdin,
            content,
        } => {
            let source = if *stdin {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                IntakeSource::Pasted(text)
            } else if let Some(text) = content {
                IntakeSource::Pasted(text.clone())
            } else if let Some(path) = path {
                IntakeSource::File(path.clone())
            } else {
                IntakeSource::Empty
            };

            let form = IntakeForm {
                source,
                ai: ai.clone(),
                name: name.clone(),
                file_type: file_type.clone(),
                description: description.clone(),
                tags: tags.clone(),
                date: date.clone(),
            };
            commands::add::run(&mut store, form).map(|_| ())
        },

        Commands::List { limit, format } => commands::list::run(&store, *limit, format),

        Commands::Search {
            query,
            filter,
            format,
        } => commands::search::run(&store, query.clone(), filter, format),

        Commands::Show { id, plain } => commands::show::run(&store, *id, *plain),

        Commands::Copy { id } => commands::copy::run(&store, *id),

        Commands::Download { id, output, force } => {
            commands::download::run(&store, *id, output.as_deref(), *force).map(|_| ())
        },

        Commands::Delete { id, yes } => commands::delete::run(&mut store, *id, *yes).map(|_| ()),

        Commands::Stats { detailed, json } => commands::stats::run(&store, *detailed, *json),

        Commands::Export { output } => commands::export::run(&store, output.as_deref()),

        Commands::Import { file } => commands::import::run(&mut store, file).map(|_| ()),

        Commands::Config { .. } => Ok(()),
    }
}

/// Config file and environment, then command-line flags
fn load_config(cli: &Cli) -> aifa_cli::Result<Config> {
    let mut config = Config::load()?;
    if let Some(dir) = &cli.data_dir {
        config.set_data_dir(dir.clone());
    }
    if let Some(backend) = &cli.backend {
        config.set_backend(backend.parse().map_err(CliError::config)?);
    }
    config.set_verbose(cli.verbose);
    Ok(config)
}

fn log_change(event: &StoreEvent<'_>) {
    info!(change = ?event.kind, files = event.files.len(), "Archive changed");
}
