mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use alertwatch::config::{load_config, resolve_cluster};
use cli::{Cli, ClusterCommands, Commands};

fn main() {
    let cli = Cli::parse();

    // Set up tracing
    let filter = if cli.global_opts.quiet {
        "error".to_string()
    } else {
        match cli.global_opts.verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clusters { command } => match command {
            ClusterCommands::Add {
                name,
                monitoring_host,
                default,
            } => commands::clusters::add(name, monitoring_host, default),
            ClusterCommands::List => commands::clusters::list(cli.global_opts.json),
            ClusterCommands::Remove { name } => commands::clusters::remove(name),
        },
        Commands::Alerts { matching } => {
            let config = load_config()?;
            let cluster = resolve_cluster(&config, &cli.cluster)?;
            let engine = commands::Engine::start(&config, cli.global_opts.timeout)?;
            commands::alerts::show(&engine, &cluster, &matching, cli.global_opts.json)
        }
        Commands::Watch { matching, interval } => {
            let config = load_config()?;
            let cluster = resolve_cluster(&config, &cli.cluster)?;
            let engine = commands::Engine::start(&config, cli.global_opts.timeout)?;
            commands::watch::run(&engine, &cluster, &matching, interval, cli.global_opts.json)
        }
    }
}
