use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use hit_dashboard::{config, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let command = args.get_command();

    if matches!(command, cli::Commands::Version) {
        println!("hitdash v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = config::load_config(&args.config)?;

    // The dashboard owns the terminal, so its logs go to a file
    let interactive = matches!(command, cli::Commands::Dashboard { .. });
    init_tracing(&cfg.logging, interactive)?;

    // Dispatch to appropriate command handler
    match command {
        cli::Commands::Dashboard { url } => {
            commands::dashboard::execute(url, &cfg).await?;
        }
        cli::Commands::Summary { url, json } => {
            commands::summary::execute(url, json, &cfg).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg)?,
        },
        cli::Commands::Version => {}
    }

    Ok(())
}
