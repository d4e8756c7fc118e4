/// Delta Import - stages games and controller skins into a Delta library
use clap::{Parser, Subcommand};
use delta_import::{
    commands::{self, KindArg},
    prompt::TerminalConfirm,
    AppConfig,
};
use delta_importer::source::{Confirm, FixedAnswer};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "delta-import")]
#[command(about = "Import games and controller skins into a Delta library", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "DELTA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage everything in the shared folder without committing it
    Scan {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Stage, verify and commit files into the library
    Import {
        /// Import everything as this kind instead of deciding per file
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

fn confirmation(assume_yes: bool) -> Arc<dyn Confirm> {
    if assume_yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(TerminalConfirm)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delta_import=info,delta_importer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Scan { yes } => {
            tracing::info!("Scanning {}", config.legacy.directory.display());
            let outcome = commands::scan(&config, confirmation(yes)).await?;
            commands::print_outcome(&outcome);
        }
        Commands::Import { kind, yes, json } => {
            tracing::info!("Importing from {}", config.legacy.directory.display());
            let run =
                commands::import(&config, kind.map(Into::into), confirmation(yes)).await?;
            commands::print_run(&run, json)?;
        }
        Commands::Config => {
            commands::print_config(&config)?;
        }
    }

    Ok(())
}
