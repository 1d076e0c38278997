use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// bambooflow - bamboo supply chain dashboard
#[derive(Parser)]
#[command(name = "bambooflow")]
#[command(about = "Bamboo supply chain dashboard for farmers, factory and admin", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Inspect and review stored farmer records
    Farmer {
        #[command(subcommand)]
        command: cli::farmer::FarmerCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = bambooflow::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    bambooflow::observability::init_observability(
        "bambooflow",
        env!("CARGO_PKG_VERSION"),
        &config.tracing,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::Farmer { command } => cli::farmer::run(&config, command).await,
    }
}
