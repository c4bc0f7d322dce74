use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod events;
mod filter;
mod input;
mod logging;
mod mock_data;
mod reply;
mod session;
mod ui;

use config::Config;
use mock_data::CompanyStatus;

#[derive(Parser)]
#[command(name = "research-chat")]
#[command(version)]
#[command(about = "Terminal mockup of a research document assistant", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.research-chat/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent conversations
    Conversations {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List PDF documents
    Files {
        #[arg(long)]
        json: bool,
    },
    /// List companies
    Companies {
        /// Only show companies with this status (active, inactive)
        #[arg(long)]
        status: Option<CompanyStatus>,
        #[arg(long)]
        json: bool,
    },
    /// Write the current configuration to disk
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let log_path = logging::init(&config)?;
    let mut stdout = io::stdout();

    match cli.command {
        None => {
            tracing::info!(log = %log_path.display(), "launching research chat");
            ui::run(config)?;
            tracing::info!("research chat closed");
        }
        Some(Commands::Conversations { search, json }) => {
            commands::list_conversations(&mut stdout, search.as_deref(), json)?;
        }
        Some(Commands::Files { json }) => {
            commands::list_files(&mut stdout, json)?;
        }
        Some(Commands::Companies { status, json }) => {
            commands::list_companies(&mut stdout, status, json)?;
        }
        Some(Commands::InitConfig) => {
            let path = config.save()?;
            println!("📝 Wrote config to {}", path.display());
        }
    }

    Ok(())
}
