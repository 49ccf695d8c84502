//! SplitBill CLI - Main entry point

use clap::{Parser, Subcommand};
use splitbill_ledger::{NewBill, SplitMethod};
use splitbill_rpc::{api, commands, AppConfig, AppContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "splitbill")]
#[command(about = "SplitBill - shared expense ledger", long_about = None)]
struct Cli {
    /// Data directory path (overrides SPLITBILL_DATA_DIR)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new bill
    Create {
        /// Bill title
        #[arg(long)]
        title: String,
        /// Total amount of the bill
        #[arg(long)]
        total: f64,
        /// Creator wallet address
        #[arg(long)]
        creator: String,
        /// Optional free-text note
        #[arg(long)]
        description: Option<String>,
        /// Split method: equal or custom
        #[arg(long, default_value = "equal")]
        split: SplitMethod,
        /// Participant as ADDRESS[:NAME][=AMOUNT] (repeatable)
        #[arg(long = "participant", short = 'p', required = true)]
        participants: Vec<String>,
    },

    /// List bills created by or owed by an address
    List {
        /// Wallet address
        address: String,
    },

    /// Show a single bill
    Show {
        /// Bill ID
        id: String,
    },

    /// Record a participant's payment
    Pay {
        /// Bill ID
        id: String,
        /// Participant wallet address
        participant: String,
        /// Payment reference (transaction hash)
        reference: String,
    },

    /// Delete a bill (creator only)
    Delete {
        /// Bill ID
        id: String,
        /// Requesting wallet address
        requester: String,
    },

    /// Dashboard figures for an address
    Summary {
        /// Wallet address
        address: String,
    },

    /// Show the effective configuration
    Config,

    /// Start the HTTP API server
    Serve {
        /// Host to bind (overrides SPLITBILL_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides SPLITBILL_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(data) = cli.data {
        config.data_dir = data;
    }
    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            config.host = host.clone();
        }
        if let Some(port) = port {
            config.port = *port;
        }
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Create {
            title,
            total,
            creator,
            description,
            split,
            participants,
        } => {
            let mut input = NewBill::new(title, total, creator).with_split(split);
            if let Some(description) = description {
                input = input.with_description(description);
            }
            for participant in &participants {
                input = input.with_participant(commands::parse_participant(participant)?);
            }
            commands::create(&ctx, input)?;
        }

        Commands::List { address } => {
            commands::list(&ctx, &address)?;
        }

        Commands::Show { id } => {
            commands::show(&ctx, &id)?;
        }

        Commands::Pay {
            id,
            participant,
            reference,
        } => {
            commands::pay(&ctx, &id, &participant, &reference)?;
        }

        Commands::Delete { id, requester } => {
            commands::delete(&ctx, &id, &requester)?;
        }

        Commands::Summary { address } => {
            commands::summary(&ctx, &address)?;
        }

        Commands::Config => {
            commands::config(&ctx)?;
        }

        Commands::Serve { .. } => {
            api::serve(&ctx).await?;
        }
    }

    Ok(())
}
