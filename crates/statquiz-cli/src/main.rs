//! statquiz CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "statquiz", version, about = "Health-statistics quiz trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive quiz session
    Quiz {
        /// Path to a .toml question bank or directory of banks
        #[arg(long, default_value = "question-banks")]
        bank: PathBuf,

        /// Restrict the session to one topic
        #[arg(long)]
        topic: Option<u32>,

        /// User the session belongs to
        #[arg(long, default_value = "defaultUser")]
        user: String,

        /// Database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show recorded progress
    Progress {
        /// User whose history to show
        #[arg(long, default_value = "defaultUser")]
        user: String,

        /// Database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show or set the display name
    Profile {
        /// Display name to save; omit to show the current one
        #[arg(long)]
        name: Option<String>,

        /// User the profile belongs to
        #[arg(long, default_value = "defaultUser")]
        user: String,

        /// Database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create a starter question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("statquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            bank,
            topic,
            user,
            db,
        } => commands::quiz::execute(bank, topic, user, db).await,
        Commands::Progress { user, db } => commands::progress::execute(user, db).await,
        Commands::Profile { name, user, db } => commands::profile::execute(name, user, db).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
