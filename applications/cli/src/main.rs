/// Groove - local music library shell
use clap::{Parser, Subcommand};
use groove_cli::{GrooveConfig, Shell};
use groove_core::traits::DurableStore;
use groove_storage::{MemoryStore, RedbStore};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groove")]
#[command(about = "Local music library browser and player", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./groove.toml if present)
    #[arg(short, long, env = "GROOVE_CONFIG")]
    config: Option<PathBuf>,

    /// Database path, overriding storage.database_path
    #[arg(long)]
    db: Option<PathBuf>,

    /// Keep everything in memory for this session
    #[arg(long, conflicts_with = "db")]
    in_memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Import audio files or directories into the library
    Import {
        /// Files or directories to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List the library
    List,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groove=info,groove_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = GrooveConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.storage.database_path = db;
    }

    let store: Box<dyn DurableStore> = if cli.in_memory {
        tracing::info!("Using in-memory store");
        Box::new(MemoryStore::new())
    } else {
        tracing::info!("Database: {}", config.storage.database_path.display());
        Box::new(RedbStore::open(&config.storage.database_path)?)
    };

    let mut shell = Shell::new(&config, store);
    shell.load()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            shell.run(io::stdin().lock(), &mut out)?;
        }
        Commands::Import { paths } => {
            for path in &paths {
                let count = shell.import_path(path)?;
                writeln!(out, "{}: imported {} file(s)", path.display(), count)?;
            }
        }
        Commands::List => {
            shell.execute("ls", &mut out)?;
        }
    }

    Ok(())
}
