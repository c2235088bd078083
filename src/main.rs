use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dh_store::{MAX_DISC_STORAGE_SIZE_ENV, StoreConfig, VersionId, VersionStore};

#[derive(Parser)]
#[command(name = "delta-history")]
#[command(about = "Content-addressed version store with binary deltas")]
struct Cli {
    /// Storage root directory
    #[arg(long, global = true, env = "DELTA_HISTORY_ROOT", default_value = "delta_history")]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the contents of a file as a new version
    Add {
        /// Logical file identifier
        file_id: String,
        /// Path to the content to store
        path: PathBuf,
    },
    /// Print the latest version of a file
    Latest {
        file_id: String,
        /// Write to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check whether a file, or one of its versions, is stored
    Has {
        file_id: String,
        version_id: Option<String>,
    },
    /// List the stored versions of a file; the latest is marked with `*`
    Versions { file_id: String },
    /// List known files
    Files,
    /// Write the delta from a stored version to the latest version
    Delta {
        file_id: String,
        version_id: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Rebuild a version from a delta and the source it was computed against
    Apply {
        /// Delta produced by `delta`
        delta: PathBuf,
        /// Contents of the source version
        dictionary: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete every file and version in the store
    Reset,
}

/// Entry point for the delta-history CLI
///
/// # Environment Variables
/// - `DELTA_HISTORY_ROOT`: storage root (default: "delta_history")
/// - `DELTA_HISTORY_MAX_DISC_STORAGE_SIZE`: recorded capacity ceiling in bytes
/// - `RUST_LOG`: log filter (default directive: "delta_history=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("delta_history=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = StoreConfig::from_env_value(std::env::var(MAX_DISC_STORAGE_SIZE_ENV).ok())?;

    let stdout = std::io::stdout();
    run(cli, config, &mut stdout.lock())
}

fn run(cli: Cli, config: StoreConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        writeln!(out, "Use 'delta-history --help' for commands")?;
        return Ok(());
    };

    match command {
        Commands::Add { file_id, path } => {
            let mut store = open_store(&cli.root, config)?;
            let content = read_input(&path)?;
            let version_id = store.add_version(&file_id, &content)?;
            writeln!(out, "{}", version_id)?;
        }
        Commands::Latest {
            file_id,
            out: out_path,
        } => {
            let store = open_store(&cli.root, config)?;
            let content = store.get_latest_version(&file_id)?;
            write_output(&content, out_path.as_deref(), out)?;
        }
        Commands::Has {
            file_id,
            version_id: None,
        } => {
            let store = open_store(&cli.root, config)?;
            writeln!(out, "{}", store.has_file(&file_id))?;
        }
        Commands::Has {
            file_id,
            version_id: Some(version_id),
        } => {
            let version_id = VersionId::parse(&version_id)?;
            let store = open_store(&cli.root, config)?;
            writeln!(out, "{}", store.has_version(&file_id, &version_id)?)?;
        }
        Commands::Versions { file_id } => {
            let store = open_store(&cli.root, config)?;
            let latest = store.latest_version_id(&file_id)?;
            for version_id in store.versions(&file_id)? {
                let marker = if version_id == latest { "*" } else { " " };
                writeln!(out, "{} {}", marker, version_id)?;
            }
        }
        Commands::Files => {
            let store = open_store(&cli.root, config)?;
            let file_ids = store.file_ids();
            if file_ids.is_empty() {
                writeln!(out, "No files stored.")?;
            }
            for file_id in file_ids {
                writeln!(out, "{}", file_id)?;
            }
            tracing::info!(
                stored_bytes = store.stored_bytes()?,
                max_disc_storage_size = store.config().max_disc_storage_size(),
                "storage usage"
            );
        }
        Commands::Delta {
            file_id,
            version_id,
            out: out_path,
        } => {
            let version_id = VersionId::parse(&version_id)?;
            let store = open_store(&cli.root, config)?;
            let delta = store.get_delta(&file_id, &version_id)?;
            fs::write(&out_path, &delta)
                .with_context(|| format!("failed to write delta to {}", out_path.display()))?;
            writeln!(out, "Wrote {} byte delta to {}", delta.len(), out_path.display())?;
        }
        Commands::Reset => {
            let mut store = open_store(&cli.root, config)?;
            store.reset()?;
            writeln!(out, "Store reset.")?;
        }
        Commands::Apply {
            delta,
            dictionary,
            out: out_path,
        } => {
            // Decoding only needs the codec, not a persistent store
            let delta = read_input(&delta)?;
            let dictionary = read_input(&dictionary)?;
            let store = VersionStore::temporary(config)?;
            let rebuilt = store.apply_delta(&delta, &dictionary)?;
            write_output(&rebuilt, out_path.as_deref(), out)?;
        }
    }

    Ok(())
}

fn open_store(root: &Path, config: StoreConfig) -> anyhow::Result<VersionStore> {
    VersionStore::open(root, config)
        .with_context(|| format!("failed to open store at {}", root.display()))
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(content: &[u8], path: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            out.write_all(content)?;
            Ok(())
        }
    }
}
