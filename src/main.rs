use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lyric_clues::{Config, Dataset, RestoreContext, encode_dataset, write_failures};

#[derive(Parser, Debug)]
#[command(
    name = "lyric-clues",
    about = "Encode lyrics into clues and restore them from local originals"
)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace every lyric text of a dataset with its clues.
    Encode {
        /// Plain-text dataset.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the clue dataset.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rebuild lyric texts of a clue dataset from the original lyrics files.
    Restore {
        /// Clue dataset.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory holding `<song>/<language>/lyrics.txt`.
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Where to write the restored dataset.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON lines file receiving one record per unrestored segment.
        #[arg(short, long)]
        failure_log: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Encode { input, output } => {
            let input = input.unwrap_or_else(|| config.input.clone());
            let output = output.unwrap_or_else(|| config.encode_output.clone());

            let dataset = Dataset::load(&input)?;
            tracing::info!(path = %input.display(), songs = dataset.len(), "Loaded dataset");
            let encoded = encode_dataset(&dataset, &config.registry());
            encoded.save(&output)?;
            tracing::info!(path = %output.display(), "Wrote clue dataset");
        }
        Command::Restore {
            input,
            source_dir,
            output,
            failure_log,
        } => {
            if let Some(source_dir) = source_dir {
                config.source_dir = source_dir;
            }
            let input = input.unwrap_or_else(|| config.input.clone());
            let output = output.unwrap_or_else(|| config.output.clone());
            let failure_log = failure_log.unwrap_or_else(|| config.failure_log.clone());

            let dataset = Dataset::load(&input)?;
            tracing::info!(path = %input.display(), songs = dataset.len(), "Loaded dataset");

            let mut context = RestoreContext::new(config.registry(), config.source());
            let restored = context.restore_dataset(&dataset);
            restored.save(&output)?;
            tracing::info!(path = %output.display(), "Wrote restored dataset");

            let failures = context.take_failures();
            write_failures(&failure_log, &failures)?;
            tracing::info!(
                path = %failure_log.display(),
                failures = failures.len(),
                "Wrote failure log"
            );
        }
    }
    Ok(())
}
