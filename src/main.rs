//! Mimic CLI
//!
//! Command-line interface for the mimic engine:
//! - Learn single messages or import chat exports
//! - Generate responses
//! - Show model statistics
//! - Write a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimic::config::{generate_default_config, Config, LoggingConfig};
use mimic::import::{import_text, CsvImporter};
use mimic::MimicEngine;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mimic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Learns one speaker's messages and talks like them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model data file, overrides the config
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Seed for reproducible generation
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Learn a single message
    Learn {
        /// Message text
        message: String,
    },

    /// Learn from a text file (one message per line) or a CSV chat export
    Import {
        /// Path to the file
        path: PathBuf,
        /// Treat the file as CSV
        #[arg(long)]
        csv: bool,
        /// CSV column holding the message text
        #[arg(long, default_value = "Content")]
        column: String,
        /// Only learn messages from this author
        #[arg(long)]
        author: Option<String>,
        /// CSV column holding the author name
        #[arg(long, default_value = "Author")]
        author_column: String,
        /// Dry run (don't actually learn)
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate responses in the learned style
    Talk {
        /// Text to respond to
        #[arg(default_value = "")]
        trigger: String,
        /// Number of responses
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Show training statistics
    Stats,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config templating needs neither logging nor a model
    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data_file) = &cli.data_file {
        config.model.data_file = data_file.to_string_lossy().to_string();
    }
    config.validate()?;

    init_logging(&config.logging)?;
    tracing::debug!("Mimic v{}", env!("CARGO_PKG_VERSION"));

    let mut engine = MimicEngine::from_config(&config);
    if let Some(seed) = cli.seed {
        engine = engine.seeded(seed);
    }
    tracing::info!("Model {:?}: {}", engine.data_file(), engine.get_stats());

    match cli.command {
        Commands::Learn { message } => {
            if message.trim().is_empty() {
                eprintln!("Nothing to learn from an empty message");
                std::process::exit(1);
            }
            engine.learn_from_message(&message);
            println!("Learned. {}", engine.get_stats());
        }

        Commands::Import {
            path,
            csv,
            column,
            author,
            author_column,
            dry_run,
        } => {
            if !path.exists() {
                eprintln!("File not found: {:?}", path);
                std::process::exit(1);
            }

            let result = if csv {
                let mut importer = CsvImporter::new()
                    .with_content_column(&column)
                    .with_author_column(&author_column);
                if let Some(author) = &author {
                    importer = importer.with_author(author);
                }
                importer.import(&path)?
            } else {
                import_text(&path)?
            };

            println!("Import results:");
            println!("  Rows processed: {}", result.rows_processed);
            println!("  Rows skipped: {}", result.rows_skipped);
            println!("  Messages: {}", result.messages.len());

            if dry_run {
                println!();
                println!("(Dry run - nothing was learned)");
            } else {
                let learned = engine.learn_batch(&result.messages);
                println!("  Learned: {}", learned);
                println!();
                println!("{}", engine.get_stats());
            }
        }

        Commands::Talk { trigger, count } => {
            for _ in 0..count.max(1) {
                let response = engine.generate_detailed(&trigger);
                match cli.format.as_str() {
                    "json" => println!("{}", serde_json::to_string(&response)?),
                    _ => println!("{}", response.text),
                }
            }
        }

        Commands::Stats => {
            let stats = engine.get_stats();
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
                _ => {
                    println!("Mimic v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Data file: {}", engine.data_file().display());
                    println!("{}", "-".repeat(40));
                    println!("{:<24} {}", "Total messages", stats.total_messages);
                    println!("{:<24} {}", "Unique word pairs", stats.unique_word_pairs);
                    println!("{:<24} {}", "Common phrases", stats.common_phrase_count);
                }
            }
        }

        // Written before engine startup
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Install the global subscriber. Logs go to stderr (or a file) so that
/// generated text on stdout stays clean.
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("mimic={}", logging.level)));

    let writer = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}
