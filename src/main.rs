use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shapeforge::report::{drawing_bounds, normalize_file, summarize};
use shapeforge::{init_logging, EditorConfig, BUILD_DATE, VERSION};
use shapeforge_core::serialization;

/// ShapeForge - inspect and tidy 2D drawing documents
#[derive(Parser, Debug)]
#[command(name = "shapeforge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Editor configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the shapes in a drawing with their measurements
    Inspect {
        file: PathBuf,
        /// Print the parsed document as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a drawing in canonical form
    Normalize { input: PathBuf, output: PathBuf },
    /// Show the effective editor configuration
    Config {
        /// Only print where the configuration is read from
        #[arg(long)]
        path: bool,
        /// Write the defaults to the configuration file
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },
    /// Print version and build information
    Version,
}

fn config_path(args: &Args) -> anyhow::Result<PathBuf> {
    match &args.config {
        Some(path) => Ok(path.clone()),
        None => EditorConfig::default_path().context("Cannot locate the configuration directory"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json)?;

    match &args.command {
        Command::Inspect { file, json } => {
            let shapes = serialization::load_from_file(file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            if *json {
                let text = serialization::serialize(&shapes).to_json_string_pretty()?;
                println!("{text}");
                return Ok(());
            }
            for summary in summarize(&shapes) {
                println!("{summary}");
            }
            match drawing_bounds(&shapes) {
                Some(b) => println!(
                    "{} shape(s), extent ({:.2}, {:.2}) {:.2} x {:.2}",
                    shapes.len(),
                    b.x,
                    b.y,
                    b.width,
                    b.height
                ),
                None => println!("empty drawing"),
            }
        }
        Command::Normalize { input, output } => {
            let count = normalize_file(input, output)?;
            tracing::info!(count, output = %output.display(), "Drawing normalized");
        }
        Command::Config { path, init } => {
            let location = config_path(&args)?;
            if *path {
                println!("{}", location.display());
                return Ok(());
            }
            if *init {
                EditorConfig::default()
                    .save_to_file(&location)
                    .with_context(|| format!("Failed to write {}", location.display()))?;
                println!("wrote {}", location.display());
                return Ok(());
            }
            let config = EditorConfig::load_or_default(&location)
                .with_context(|| format!("Failed to read {}", location.display()))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Version => {
            println!("shapeforge {VERSION} (built {BUILD_DATE})");
        }
    }

    Ok(())
}
