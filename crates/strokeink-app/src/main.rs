//! `strokeink` command-line entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strokeink_app::commands::{self, DocumentInfo};
use strokeink_app::Script;

#[derive(Debug, Clone, ValueEnum)]
enum InfoFormat {
    /// Human-readable summary
    Text,
    /// JSON object
    Json,
}

#[derive(Parser)]
#[command(name = "strokeink")]
#[command(about = "Replay, inspect and render StrokeInk drawings")]
struct Args {
    /// Editor config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a document to SVG
    Render {
        /// Document file (JSON or base64 data URL)
        input: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a summary of a document
    Info {
        input: PathBuf,
        #[arg(short, long, value_enum, default_value = "text")]
        format: InfoFormat,
    },
    /// Replay an editing script and render the final frame to SVG
    Replay {
        /// Script file (JSON)
        script: PathBuf,
        /// SVG output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the resulting document
        #[arg(long)]
        save: Option<PathBuf>,
        /// Save the document as a base64 data URL
        #[arg(long, requires = "save")]
        data_url: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = commands::load_config(args.config.as_deref())?;

    match args.command {
        Command::Render { input, output } => {
            let editor = commands::open_document(&input, &config)?;
            let svg = commands::render_svg(editor.document(), &config)?;
            commands::write_output(output.as_deref(), svg.as_bytes())?;
        }
        Command::Info { input, format } => {
            let editor = commands::open_document(&input, &config)?;
            let info = DocumentInfo::of(editor.document());
            let text = match format {
                InfoFormat::Text => info.to_string(),
                InfoFormat::Json => serde_json::to_string_pretty(&info)? + "\n",
            };
            commands::write_output(None, text.as_bytes())?;
        }
        Command::Replay {
            script,
            output,
            save,
            data_url,
        } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let script = Script::from_json(&json).context("Invalid script")?;
            let replay = commands::replay(&script, &config)?;
            log::info!(
                "replayed {} steps: {} elements, {} frames, {} skipped",
                script.steps.len(),
                replay.editor.document().len(),
                replay.frames,
                replay.notices
            );

            if let Some(path) = save {
                let bytes = if data_url {
                    replay.editor.export_data_url()?.into_bytes()
                } else {
                    replay.editor.export_bytes()?
                };
                commands::write_output(Some(&path), &bytes)?;
            }
            commands::write_output(output.as_deref(), replay.svg.as_bytes())?;
        }
    }
    Ok(())
}
