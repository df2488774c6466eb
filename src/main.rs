//! semunit - CLI for the semantic code-unit extractor
//!
//! A small inspection tool around the parsing core, designed for pipelines
//! and automation.
//!
//! # Usage
//!
//! ```bash
//! # Extract units from one file
//! semunit units src/button.tsx
//!
//! # Walk a tree and summarize every parseable file
//! semunit scan ./web --strategy structural
//!
//! # Machine-readable output
//! semunit units src/button.tsx --json
//! ```
//!
//! Errors go to stderr, results to stdout. Exit codes: 0 = success,
//! 1 = error.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use semunit::{FileDiscovery, ParseStrategy, SemanticUnit, StrategyKind, strategy_for};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "semunit")]
#[command(version)]
#[command(about = "Semantic code-unit extractor for TypeScript/JavaScript sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Parsing strategy: structural or syntax-tree
    #[arg(short, long, global = true, default_value = "syntax-tree")]
    strategy: String,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract semantic units from a single source file
    Units {
        /// Source file to parse
        file: PathBuf,
    },

    /// Parse every discoverable source file under a root and summarize
    Scan {
        /// Directory to walk
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging (only to stderr to keep stdout clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let kind = match StrategyKind::from_name(&cli.strategy) {
        Some(kind) => kind,
        None => bail!(
            "Unknown strategy: {}. Use: structural, syntax-tree",
            cli.strategy
        ),
    };
    let parser = strategy_for(kind);

    match run_command(&cli, parser.as_ref()) {
        Ok(output) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_human_readable(&output);
            }
            Ok(())
        }
        Err(e) => {
            if cli.json {
                let err = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run_command(cli: &Cli, parser: &dyn ParseStrategy) -> Result<Output> {
    match &cli.command {
        Commands::Units { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let units = parser
                .parse_file(&file.display().to_string(), &content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            Ok(Output::Units {
                file: file.display().to_string(),
                strategy: parser.name().to_string(),
                units,
            })
        }

        Commands::Scan { root } => {
            let files = FileDiscovery::new().discover(root)?;
            let mut results = Vec::with_capacity(files.len());
            let mut failed = 0usize;
            for file in &files {
                let content = match std::fs::read_to_string(file) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!("Failed to read {}: {}", file.display(), e);
                        failed += 1;
                        continue;
                    }
                };
                match parser.parse_file(&file.display().to_string(), &content) {
                    Ok(units) => results.push(FileSummary {
                        file: file.display().to_string(),
                        units: units.len(),
                        exported: units.iter().filter(|u| u.is_exported).count(),
                    }),
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", file.display(), e);
                        failed += 1;
                    }
                }
            }
            Ok(Output::Scan {
                root: root.display().to_string(),
                strategy: parser.name().to_string(),
                scanned: files.len(),
                failed,
                results,
            })
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "type")]
enum Output {
    Units {
        file: String,
        strategy: String,
        units: Vec<SemanticUnit>,
    },
    Scan {
        root: String,
        strategy: String,
        scanned: usize,
        failed: usize,
        results: Vec<FileSummary>,
    },
}

#[derive(serde::Serialize)]
struct FileSummary {
    file: String,
    units: usize,
    exported: usize,
}

fn print_human_readable(output: &Output) {
    match output {
        Output::Units {
            file,
            strategy,
            units,
        } => {
            println!("{} ({} strategy): {} units", file, strategy, units.len());
            for u in units {
                let flags = match (u.is_exported, u.is_async) {
                    (true, true) => " [export, async]",
                    (true, false) => " [export]",
                    (false, true) => " [async]",
                    (false, false) => "",
                };
                println!(
                    "  {:>4}..{:<4} {:<9} {}{}",
                    u.start_line,
                    u.end_line,
                    u.kind.as_str(),
                    u.name,
                    flags
                );
            }
        }
        Output::Scan {
            root,
            strategy,
            scanned,
            failed,
            results,
        } => {
            println!(
                "Scanned {} files under {} ({} strategy), {} failed",
                scanned, root, strategy, failed
            );
            for r in results {
                println!("  {}: {} units ({} exported)", r.file, r.units, r.exported);
            }
        }
    }
}
