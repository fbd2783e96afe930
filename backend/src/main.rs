//! Lexload CLI - Import vocabulary lists with column auto-detection
//!
//! # Commands
//!
//! ```bash
//! lexload import words.csv          # Detect columns, extract words, print JSON
//! lexload detect words.csv          # Show per-column signals and roles only
//! lexload serve                     # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use lexload::{
    format_delimiter, import_file, inspect_file, ColumnRole, ImportOptions, Inspection,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lexload")]
#[command(about = "Import English/Turkmen word lists with column auto-detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full import: detect columns, extract and validate words
    Import {
        /// Input CSV/TSV file
        input: PathBuf,

        /// Output file for the JSON result (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum accepted words (default: LEXLOAD_MIN_WORDS or 10)
        #[arg(long)]
        min_words: Option<usize>,

        /// Maximum accepted words (default: LEXLOAD_MAX_WORDS or 200)
        #[arg(long)]
        max_words: Option<usize>,

        /// Data rows sampled for detection (default: LEXLOAD_SAMPLE_ROWS or 30)
        #[arg(long)]
        sample_rows: Option<usize>,
    },

    /// Show detected column roles without importing
    Detect {
        /// Input CSV/TSV file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let options = ImportOptions::from_env();

    let result = match cli.command {
        Commands::Import {
            input,
            output,
            min_words,
            max_words,
            sample_rows,
        } => {
            let options = ImportOptions {
                min_words: min_words.unwrap_or(options.min_words),
                max_words: max_words.unwrap_or(options.max_words),
                sample_rows: sample_rows.filter(|n| *n > 0).unwrap_or(options.sample_rows),
                ..options
            };
            cmd_import(&input, output.as_deref(), &options)
        }

        Commands::Detect { input } => cmd_detect(&input, &options),

        Commands::Serve { port } => cmd_serve(port, options).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_import(
    input: &Path,
    output: Option<&Path>,
    options: &ImportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Importing: {}", input.display());

    let outcome = import_file(input, options)?;
    let result = &outcome.result;

    eprintln!("\n📊 Summary:");
    eprintln!("   Rows in file: {}", outcome.file_info.row_count);
    eprintln!("   Data rows: {}", result.total_rows);
    if result.skipped_header {
        eprintln!("   Header: skipped");
    }
    eprintln!("   ✅ Words: {}", result.words.len());

    if !result.duplicates.is_empty() {
        eprintln!("   ⚠️  Duplicates: {}", result.duplicates.len());
    }
    if !result.errors.is_empty() {
        eprintln!("   ❌ Row errors: {}", result.errors.len());
        for err in result.errors.iter().take(10) {
            eprintln!("     - {}", err);
        }
        if result.errors.len() > 10 {
            eprintln!("     ... and {} more", result.errors.len() - 10);
        }
    }

    let json = serde_json::to_string_pretty(result)?;
    write_output(&json, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_detect(input: &Path, options: &ImportOptions) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🔍 Detecting columns: {}", input.display());

    let inspection = inspect_file(input, options)?;
    print_inspection(&inspection);
    Ok(())
}

fn print_inspection(inspection: &Inspection) {
    let Inspection {
        file_info,
        skipped_header,
        data_rows,
        detection,
    } = inspection;

    println!("Encoding:  {}", file_info.encoding);
    println!("Delimiter: '{}'", format_delimiter(file_info.delimiter));
    println!(
        "Rows:      {} ({} data{})",
        file_info.row_count,
        data_rows,
        if *skipped_header { ", header skipped" } else { "" }
    );
    println!();
    println!(
        "{:<5} {:<14} {:>6} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "Col", "Role", "Sample", "Trans", "English", "Target", "Cyr", "CJK", "Num"
    );

    for signal in &detection.signals {
        let role = detection.assignment.role_of(signal.col);
        let role = match lexload::detection::ignore_reason(signal) {
            Some(reason) if role == ColumnRole::Ignored => format!("ignored ({})", reason),
            _ => role.to_string(),
        };
        println!(
            "{:<5} {:<14} {:>6} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
            signal.col + 1,
            role,
            signal.sample_size,
            signal.trans_pct,
            signal.english_score,
            signal.target_score,
            signal.cyrillic_pct,
            signal.cjk_pct,
            signal.numeric_pct,
        );
    }

    println!();
    println!("{}", detection.detection_info);
}

async fn cmd_serve(port: u16, options: ImportOptions) -> Result<(), Box<dyn std::error::Error>> {
    lexload::server::start_server(port, options).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
