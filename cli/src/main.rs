//! adfmd CLI - structured document to Markdown converter

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use adfmd::parser::{self, DEFAULT_MAX_DEPTH};
use adfmd::{Converter, ParseOptions};

#[derive(Parser)]
#[command(name = "adfmd")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert structured rich-text documents (JSON) to Markdown", long_about = None)]
struct Cli {
    /// Input JSON file ("-" or absent for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input JSON file ("-" or absent for stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail the conversion on malformed nodes instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Maximum node nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// URL prefix for attachment references
        #[arg(long, env = "ADFMD_ATTACHMENT_SCHEME", default_value = "attachment:")]
        attachment_scheme: String,

        /// Print rendering statistics as JSON to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Show node-kind counts of a document
    Inspect {
        /// Input JSON file ("-" or absent for stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            strict,
            max_depth,
            attachment_scheme,
            stats,
        }) => {
            let mut converter = Converter::new()
                .with_max_depth(max_depth)
                .with_attachment_scheme(attachment_scheme);
            if strict {
                converter = converter.strict();
            }
            cmd_markdown(input.as_deref(), output.as_deref(), &converter, stats)
        }
        Some(Commands::Inspect { input }) => cmd_inspect(input.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_markdown(cli.input.as_deref(), None, &Converter::new(), false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read the whole input from a file, or from stdin for `None` and `-`.
fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn cmd_markdown(
    input: Option<&Path>,
    output: Option<&Path>,
    converter: &Converter,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(input)?;

    let result = converter.convert_str_with_stats(&source);
    log::debug!("Rendered {} bytes of Markdown", result.content_len());

    if let Some(path) = output {
        fs::write(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.content);
    }

    if stats {
        eprintln!("{}", serde_json::to_string_pretty(&result.stats)?);
    }

    Ok(())
}

fn cmd_inspect(input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(input)?;

    // Lenient so the counts cover everything that could be read
    let options = ParseOptions::new().lenient();
    let doc = parser::parse_str(&source, &options)?.unwrap_or_default();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(version) = doc.version {
        println!("{}: {}", "Version".bold(), version);
    }
    println!("{}: {}", "Nodes".bold(), doc.len());
    println!("{}: {}", "Top-level".bold(), doc.roots().len());
    println!("{}: {}", "Max depth".bold(), doc.max_depth());
    println!("{}: {}", "Skipped".bold(), doc.skipped_count());

    println!();
    println!("{}", "Node Kinds".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (kind, count) in doc.kind_counts() {
        let name = if kind.is_empty() { "(untyped)" } else { kind.as_str() };
        println!("{}: {}", name.bold(), count);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "adfmd".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structured document to Markdown converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/adfmd".dimmed());
    println!("License: MIT");
}
