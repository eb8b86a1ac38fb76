use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pgscan::{check_file, render_json, render_text, CheckConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_WORDLIST: &str = "wordlist.txt";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pgscan")]
#[command(about = "Proofreading diagnostics for Project Gutenberg style texts")]
#[command(version)]
struct Args {
    /// Book text to check (UTF-8)
    #[arg(short, long)]
    infile: PathBuf,

    /// Report file to write
    #[arg(short, long, default_value = "report.txt")]
    outfile: PathBuf,

    /// Wordlist file; defaults to wordlist.txt next to the executable
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// List up to 100 entries per category instead of 4
    #[arg(short, long)]
    verbose: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Append an annotated listing with carets under every hit
    #[arg(long)]
    annotate: bool,

    /// Clear the quotation stack after each nesting fault
    #[arg(long)]
    reset_quotes_on_fault: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // WHY: logs go to stderr as JSON so the report file and stdout stay clean
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FATAL: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let wordlist = match args.wordlist {
        Some(path) => path,
        None => default_wordlist()?,
    };
    let config = CheckConfig {
        annotate: args.annotate,
        reset_quotes_on_fault: args.reset_quotes_on_fault,
        ..Default::default()
    };

    let report = check_file(&args.infile, &wordlist, config).await?;
    let rendered = match args.format {
        Format::Text => render_text(&report, args.verbose),
        Format::Json => render_json(&report).context("failed to serialize report")?,
    };

    tokio::fs::write(&args.outfile, rendered)
        .await
        .with_context(|| format!("failed to write report {}", args.outfile.display()))?;

    info!(
        "Wrote {} findings to {}",
        report.finding_count(),
        args.outfile.display()
    );
    Ok(())
}

fn default_wordlist() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    let dir = exe.parent().context("executable has no parent directory")?;
    Ok(dir.join(DEFAULT_WORDLIST))
}
