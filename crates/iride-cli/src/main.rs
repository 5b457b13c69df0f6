mod analyze;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use iride_core::SeoReport;
use tracing_subscriber::EnvFilter;

use crate::render::Audience;

#[derive(Debug, Parser)]
#[command(name = "iride")]
#[command(about = "Iride SEO Architect: two-phase AI SEO analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a website and print or save the report
    Analyze {
        /// Site to analyze; `https://` is assumed when no scheme is given
        url: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Re-render a saved JSON report
    Render {
        /// Path to a report previously saved with `--format json`
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the structured-output schema sent with the analysis request
    Schema,
}

#[derive(Debug, Clone, clap::Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Document to render (markdown only)
    #[arg(long, value_enum, default_value_t = Audience::Technical)]
    audience: Audience,

    /// Write to this file, or into this directory with the default export name
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Markdown => "md",
            Format::Json => "json",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { url, output } => analyze::run_analyze(&url, &output).await,
        Commands::Render { file, output } => run_render(&file, &output),
        Commands::Schema => {
            let ctx = iride_pipeline::TemporalContext::now();
            let schema = iride_pipeline::report_schema(&ctx);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

/// Decode a saved report and render it again.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not hold a valid
/// report, or the output cannot be written.
fn run_render(file: &Path, args: &OutputArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let (report, adjustments) = iride_core::decode_report_with_adjustments(&raw)
        .with_context(|| format!("{} is not a valid report", file.display()))?;
    if !adjustments.is_empty() {
        eprintln!("{} out-of-range values were clamped", adjustments.len());
    }
    emit(&report, args, today())
}

/// Serialize or render `report` and send it to stdout or the output path.
pub(crate) fn emit(report: &SeoReport, args: &OutputArgs, date: NaiveDate) -> anyhow::Result<()> {
    let body = match args.format {
        Format::Json => serde_json::to_string_pretty(report)?,
        Format::Markdown => render::render(report, args.audience, date),
    };

    let Some(target) = &args.output else {
        println!("{body}");
        return Ok(());
    };

    let path = if target.is_dir() {
        target.join(args.audience.file_name(date, args.format.extension()))
    } else {
        target.clone()
    };
    std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("report saved to {}", path.display());
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
