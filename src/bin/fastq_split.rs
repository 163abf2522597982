use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use fastq_subject_splitter::app::{App, EventLevel, ProgressEvent, ProgressSink, RunSummary};
use fastq_subject_splitter::config::SplitConfig;
use fastq_subject_splitter::error::SplitError;
use fastq_subject_splitter::output::{JsonOutput, OutputMode};

#[derive(Parser)]
#[command(name = "fastq-split")]
#[command(about = "Split a dragen fastq manifest into per-subject tumor/normal csvs")]
#[command(version, author)]
struct Cli {
    /// The fastq list csv produced by the dragen bcl convert step
    #[arg(long = "samplesheet", visible_alias = "sample-sheet", short = 'i')]
    samplesheet: Utf8PathBuf,

    /// The lab tracking workbook with one sheet per year
    #[arg(long = "trackingsheet", visible_alias = "tracking-sheet", short = 't')]
    tracking_sheet: Utf8PathBuf,

    /// Directory the per-subject folders are written into
    #[arg(long = "output-dir", visible_alias = "outputDir", short = 'o')]
    output_dir: Utf8PathBuf,

    /// Skip an additional tracking sheet by name (repeatable)
    #[arg(long = "omit-sheet")]
    omit_sheets: Vec<String>,

    /// Print the run summary as json on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(split) = report.downcast_ref::<SplitError>() {
            return ExitCode::from(map_exit_code(split));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SplitError) -> u8 {
    match error {
        SplitError::ManifestRead { .. }
        | SplitError::WorkbookOpen { .. }
        | SplitError::SheetParse { .. }
        | SplitError::NoValidSheets(_) => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    check_input_file("fastq manifest", &cli.samplesheet)?;
    check_input_file("tracking workbook", &cli.tracking_sheet)?;
    ensure_output_dir(&cli.output_dir).into_diagnostic()?;

    let config = SplitConfig::default().with_omitted_sheets(cli.omit_sheets);
    let app = App::new(config);
    let summary = app.run(
        &cli.samplesheet,
        &cli.tracking_sheet,
        &cli.output_dir,
        &TracingSink,
    )?;

    match output_mode {
        OutputMode::Json => JsonOutput::print_summary(&summary).into_diagnostic()?,
        OutputMode::Human => print_run_summary(&summary),
    }
    Ok(())
}

fn check_input_file(label: &str, path: &Utf8Path) -> miette::Result<()> {
    if path.is_file() {
        return Ok(());
    }
    Err(miette::Report::msg(format!(
        "could not find {label} at {path}"
    )))
}

fn ensure_output_dir(path: &Utf8Path) -> std::io::Result<()> {
    if !path.exists() {
        tracing::info!("creating output directory at {path}");
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

struct TracingSink;

impl ProgressSink for TracingSink {
    fn event(&self, event: ProgressEvent) {
        match event.level {
            EventLevel::Info => tracing::info!("{}", event.message),
            EventLevel::Warning => tracing::warn!("{}", event.message),
        }
    }
}

fn print_run_summary(summary: &RunSummary) {
    let green = "\x1b[32m";
    let cyan = "\x1b[36m";
    let reset = "\x1b[0m";

    println!("{cyan}fastq-split summary{reset}");
    println!(
        "{green}manifest rows: {}; tracking rows: {}; validated rows: {}{reset}",
        summary.manifest_rows, summary.tracking_rows, summary.validated_rows
    );
    println!(
        "{green}sheets read: {}{reset}",
        summary.sheets_read.join(", ")
    );

    for subject in &summary.subjects {
        println!(
            "{cyan}{} ({} rows){reset}",
            subject.subject_id, subject.rows
        );
        for file in &subject.files {
            println!("   {file}");
        }
    }
}
