//! CLI entry point for the GPA calculator.
//!
//! Without a subcommand the interactive prompt loop runs. `calculate` and
//! `exemptions` offer the same operations non-interactively.

mod session;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use gpa_calculator::config::AppConfig;
use gpa_calculator::exemption::{ExemptionEdit, ExemptionStore, default_exemptions, normalize_code};
use gpa_calculator::gpa::{Mode, format_semester_label};
use gpa_calculator::output::{GpaReport, append_record, to_json};
use gpa_calculator::transcript::{load_transcript, normalize};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "gpa_calculator")]
#[command(about = "Calculate a credit-weighted GPA from a student transcript", long_about = None)]
struct Cli {
    /// JSON file holding the exemption list (overrides GPA_EXEMPTION_FILE)
    #[arg(long, global = true, value_name = "FILE")]
    exemption_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for a transcript, mode and exemptions (default)
    Interactive,
    /// Compute a GPA once and print it
    Calculate {
        /// Transcript file (CSV, or an HTML table export)
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,

        /// 1/overall or 2/one-semester
        #[arg(short, long, default_value = "overall")]
        mode: Mode,

        /// Semester for one-semester mode, e.g. "fa23" or "Spring 2024"
        #[arg(short, long)]
        semester: Option<String>,

        /// Additional subject codes to exempt (first 3 letters are used)
        #[arg(short, long = "exempt", value_name = "CODE")]
        exempt: Vec<String>,

        /// Do not apply the saved exemption list
        #[arg(long, default_value_t = false)]
        ignore_saved_exemptions: bool,

        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append the result to
        #[arg(long, value_name = "CSV")]
        history: Option<PathBuf>,
    },
    /// Show or edit the saved exemption list
    Exemptions {
        #[command(subcommand)]
        action: ExemptionCommand,
    },
}

#[derive(Subcommand)]
enum ExemptionCommand {
    /// Print the saved list
    List,
    /// Add a subject code
    Add { code: String },
    /// Remove a subject code
    Remove { code: String },
    /// Restore the built-in list
    Reset,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_exemption_file(cli.exemption_file.clone());

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("gpa_calculator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let store = ExemptionStore::new(&config.exemption_file);
    info!(exemption_file = %store.path().display(), "Starting");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            Session::new(stdin.lock(), std::io::stdout(), store).run()?;
        }
        Commands::Calculate {
            transcript,
            mode,
            semester,
            exempt,
            ignore_saved_exemptions,
            json,
            history,
        } => {
            let report = calculate(
                &transcript,
                mode,
                semester.as_deref(),
                &exempt,
                ignore_saved_exemptions,
                &store,
            )?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                println!("{}", report.display_line());
            }

            if let Some(path) = history {
                append_record(&path, &report)
                    .with_context(|| format!("Failed to append to {}", path.display()))?;
            }

            if let Some(err) = report.error {
                error!(error = %err, "GPA not computed");
                bail!(err);
            }
        }
        Commands::Exemptions { action } => edit_exemptions(action, &store)?,
    }

    Ok(())
}

/// Loads the transcript and computes the GPA for one set of parameters.
#[tracing::instrument(skip(store), fields(transcript = %transcript.display()))]
fn calculate(
    transcript: &Path,
    mode: Mode,
    semester: Option<&str>,
    extra_exemptions: &[String],
    ignore_saved: bool,
    store: &ExemptionStore,
) -> Result<GpaReport> {
    let records = normalize(load_transcript(transcript)?);

    let mut exemptions = if ignore_saved { Vec::new() } else { store.load() };
    for code in extra_exemptions {
        let edit = ExemptionEdit::Add(normalize_code(code)?);
        exemptions = edit.apply(exemptions)?;
    }

    let semester = semester.map(format_semester_label).transpose()?;

    Ok(GpaReport::compute(
        &transcript.display().to_string(),
        &records,
        mode,
        &exemptions,
        semester.as_deref(),
    ))
}

fn edit_exemptions(action: ExemptionCommand, store: &ExemptionStore) -> Result<()> {
    let subjects = store.load();

    let updated = match action {
        ExemptionCommand::List => {
            for subject in &subjects {
                println!("- {subject}");
            }
            return Ok(());
        }
        ExemptionCommand::Add { code } => ExemptionEdit::parse("add", &code)?.apply(subjects)?,
        ExemptionCommand::Remove { code } => {
            ExemptionEdit::parse("remove", &code)?.apply(subjects)?
        }
        ExemptionCommand::Reset => default_exemptions(),
    };

    store.save(&updated)?;
    for subject in &updated {
        println!("- {subject}");
    }
    Ok(())
}
