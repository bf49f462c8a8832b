//! # CLI Module
//!
//! Command-line interface for the screenshot classifier.
//!
//! ## Usage
//! ```bash
//! # Classify with observations from Screenshot.png.observations.json
//! shot-classify classify Screenshot.png
//!
//! # Observations from elsewhere, JSON output
//! shot-classify classify Screenshot.png --observations ocr.json --output json
//!
//! # Inspect categories and the default rule configuration
//! shot-classify categories
//! shot-classify default-config > config.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use screenshot_classifier::core::category::ScreenshotCategory;
use screenshot_classifier::core::classifier::{ScreenshotClassifier, ServiceFailurePolicy};
use screenshot_classifier::core::decision::DecisionConfig;
use screenshot_classifier::core::loader::load_image;
use screenshot_classifier::core::report::ClassificationResult;
use screenshot_classifier::core::sidecar::SidecarFile;
use screenshot_classifier::error::{ClassifierError, Result};
use screenshot_classifier::events::{Event, EventChannel, EventReceiver};
use screenshot_classifier::init_tracing;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Screenshot Classifier - sort screenshots by what they show
#[derive(Parser, Debug)]
#[command(name = "shot-classify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single screenshot
    Classify {
        /// Image file
        image: PathBuf,

        /// Observations file (default: <IMAGE>.observations.json)
        #[arg(long)]
        observations: Option<PathBuf>,

        /// Rule configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Continue with empty observations if they cannot be read
        #[arg(long)]
        lenient: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the categories and their titles
    Categories,

    /// Print the default rule configuration as JSON
    DefaultConfig,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Category id only
    Minimal,
}

/// Run the CLI and return the process exit status.
///
/// Errors are printed with their user-facing message, never `Debug`.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let mut term = Term::stderr();

    match execute(cli.command, &mut term) {
        Ok(code) => code,
        Err(error) => {
            report_failure(&mut term, &error.to_string()).ok();
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands, term: &mut Term) -> Result<ExitCode> {
    match command {
        Commands::Classify {
            image,
            observations,
            config,
            output,
            lenient,
            verbose,
        } => {
            init_tracing(if verbose { "debug" } else { "warn" });
            run_classify(term, image, observations, config, output, lenient, verbose)
        }
        Commands::Categories => {
            print_categories();
            Ok(ExitCode::SUCCESS)
        }
        Commands::DefaultConfig => {
            print_default_config()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_classify(
    term: &mut Term,
    image_path: PathBuf,
    observations: Option<PathBuf>,
    config_path: Option<PathBuf>,
    output: OutputFormat,
    lenient: bool,
    verbose: bool,
) -> Result<ExitCode> {
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Screenshot Classifier").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let config = load_config(config_path.as_deref())?;
    let image = load_image(&image_path)?;

    let source = match observations {
        Some(path) => SidecarFile::new(path),
        None => SidecarFile::for_image(&image_path),
    };
    debug!(observations = %source.path().display(), "using sidecar observations");

    let policy = if lenient {
        ServiceFailurePolicy::TreatAsEmpty
    } else {
        ServiceFailurePolicy::Abort
    };

    let classifier = Arc::new(
        ScreenshotClassifier::builder(Box::new(source.clone()), Box::new(source))
            .config(config)
            .failure_policy(policy)
            .build(),
    );

    let spinner = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    // The worker classifies; this thread owns presentation
    let (sender, receiver) = EventChannel::new();
    let (_job_id, handle) = classifier.spawn_classification(image, sender);

    let outcome = drain_events(&receiver, spinner.as_ref(), term);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let joined = handle
        .join()
        .map_err(|_| ClassifierError::Worker("worker thread panicked".to_string()))?;
    let result = match joined {
        Ok(result) => result,
        // Message already printed from the failure event
        Err(_) if outcome.failure_shown => return Ok(ExitCode::FAILURE),
        Err(e) => return Err(e),
    };

    match output {
        OutputFormat::Pretty => print_pretty_result(term, &result, outcome.duration_ms, verbose),
        OutputFormat::Json => print_json_result(&image_path, &result, outcome.duration_ms)?,
        OutputFormat::Minimal => println!("{}", result.primary_category.id()),
    }

    Ok(ExitCode::SUCCESS)
}

/// What the presentation loop saw of one job
#[derive(Debug, Default)]
struct JobOutcome {
    duration_ms: u64,
    failure_shown: bool,
}

/// Consume events until the worker drops its sender.
///
/// Failure messages are written to `out` as they arrive.
fn drain_events<W: Write>(
    receiver: &EventReceiver,
    spinner: Option<&ProgressBar>,
    out: &mut W,
) -> JobOutcome {
    let mut outcome = JobOutcome::default();

    for event in receiver.iter() {
        if event.is_terminal() {
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
        }

        match event {
            Event::PhaseChanged { phase, .. } => {
                if let Some(pb) = spinner {
                    pb.set_message(phase.to_string());
                }
            }
            Event::Completed { duration_ms, .. } => outcome.duration_ms = duration_ms,
            Event::Failed { message, .. } => {
                report_failure(out, &message).ok();
                outcome.failure_shown = true;
            }
            Event::Started { .. } => {}
        }
    }

    outcome
}

fn report_failure<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style("✗").red().bold(), style(message).red())
}

/// Explicit config file, else the per-user one if present, else defaults
fn load_config(explicit: Option<&Path>) -> Result<DecisionConfig> {
    if let Some(path) = explicit {
        return DecisionConfig::load(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading user config");
            DecisionConfig::load(&path)
        }
        _ => Ok(DecisionConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("screenshot-classifier").join("config.json"))
}

fn print_pretty_result(term: &Term, result: &ClassificationResult, duration_ms: u64, verbose: bool) {
    term.write_line(&format!(
        "{} {}",
        style("✓").green().bold(),
        style(result.primary_category.title()).bold()
    ))
    .ok();

    if !result.secondary_categories.is_empty() {
        term.write_line(&format!(
            "  {} {}",
            style("Also possible:").dim(),
            result.secondary_titles().join(", ")
        ))
        .ok();
    }

    term.write_line("").ok();

    let width = result
        .diagnostics
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);
    for (key, value) in result.diagnostics.iter() {
        let padding = " ".repeat(width - key.chars().count());
        term.write_line(&format!("  {}{}  {}", style(key).cyan(), padding, value))
            .ok();
    }

    if verbose {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} {:?} in {}ms",
            style("Rule:").dim(),
            result.rule,
            duration_ms
        ))
        .ok();
    }
}

fn print_json_result(image: &Path, result: &ClassificationResult, duration_ms: u64) -> Result<()> {
    let output = serde_json::json!({
        "image": image,
        "primary_category": result.primary_category,
        "primary_title": result.primary_category.title(),
        "secondary_categories": result.secondary_categories,
        "rule": result.rule,
        "diagnostics": result.diagnostics,
        "duration_ms": duration_ms,
    });

    let text = serde_json::to_string_pretty(&output)?;
    println!("{}", text);
    Ok(())
}

fn print_categories() {
    for category in ScreenshotCategory::ALL {
        println!("{:<14} {}", category.id(), category.title());
    }
}

fn print_default_config() -> Result<()> {
    let text = serde_json::to_string_pretty(&DecisionConfig::default())?;
    println!("{}", text);
    Ok(())
}
