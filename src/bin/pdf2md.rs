//! CLI binary for pdf2md.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig`, runs the batch, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2md::{
    convert_batch, discover_targets, print_report, BatchOutcome, BatchProgress,
    BatchProgressCallback, BatchReport, ConversionConfig, MarkdownEngine, PdfiumEngine,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar plus a per-file
/// log line as each target in the batch completes or fails.
struct CliBatchCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
}

impl CliBatchCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliBatchCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_files} files…"))
        ));
    }

    fn on_file_start(&self, _file_num: usize, _total: usize, source: &Path) {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(name);
    }

    fn on_file_complete(&self, file_num: usize, total: usize, destination: &Path, skipped: bool) {
        let note = if skipped {
            dim("skipped, already exists")
        } else {
            dim(&destination.display().to_string())
        };
        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}",
            green("✓"),
            file_num,
            total,
            note,
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, file_num: usize, total: usize, error: String) {
        let msg = truncate_message(error);

        self.bar.println(format!(
            "  {} File {:>3}/{:<3}  {}",
            red("✗"),
            file_num,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} files converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files converted  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

/// Truncate very long error messages to keep progress output tidy.
///
/// Cuts on a character boundary, never mid-codepoint, so non-ASCII paths
/// in error messages cannot panic the progress callback.
fn truncate_message(error: String) -> String {
    match error.char_indices().nth(79) {
        Some((i, _)) => format!("{}\u{2026}", &error[..i]),
        None => error,
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a single PDF to out/document.md
  pdf2md document.pdf

  # Convert every PDF in a directory
  pdf2md papers/ -o markdown/

  # Extract embedded images alongside the text
  pdf2md papers/ --extract-images

  # Images into a custom directory
  pdf2md papers/ --extract-images --images-dir assets/figures

  # Resume an interrupted batch (existing .md files are kept)
  pdf2md papers/ --skip-existing

  # Start fresh: wipe stale images before extracting
  pdf2md papers/ --extract-images --clean-images

  # Machine-readable summary
  pdf2md papers/ --json > summary.json

EXIT CODES:
  0  every discovered PDF converted (or was skipped)
  1  invalid input, or at least one PDF failed to convert

SETUP:
  pdf2md needs a pdfium shared library at runtime. Either install pdfium
  system-wide or place libpdfium next to the pdf2md binary.
"#;

/// Convert PDF files to Markdown.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2md",
    version,
    about = "Convert PDF files to Markdown",
    long_about = "Convert a single PDF file, or every PDF in a directory, to Markdown. \
Each source <name>.pdf becomes <outdir>/<name>.md; embedded images can optionally be \
extracted alongside. Files that fail are reported at the end without stopping the batch.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// A .pdf file, or a directory whose PDFs are converted (non-recursive).
    input: PathBuf,

    /// Output directory for the generated Markdown files.
    #[arg(short, long, env = "PDF2MD_OUTDIR", default_value = "out")]
    outdir: PathBuf,

    /// Extract embedded images and reference them from the Markdown.
    #[arg(long, env = "PDF2MD_EXTRACT_IMAGES")]
    extract_images: bool,

    /// Directory for extracted images (default: <outdir>/images).
    #[arg(long, env = "PDF2MD_IMAGES_DIR")]
    images_dir: Option<PathBuf>,

    /// Skip PDFs whose destination .md already exists.
    #[arg(long, env = "PDF2MD_SKIP_EXISTING")]
    skip_existing: bool,

    /// Delete the images directory before converting (with --extract-images).
    #[arg(long, env = "PDF2MD_CLEAN_IMAGES")]
    clean_images: bool,

    /// Output a structured JSON summary instead of the text report.
    #[arg(long, env = "PDF2MD_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(outcome) => {
            if outcome.had_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> Result<BatchOutcome> {
    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else if cli.no_progress {
        "info"
    } else {
        "error"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Discover targets ─────────────────────────────────────────────────
    let targets = discover_targets(&cli.input).await?;

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && targets.len() > 1;

    let mut builder = ConversionConfig::builder()
        .outdir(&cli.outdir)
        .extract_images(cli.extract_images)
        .skip_existing(cli.skip_existing)
        .clean_images(cli.clean_images);

    if let Some(ref dir) = cli.images_dir {
        builder = builder.images_dir(dir);
    }
    if show_progress {
        let cb = CliBatchCallback::new();
        builder = builder.progress_callback(cb as BatchProgress);
    }
    let config = builder.build();

    // ── Run the batch ────────────────────────────────────────────────────
    let engine: Arc<dyn MarkdownEngine> = Arc::new(PdfiumEngine::new());
    let outcome = convert_batch(&engine, &targets, &config)
        .await
        .context("Conversion failed")?;

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        let report = BatchReport::from_outcome(&outcome);
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        print_report(&outcome);
        if !show_progress {
            // The progress callback already printed the final tick line.
            let failed = outcome.failed.len();
            if failed == 0 {
                eprintln!(
                    "{} {} files converted in {}ms",
                    green("✔"),
                    bold(&outcome.converted.len().to_string()),
                    outcome.total_duration_ms,
                );
            } else {
                eprintln!(
                    "{} {}/{} files converted  ({} failed)  {}ms",
                    red("✘"),
                    bold(&outcome.converted.len().to_string()),
                    outcome.total_files(),
                    red(&failed.to_string()),
                    outcome.total_duration_ms,
                );
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_pass_through_untruncated() {
        let msg = "Failed to convert 'a.pdf': boom".to_string();
        assert_eq!(truncate_message(msg.clone()), msg);
    }

    #[test]
    fn long_ascii_messages_are_truncated_with_ellipsis() {
        let msg = "x".repeat(200);
        let out = truncate_message(msg);
        assert_eq!(out.chars().count(), 80);
        assert!(out.ends_with('\u{2026}'));
        assert!(out.starts_with("xxx"));
    }

    #[test]
    fn multibyte_messages_truncate_on_char_boundaries() {
        // A failing PDF with a Cyrillic path puts multibyte characters
        // right across the truncation point.
        let path = "я".repeat(30);
        let msg = format!("Failed to convert '/tmp/pdfs/{path}.pdf': engine failure {path}");
        let out = truncate_message(msg);
        assert_eq!(out.chars().count(), 80);
        assert!(out.ends_with('\u{2026}'));
        // The output is still valid UTF-8 by construction; make sure the
        // last kept character survived intact.
        assert!(out.chars().rev().nth(1).is_some());
    }

    #[test]
    fn exactly_79_chars_is_untouched() {
        let msg = "y".repeat(79);
        assert_eq!(truncate_message(msg.clone()), msg);
    }
}
