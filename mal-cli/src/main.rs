// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueHint};
use mal::report::{DEFAULT_BANNER, ReportDate, SyntaxReport};
use mal::{CheckOptions, Checker, CommentMode, source_lines};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;

mod diagnostics;
mod paths;

use paths::ReportTarget;

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "MAL syntax checker", long_about = None)]
struct Args {
    /// MAL programs to check
    ///
    /// ".mal" is appended to any name that doesn't already end with it
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath, required = true)]
    files: Vec<PathBuf>,
    /// File to write the report to
    ///
    /// Only allowed when checking a single program. Writes to STDOUT if set to '-'. Defaults to
    /// the program's path with the extension replaced with "log".
    #[arg(short, long, value_name = "OUTPUT", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
    /// Also print each report to STDOUT
    #[arg(short, long)]
    print: bool,
    /// Don't show diagnostics on STDERR
    #[arg(short, long)]
    quiet: bool,
    /// Also drop the character just before each ';' comment marker
    #[arg(long)]
    legacy_comments: bool,
    /// Text at the end of each report's header line
    #[arg(long, default_value = DEFAULT_BANNER)]
    banner: String,
    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(short, long, default_value_t = Level::WARN)]
    log_level: Level,
}

impl Args {
    fn checker(&self) -> Checker {
        let comment_mode = if self.legacy_comments {
            CommentMode::Legacy
        } else {
            CommentMode::AtMarker
        };
        Checker::new(CheckOptions { comment_mode })
    }

    fn report_target(&self, source: &Path) -> ReportTarget {
        match self.output.as_deref() {
            Some(path) if path == "-" => ReportTarget::Stdout,
            Some(path) => ReportTarget::File(path.to_path_buf()),
            None => ReportTarget::File(paths::report_path(source)),
        }
    }

    /// Check the program at `input`, returning whether it is valid
    fn check_file(&self, checker: &Checker, input: &Path, date: ReportDate) -> Result<bool> {
        let source = paths::source_path(input);
        let text = fs::read_to_string(&source)
            .with_context(|| format!("failed to read {}", source.display()))?;
        let source_name = source.to_string_lossy();

        let result = checker.check(&source_lines(&text));
        tracing::info!(
            file = %source_name,
            errors = result.total_errors(),
            warnings = result.total_warnings(),
            "checked program"
        );

        if !self.quiet {
            diagnostics::render(&source_name, &result)
                .context("failed to write diagnostics to stderr")?;
        }

        let target = self.report_target(&source);
        let report = SyntaxReport::new(&*source_name, target.to_string(), date, &result)
            .with_banner(self.banner.as_str());

        match &target {
            ReportTarget::Stdout => report
                .write(io::stdout().lock())
                .context("failed to write report to stdout")?,
            ReportTarget::File(path) => {
                report
                    .write(open_writable(path)?)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                tracing::debug!(report = %path.display(), "wrote report");
                if self.print {
                    report
                        .write(io::stdout().lock())
                        .context("failed to write report to stdout")?;
                }
            }
        }

        Ok(result.is_valid())
    }
}

fn open_writable(path: &Path) -> Result<impl Write> {
    OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))
}

fn today() -> ReportDate {
    let days = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| i64::try_from(elapsed.as_secs() / 86_400).ok())
        .unwrap_or_default();
    ReportDate::from_unix_days(days)
}

/// Check every file, returning the process exit code
///
/// Failing to read or report on one file doesn't stop the others from being checked.
fn run(args: &Args) -> Result<ExitCode> {
    ensure!(
        args.output.is_none() || args.files.len() == 1,
        "--output can only be used when checking a single file"
    );

    let checker = args.checker();
    let date = today();
    let mut all_valid = true;
    let mut failed = false;

    for input in &args.files {
        match args.check_file(&checker, input, date) {
            Ok(valid) => all_valid &= valid,
            Err(e) => {
                tracing::error!("{e:#}");
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::from(2)
    } else if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    run(&args).unwrap_or_else(|e| {
        tracing::error!("{e:#}");
        ExitCode::from(2)
    })
}
