//! Command-line interface for lexmetrics.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::*;
use globset::GlobSet;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::complexity::SavedJsonAnalyzer;
use crate::config::{self, Config};
use crate::engine::Analyzer;
use crate::profile::Registry;
use crate::report::{self, Operation, Report};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "target", "__pycache__"];

/// Structural source metrics across many languages.
///
/// Counts class declarations, comment lines and per-function returns with a
/// lexical scanner that ignores anything inside strings and comments, and
/// summarizes HTML documents.
#[derive(Parser)]
#[command(name = "lexmetrics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count class, struct, interface and other type declarations
    #[command(visible_alias = "class-count")]
    Classes(ScanArgs),
    /// Count lines that contain comments
    #[command(visible_alias = "comment-count")]
    Comments(ScanArgs),
    /// Count return statements per function
    #[command(visible_alias = "return-count")]
    Returns(ScanArgs),
    /// Summarize the element tree of HTML documents
    #[command(visible_alias = "dom-summary")]
    Dom(ScanArgs),
    /// Aggregate cyclomatic complexity from an external analyzer
    Complexity(ComplexityArgs),
    /// List supported languages and extensions
    Languages,
}

/// Arguments shared by the scanning commands.
#[derive(Args)]
pub struct ScanArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,
}

#[derive(Args)]
pub struct ComplexityArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Read saved `<file>.complexity.json` analyses instead of running the configured command
    #[arg(long)]
    pub saved: bool,
}

/// Collect files under `root`.
///
/// An explicit file path is always kept. Directory walks keep only files the
/// operation supports. A root that does not exist, and any entry the walk
/// cannot read, is kept as well so that it surfaces as an error report.
fn collect_files(
    root: &Path,
    operation: Operation,
    analyzer: &Analyzer<'_>,
    excludes: &GlobSet,
    include_hidden: bool,
) -> Vec<PathBuf> {
    if root.is_file() || !root.exists() {
        return vec![root.to_path_buf()];
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if !include_hidden && name.starts_with('.') {
                return false;
            }
            !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), "cannot walk: {}", err);
                files.push(path);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_excluded(path, root, excludes) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if analyzer.supports(ext, operation) {
            files.push(path.to_path_buf());
        }
    }

    files
}

/// Match exclusion globs against the walked path and the root-relative path.
fn is_excluded(path: &Path, root: &Path, excludes: &GlobSet) -> bool {
    if excludes.is_empty() {
        return false;
    }
    excludes.is_match(path)
        || path
            .strip_prefix(root)
            .map(|rel| excludes.is_match(rel))
            .unwrap_or(false)
}

/// Load config and registry, or print the problem and return an exit code.
fn prepare(cli_config: Option<&Path>) -> Result<(Config, &'static Registry), i32> {
    let registry = match Registry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: invalid language registry: {}", e);
            return Err(EXIT_ERROR);
        }
    };

    let config = match Config::load(cli_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Err(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config, registry) {
        eprintln!("Error: invalid config: {:#}", e);
        return Err(EXIT_ERROR);
    }

    Ok((config, registry))
}

/// Run one of the scanning commands.
pub fn run_scan(cli: &Cli, args: &ScanArgs, operation: Operation) -> anyhow::Result<i32> {
    run_with(cli, args, operation, false)
}

/// Run the complexity command.
pub fn run_complexity(cli: &Cli, args: &ComplexityArgs) -> anyhow::Result<i32> {
    run_with(cli, &args.scan, Operation::Complexity, args.saved)
}

fn run_with(cli: &Cli, args: &ScanArgs, operation: Operation, saved: bool) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'json' or 'pretty'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let (config, registry) = match prepare(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return Ok(code),
    };

    let mut analyzer = Analyzer::new(registry)
        .with_aliases(config.aliases.clone())
        .with_thresholds(config.thresholds());
    if operation == Operation::Complexity {
        if saved {
            analyzer = analyzer.with_complexity(Box::new(SavedJsonAnalyzer));
        } else if let Some(external) = config.complexity_analyzer() {
            analyzer = analyzer.with_complexity(external);
        }
    }

    let excludes = config.exclusion_set()?;
    let mut files = Vec::new();
    for root in &args.paths {
        files.extend(collect_files(
            root,
            operation,
            &analyzer,
            &excludes,
            config.should_include_hidden(),
        ));
    }

    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }
    debug!(count = files.len(), %operation, "analyzing files");

    let reports = analyze_all(&analyzer, &files, operation, args.progress)?;

    match args.format.as_str() {
        "pretty" => report::write_pretty(&reports),
        _ => report::write_json(&reports)?,
    }

    Ok(exit_code(&reports))
}

/// Analyze files in parallel. Reports come back sorted by path.
fn analyze_all(
    analyzer: &Analyzer<'_>,
    files: &[PathBuf],
    operation: Operation,
    show_progress: bool,
) -> anyhow::Result<Vec<Report>> {
    let progress = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        Some(bar)
    } else {
        None
    };

    let mut reports: Vec<Report> = files
        .par_iter()
        .map(|path| {
            let report = analyzer.analyze_file(path, operation);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            report
        })
        .collect();
    reports.sort_by(|a, b| a.file.cmp(&b.file));

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(reports)
}

/// `EXIT_FAILED` when any report is an error, otherwise `EXIT_SUCCESS`.
fn exit_code(reports: &[Report]) -> i32 {
    let failed = reports.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        warn!(failed, "some files could not be analyzed");
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// List the built-in languages.
pub fn run_languages() -> anyhow::Result<i32> {
    let registry = match Registry::builtin() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: invalid language registry: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    println!("Supported languages:");
    println!();
    for profile in registry.profiles() {
        let extensions = profile
            .extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:<14} {:<14} {}",
            profile.id.bold(),
            profile.block_style.as_str().dimmed(),
            extensions
        );
    }
    println!();
    println!("  {:<14} {:<14} .html .htm .xhtml", "html".bold(), "dom".dimmed());

    Ok(EXIT_SUCCESS)
}
