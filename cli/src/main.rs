//! skeltree - Directory skeleton replication
//!
//! Mirrors a directory tree as empty folders and zero-length files,
//! powered by the skeltree library.

use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use serde_json::{Value, json};
use skeltree::{
    Error as SkeltreeError, ErrorCode, OnEntryError, Pass, ProgressSnapshot, ReplicateOptions,
    ReplicateStats, create_progress_bar, replicate_tree,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// skeltree - Mirror a directory tree as a skeleton
///
/// Recreates every folder of SOURCE under DEST and every file as a
/// zero-length placeholder with the same name. Hidden and system entries
/// are left out. File contents are never read.
///
/// Usage:
///   skeltree SOURCE DEST
#[derive(Parser, Debug)]
#[command(name = "skeltree", version, about, long_about = None)]
struct Args {
    /// Directory to mirror
    source: PathBuf,

    /// Where the skeleton is built (created if missing)
    destination: PathBuf,

    /// Profile-driven defaults
    #[arg(long, value_enum, default_value = "strict")]
    profile: ProfileName,

    /// Log and skip entries that cannot be read or created
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Number of worker threads for the file pass
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Print a folder progress line every N folders
    #[arg(long, value_name = "N")]
    dir_every: Option<u64>,

    /// Print a file progress line every N files
    #[arg(long, value_name = "N")]
    file_every: Option<u64>,

    /// Descend into symlinked directories
    #[arg(short = 'L', long)]
    follow_symlinks: bool,

    /// Maximum directory depth (default: unlimited)
    ///
    /// Folders one level past the limit are created empty and their contents
    /// reported as failures.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Keep names starting with "." on platforms without a hidden attribute
    #[arg(long)]
    no_dotfile_hiding: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Render progress as a bar instead of lines
    #[arg(long)]
    bar: bool,

    /// Suppress progress output
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileName {
    /// Stop at the first failing entry, one worker
    Strict,
    /// Skip failing entries, one worker
    Resilient,
    /// Skip failing entries, one worker per CPU, sparse progress
    Fast,
}

impl ProfileName {
    fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Resilient => "resilient",
            Self::Fast => "fast",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressMode {
    Lines,
    Bar,
    Off,
}

impl ProgressMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Bar => "bar",
            Self::Off => "off",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ProfileDefaults {
    on_error: OnEntryError,
    jobs: usize,
    dir_every: u64,
    file_every: u64,
}

fn profile_defaults(profile: ProfileName) -> ProfileDefaults {
    match profile {
        ProfileName::Strict => ProfileDefaults {
            on_error: OnEntryError::Abort,
            jobs: 1,
            dir_every: skeltree::DEFAULT_DIR_REPORT_EVERY,
            file_every: skeltree::DEFAULT_FILE_REPORT_EVERY,
        },
        ProfileName::Resilient => ProfileDefaults {
            on_error: OnEntryError::Continue,
            jobs: 1,
            dir_every: skeltree::DEFAULT_DIR_REPORT_EVERY,
            file_every: skeltree::DEFAULT_FILE_REPORT_EVERY,
        },
        ProfileName::Fast => ProfileDefaults {
            on_error: OnEntryError::Continue,
            jobs: std::thread::available_parallelism().map_or(4, usize::from),
            dir_every: 1_000,
            file_every: 10_000,
        },
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Replicate(#[from] SkeltreeError),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Replicate(source) => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone)]
struct EffectiveConfig {
    profile: ProfileName,
    on_error: OnEntryError,
    jobs: usize,
    dir_every: u64,
    file_every: u64,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    dotfiles_hidden: bool,
    progress: ProgressMode,
    output_mode: OutputMode,
    verbose: bool,
}

impl EffectiveConfig {
    fn on_error_str(&self) -> &'static str {
        match self.on_error {
            OnEntryError::Abort => "abort",
            OnEntryError::Continue => "continue",
        }
    }

    fn to_json_value(&self) -> Value {
        json!({
            "profile": self.profile.as_str(),
            "on_error": self.on_error_str(),
            "jobs": self.jobs,
            "dir_every": self.dir_every,
            "file_every": self.file_every,
            "follow_symlinks": self.follow_symlinks,
            "max_depth": self.max_depth,
            "dotfiles_hidden": self.dotfiles_hidden,
            "output_mode": self.output_mode.as_str(),
        })
    }

    fn print_human_stderr(&self) {
        eprintln!("Effective configuration:");
        eprintln!("  profile: {}", self.profile.as_str());
        eprintln!("  on_error: {}", self.on_error_str());
        eprintln!("  jobs: {}", self.jobs);
        eprintln!("  dir_every: {}", self.dir_every);
        eprintln!("  file_every: {}", self.file_every);
        eprintln!("  follow_symlinks: {}", self.follow_symlinks);
        match self.max_depth {
            Some(depth) => eprintln!("  max_depth: {depth}"),
            None => eprintln!("  max_depth: unlimited"),
        }
        eprintln!("  dotfiles_hidden: {}", self.dotfiles_hidden);
        eprintln!("  progress: {}", self.progress.as_str());
        eprintln!("  output_mode: {}", self.output_mode.as_str());
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();
    let (mut options, effective_config) = build_options_and_effective_config(&args);

    let human = effective_config.output_mode == OutputMode::Human;
    if human {
        if effective_config.verbose {
            effective_config.print_human_stderr();
        }
        println!("Source: {}", display_absolute(&args.source));
        println!("Destination: {}", display_absolute(&args.destination));
    }

    let bar_slot: Arc<Mutex<Option<(Pass, ProgressBar)>>> = Arc::default();
    match effective_config.progress {
        ProgressMode::Lines => {
            options = options.with_progress(|snapshot| println!("{snapshot}"));
        }
        ProgressMode::Bar => {
            let slot = bar_slot.clone();
            options = options.with_progress(move |snapshot| update_bar(&slot, snapshot));
        }
        ProgressMode::Off => {}
    }

    let result = replicate_tree(&args.source, &args.destination, &options);

    if let Ok(mut slot) = bar_slot.lock() {
        if let Some((_, pb)) = slot.take() {
            pb.finish_and_clear();
        }
    }

    match result {
        Ok(stats) => {
            if human {
                print_summary(&stats);
            } else {
                emit_json_success(&effective_config, &stats)?;
            }
            Ok(())
        }
        Err(error) => {
            if let SkeltreeError::PartialReplicate { stats } = &error {
                if human {
                    print_summary(stats);
                }
            }
            if !human {
                emit_json_failure(&effective_config, &error)?;
            }
            Err(error.into())
        }
    }
}

fn build_options_and_effective_config(args: &Args) -> (ReplicateOptions, EffectiveConfig) {
    let defaults = profile_defaults(args.profile);

    let on_error = if args.keep_going {
        OnEntryError::Continue
    } else {
        defaults.on_error
    };
    let jobs = args.jobs.unwrap_or(defaults.jobs).max(1);
    let dir_every = args.dir_every.unwrap_or(defaults.dir_every).max(1);
    let file_every = args.file_every.unwrap_or(defaults.file_every).max(1);

    let progress = if args.quiet || args.output != OutputMode::Human {
        ProgressMode::Off
    } else if args.bar {
        ProgressMode::Bar
    } else {
        ProgressMode::Lines
    };

    let mut options = ReplicateOptions::default()
        .with_parallel(jobs)
        .with_on_error(on_error)
        .with_dir_report_every(dir_every)
        .with_file_report_every(file_every);

    if args.follow_symlinks {
        options = options.with_follow_symlinks();
    }
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }
    if args.no_dotfile_hiding {
        options = options.without_dotfile_hiding();
    }

    if args.output == OutputMode::Human {
        options = options.with_warn_handler(|msg| {
            eprintln!("warning: {}", msg);
        });
        if args.verbose {
            options = options.with_verbose_handler(|msg| {
                eprintln!("  {}", msg);
            });
        }
    }

    let effective_config = EffectiveConfig {
        profile: args.profile,
        on_error,
        jobs,
        dir_every,
        file_every,
        follow_symlinks: args.follow_symlinks,
        max_depth: args.max_depth,
        dotfiles_hidden: !args.no_dotfile_hiding,
        progress,
        output_mode: args.output,
        verbose: args.verbose,
    };

    (options, effective_config)
}

/// Drive one indicatif bar per pass from progress snapshots.
fn update_bar(slot: &Mutex<Option<(Pass, ProgressBar)>>, snapshot: &ProgressSnapshot) {
    let Ok(mut slot) = slot.lock() else {
        return;
    };

    let stale = matches!(&*slot, Some((pass, _)) if *pass != snapshot.pass);
    if stale {
        if let Some((_, pb)) = slot.take() {
            pb.finish();
        }
    }

    let (_, pb) =
        slot.get_or_insert_with(|| (snapshot.pass, create_progress_bar(snapshot.pass, snapshot.total)));
    pb.set_position(snapshot.processed);
    pb.set_message(format!("about {}s remaining", snapshot.remaining.as_secs()));
    if snapshot.is_final() {
        pb.finish();
    }
}

fn print_summary(stats: &ReplicateStats) {
    println!(
        "Created {} folders and {} files",
        stats.dirs_total, stats.files_total
    );
    println!("  Source:      {}", stats.source.display());
    println!("  Destination: {}", stats.destination.display());
    if stats.excluded > 0 {
        println!("  Excluded:    {} hidden or system", stats.excluded);
    }
    if stats.failed() > 0 {
        println!("  Failed:      {}", stats.failed());
    }
}

fn emit_json_success(effective_config: &EffectiveConfig, stats: &ReplicateStats) -> CliResult<()> {
    let stats = serde_json::to_value(stats).map_err(|source| CliError::JsonSerialize { source })?;
    let payload = json!({
        "schema_version": "1.0",
        "mode": "replicate",
        "effective_config": effective_config.to_json_value(),
        "stats": stats,
    });
    print_json_value(&payload)
}

fn emit_json_failure(effective_config: &EffectiveConfig, error: &SkeltreeError) -> CliResult<()> {
    let mut payload = json!({
        "schema_version": "1.0",
        "mode": "replicate",
        "effective_config": effective_config.to_json_value(),
        "error_code": error.code().as_str(),
        "error_message": error.to_string(),
    });
    if let SkeltreeError::PartialReplicate { stats } = error {
        let stats =
            serde_json::to_value(stats).map_err(|source| CliError::JsonSerialize { source })?;
        payload["stats"] = stats;
    }
    print_json_value(&payload)
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_absolute(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
