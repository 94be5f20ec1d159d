//! # handview
//!
//! Loads hand-tracking captures and prints their frames.

use clap::{CommandFactory, Parser};
use hand_capture::batch::{self, BatchConfig, BatchResults};
use hand_capture::config::RuntimeConfig;
use hand_capture::export::{BatchExport, CaptureExport, ExportError};
use hand_capture::file_processor::resolve_resource;
use hand_capture::logging;
use hand_capture::pipeline::{self, CaptureResult};
use hand_capture::report;
use hand_capture::{log_error, log_info};
use hand_capture_cli::{default_threads, init_logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Print the frames of a hand-tracking capture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Capture file, or a directory of captures
    #[arg(required_unless_present = "resource", conflicts_with = "resource")]
    path: Option<PathBuf>,

    /// Capture name, loaded as <resource-dir>/<NAME>.csv
    #[arg(long, value_name = "NAME")]
    resource: Option<String>,

    /// Directory that --resource names are resolved in
    #[arg(long, value_name = "DIR", default_value = ".")]
    resource_dir: PathBuf,

    /// Write the loaded frames as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Print capture statistics before the frame list
    #[arg(long)]
    summary: bool,

    /// Show at most N frames
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Fail on numeric fields that do not parse instead of reading them as zero
    #[arg(long)]
    strict: bool,

    /// Remove the carriage return that ends each line of a CRLF capture
    #[arg(long)]
    strip_cr: bool,

    /// Worker threads for directories [default: number of CPUs]
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Load a directory on the main thread
    #[arg(long)]
    sequential: bool,

    /// Only load captures directly inside the directory
    #[arg(long)]
    no_recursive: bool,

    /// Stop a directory load at the first failed capture
    #[arg(long)]
    fail_fast: bool,

    /// Runtime preferences in TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log JSON lines to stderr
    #[arg(long)]
    structured_logs: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match runtime_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Warning: logging not initialized: {}", e);
    }
    log_info!("handview starting", "version" => hand_capture::VERSION);

    let target = match (&args.path, &args.resource) {
        (Some(path), _) => path.clone(),
        (None, Some(name)) => resolve_resource(&args.resource_dir, name),
        (None, None) => {
            let _ = Args::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    let ok = if target.is_dir() {
        view_directory(&target, &args, &config)
    } else {
        view_file(&target, &args, &config)
    };

    logging::print_cargo_style_summary();

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn runtime_config(args: &Args) -> Result<RuntimeConfig, String> {
    let mut config = match &args.config {
        Some(path) => RuntimeConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => RuntimeConfig::default(),
    };

    if args.strict {
        config.parser.strict_numbers = true;
    }
    if args.strip_cr {
        config.parser.strip_carriage_returns = true;
    }
    if args.no_recursive {
        config.batch.recursive = false;
    }
    if args.fail_fast {
        config.batch.fail_fast = true;
    }
    if args.structured_logs {
        config.logging.use_structured_logging = true;
    }

    Ok(config)
}

fn view_file(path: &Path, args: &Args, config: &RuntimeConfig) -> bool {
    match pipeline::load_capture_with_preferences(path, config) {
        Ok(result) => {
            println!("Loaded {} frames from CSV.", result.frame_count());
            print_capture(&result, args);
            match &args.json {
                Some(out) => report_export(out, CaptureExport::from_result(&result).write_to(out)),
                None => true,
            }
        }
        Err(e) => {
            eprintln!("Error loading CSV file: {}", e);
            print!("{}", report::format_frame_list(&[]));
            false
        }
    }
}

fn print_capture(result: &CaptureResult, args: &Args) {
    if args.summary {
        println!();
        print!("{}", report::format_summary(&result.summary()));
    }
    println!();
    print!(
        "{}",
        report::format_frame_list_limited(&result.frames, args.limit)
    );
}

fn view_directory(dir: &Path, args: &Args, config: &RuntimeConfig) -> bool {
    let threads = if args.sequential {
        1
    } else {
        args.threads.unwrap_or_else(default_threads)
    };
    let batch_config = BatchConfig::from_runtime(config).with_threads(threads);

    let results = match batch::process_directory_with_config(dir, &batch_config) {
        Ok(results) => results,
        Err(e) => {
            log_error!(e.error_code(), "Directory could not be loaded", "error" => e);
            eprintln!("Error: {}", e);
            return false;
        }
    };

    print_batch(&results, args);

    let exports_ok = match &args.json {
        Some(out) => report_export(out, BatchExport::from_results(&results).write_to(out)),
        None => true,
    };

    exports_ok && results.failure_count() == 0
}

fn print_batch(results: &BatchResults, args: &Args) {
    for (path, result) in &results.successful_files {
        println!("\n=== {} ===", path.display());
        println!("Loaded {} frames from CSV.", result.frame_count());
        print_capture(result, args);
    }

    for (path, error) in &results.failed_files {
        println!("\n=== {} ===", path.display());
        println!("  FAILED: {}", error);
    }

    println!("\n{}", results.summary());
}

fn report_export(out: &Path, written: Result<(), ExportError>) -> bool {
    match written {
        Ok(()) => {
            println!("\n[OK] Frames saved to: {}", out.display());
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}
