//! Loading every capture in a directory
//!
//! Discovery walks the directory with `walkdir`, keeps `.csv` files, and sorts
//! them. Loading runs either on the calling thread or on a fixed set of worker
//! threads sharing one result list. Every file is loaded inside its own file
//! logging context so the error collector can group events per capture.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::runtime::RuntimeConfig;
use crate::file_processor::CSV_EXTENSION;
use crate::logging::codes;
use crate::pipeline::{self, CaptureResult, PipelineError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

// ============================================================================
// BATCH TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    /// Upper bound on discovered files, capped by the build-time batch limit
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    /// Preferences every capture in the batch is loaded with
    pub runtime: RuntimeConfig,
}

impl BatchConfig {
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        Self {
            recursive: runtime.batch.recursive,
            progress_reporting: runtime.batch.progress_reporting,
            fail_fast: runtime.batch.fail_fast,
            runtime: runtime.clone(),
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    /// Thread count actually used: at least one, at most the build-time limit
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }

    pub fn effective_file_limit(&self) -> usize {
        self.max_files
            .map_or(MAX_FILES_PER_BATCH, |max| max.min(MAX_FILES_PER_BATCH))
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: false,
            fail_fast: false,
            runtime: RuntimeConfig::default(),
        }
    }
}

#[derive(Debug)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, CaptureResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            successful_files: Vec::new(),
            failed_files: Vec::new(),
            processing_duration: Duration::new(0, 0),
            files_processed: 0,
            files_discovered: 0,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    pub fn total_frames(&self) -> usize {
        self.successful_files
            .iter()
            .map(|(_, result)| result.frame_count())
            .sum()
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: CaptureResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    /// Worker threads finish in any order; restore path order
    fn sort_by_path(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch completed: {} captures loaded, {} successful ({:.1}%), {} failed, {} frames, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.total_frames(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No CSV captures found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::ThreadError { .. } => codes::batch::WORKER_FAILED,
            _ => codes::batch::DISCOVERY_FAILED,
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Find capture files under `dir_path`, sorted by path
pub fn discover_capture_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    log_info!("Starting capture discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        let error = BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        };
        log_error!(error.error_code(), "Capture directory not found",
            "directory" => dir_path.display()
        );
        return Err(error);
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(dir_path).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;

        if entry.file_type().is_file() && is_capture_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    let limit = config.effective_file_limit();
    if files.len() > limit {
        log_warning!(codes::warnings::BATCH_LIMIT_REACHED,
            "Reached maximum file limit",
            "files_found" => files.len(),
            "limit" => limit
        );
        files.truncate(limit);
    }

    log_success!(
        codes::success::FILE_VALIDATION_PASSED,
        "Capture discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

fn is_capture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION))
}

// ============================================================================
// BATCH LOADING
// ============================================================================

fn load_one(
    file_path: &Path,
    file_id: usize,
    total: usize,
    config: &BatchConfig,
) -> Result<CaptureResult, PipelineError> {
    if config.progress_reporting {
        log_info!("Loading capture",
            "file" => file_path.display(),
            "index" => file_id + 1,
            "of" => total
        );
    }

    let result = pipeline::load_capture_in_context(file_path, file_id, &config.runtime);

    if let Err(error) = &result {
        crate::logging::with_file_context(file_path.to_path_buf(), file_id, || {
            log_error!(error.error_code(), "Capture failed to load",
                "file" => file_path.display(),
                "error" => error
            );
        });
    }

    result
}

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    log_info!("Starting sequential batch loading",
        "directory" => dir_path.display()
    );

    let files = discover_capture_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        match load_one(file_path, file_id, files.len(), config) {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(error) => {
                results.add_failure(file_path.clone(), error);
                if config.fail_fast {
                    log_warning!(codes::warnings::FAIL_FAST_STOP,
                        "Fail-fast mode enabled, stopping batch",
                        "file" => file_path.display()
                    );
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_completion(&results, 1);

    Ok(results)
}

pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.effective_threads();

    log_info!("Starting parallel batch loading",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_capture_files(dir_path, config)?;
    let total = files.len();

    let results = Arc::new(Mutex::new(BatchResults::new()));
    let stop = Arc::new(AtomicBool::new(false));
    let files_per_thread = total.div_ceil(threads);

    let mut handles = Vec::new();
    for (chunk_id, chunk) in files.chunks(files_per_thread).enumerate() {
        let first_id = chunk_id * files_per_thread;
        let thread_files = chunk.to_vec();
        let results = Arc::clone(&results);
        let stop = Arc::clone(&stop);
        let config = config.clone();

        handles.push(thread::spawn(move || {
            for (offset, file_path) in thread_files.into_iter().enumerate() {
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let outcome = load_one(&file_path, first_id + offset, total, &config);
                let mut guard = results.lock().unwrap_or_else(|p| p.into_inner());
                match outcome {
                    Ok(result) => guard.add_success(file_path, result),
                    Err(error) => {
                        guard.add_failure(file_path, error);
                        if config.fail_fast {
                            stop.store(true, Ordering::Relaxed);
                        }
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().map_err(|_| {
            let error = BatchError::ThreadError {
                message: "Worker panicked while loading captures".to_string(),
            };
            log_error!(error.error_code(), "Batch worker panicked");
            error
        })?;
    }

    let mut results = Arc::try_unwrap(results)
        .map_err(|_| BatchError::ThreadError {
            message: "Results still shared after workers finished".to_string(),
        })?
        .into_inner()
        .unwrap_or_else(|p| p.into_inner());

    if stop.load(Ordering::Relaxed) {
        log_warning!(codes::warnings::FAIL_FAST_STOP,
            "Fail-fast mode enabled, stopping batch",
            "failed" => results.failure_count()
        );
    }

    results.sort_by_path();
    results.files_discovered = total;
    results.processing_duration = start_time.elapsed();
    log_completion(&results, threads);

    Ok(results)
}

fn log_completion(results: &BatchResults, threads: usize) {
    log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch loading completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "frames" => results.total_frames(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Load a directory with default configuration
pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

/// One worker means the sequential path
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads() == 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const CAPTURE: &str = "t_mono,t_wall,chirality\n1.0,2.0,left\n1.1,2.1,left\n";

    fn quiet() -> BatchConfig {
        BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_discovery_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), CAPTURE).unwrap();
        fs::write(dir.path().join("a.CSV"), CAPTURE).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a capture").unwrap();

        let files = discover_capture_files(dir.path(), &quiet()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_discovery_recursion() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("session")).unwrap();
        fs::write(dir.path().join("top.csv"), CAPTURE).unwrap();
        fs::write(dir.path().join("session").join("nested.csv"), CAPTURE).unwrap();

        let recursive = discover_capture_files(dir.path(), &quiet()).unwrap();
        assert_eq!(recursive.len(), 2);

        let flat = BatchConfig {
            recursive: false,
            ..quiet()
        };
        let single = discover_capture_files(dir.path(), &flat).unwrap();
        assert_eq!(single, vec![dir.path().join("top.csv")]);
    }

    #[test]
    fn test_discovery_honours_max_files() {
        let dir = tempdir().unwrap();
        for name in ["a.csv", "b.csv", "c.csv"] {
            fs::write(dir.path().join(name), CAPTURE).unwrap();
        }

        let config = BatchConfig {
            max_files: Some(2),
            ..quiet()
        };
        let files = discover_capture_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1], dir.path().join("b.csv"));
    }

    #[test]
    fn test_discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_capture_files(dir.path(), &quiet()),
            Err(BatchError::NoFilesFound { .. })
        );
        assert_matches!(
            discover_capture_files(&dir.path().join("missing"), &quiet()),
            Err(BatchError::DirectoryNotFound { .. })
        );
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let dir = tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("capture{}.csv", i)), CAPTURE).unwrap();
        }
        fs::write(dir.path().join("empty.csv"), "").unwrap();

        let sequential =
            process_directory_sequential(dir.path(), &quiet().with_threads(1)).unwrap();
        let parallel = process_directory_parallel(dir.path(), &quiet().with_threads(3)).unwrap();

        for results in [&sequential, &parallel] {
            assert_eq!(results.files_discovered, 6);
            assert_eq!(results.success_count(), 5);
            assert_eq!(results.failure_count(), 1);
            assert_eq!(results.total_frames(), 10);
        }

        let order = |r: &BatchResults| -> Vec<PathBuf> {
            r.successful_files.iter().map(|(p, _)| p.clone()).collect()
        };
        assert_eq!(order(&sequential), order(&parallel));
    }

    #[test]
    fn test_sequential_fail_fast_stops() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_empty.csv"), "").unwrap();
        fs::write(dir.path().join("b.csv"), CAPTURE).unwrap();

        let config = BatchConfig {
            fail_fast: true,
            ..quiet().with_threads(1)
        };
        let results = process_directory_with_config(dir.path(), &config).unwrap();
        assert_eq!(results.files_processed, 1);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.files_discovered, 2);
    }

    #[test]
    fn test_batch_results_summary() {
        let results = BatchResults::new();
        assert_eq!(results.success_rate(), 0.0);
        assert!(results.summary().starts_with("Batch completed: 0 captures loaded"));
    }

    #[test]
    fn test_config_limits() {
        let config = BatchConfig {
            max_threads: 0,
            max_files: Some(usize::MAX),
            ..BatchConfig::default()
        };
        assert_eq!(config.effective_threads(), 1);
        assert_eq!(config.effective_file_limit(), MAX_FILES_PER_BATCH);
        assert_eq!(
            config.with_threads(10_000).effective_threads(),
            MAX_WORKER_THREADS
        );
    }

    #[test]
    fn test_config_from_runtime() {
        let mut runtime = RuntimeConfig::default();
        runtime.batch.recursive = false;
        runtime.batch.fail_fast = true;
        runtime.parser.strict_numbers = true;

        let config = BatchConfig::from_runtime(&runtime);
        assert!(!config.recursive);
        assert!(config.fail_fast);
        assert!(config.runtime.parser.strict_numbers);
    }
}
