//! Loader for hand-tracking motion capture CSV files
//!
//! Each row of a capture holds two timestamps, the tracked hand, and the
//! position and orientation of up to 26 joints. [`pipeline::load_capture`]
//! reads and parses one file; [`batch`] loads whole directories.

// Macros must be declared before the modules that use them
#[macro_use]
pub mod logging;
pub mod config;
pub mod utils;

pub mod batch;
pub mod capture;
pub mod export;
pub mod file_processor;
pub mod pipeline;
pub mod report;

pub use batch::{BatchConfig, BatchError, BatchResults};
pub use capture::{parse_capture, HandFrame, JointName, ParseError};
pub use export::{BatchExport, CaptureExport, ExportError};
pub use pipeline::{load_capture, load_frames_or_empty, CaptureResult, CaptureSummary, PipelineError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
