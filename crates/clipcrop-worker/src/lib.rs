//! Downloads stock clips and crops them to 1080×1920 portrait.
//!
//! Configuration, per-clip logging and the sequential clip pipeline used by
//! the `clipcrop` binary.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::{FailurePolicy, WorkerConfig};
pub use error::{WorkerError, WorkerResult};
pub use logging::ClipLogger;
pub use pipeline::{ClipPipeline, FailedClip, RunSummary};
