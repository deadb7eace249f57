//! Structured per-clip logging.

use tracing::{error, info, warn, Span};

/// Logs clip lifecycle events with the clip's position and Pexels id
/// attached as fields.
#[derive(Debug, Clone, Copy)]
pub struct ClipLogger {
    index: usize,
    video_id: u64,
}

impl ClipLogger {
    /// Logger for the clip at 1-based `index` in the search results.
    pub fn new(index: usize, video_id: u64) -> Self {
        Self { index, video_id }
    }

    pub fn log_start(&self, message: &str) {
        info!(clip_index = self.index, video_id = self.video_id, "Clip started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(clip_index = self.index, video_id = self.video_id, "Clip progress: {}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(clip_index = self.index, video_id = self.video_id, "Clip warning: {}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(clip_index = self.index, video_id = self.video_id, "Clip error: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(clip_index = self.index, video_id = self.video_id, "Clip completed: {}", message);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn video_id(&self) -> u64 {
        self.video_id
    }

    /// Span carrying the clip fields, for instrumenting the clip's work.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("clip", clip_index = self.index, video_id = self.video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_logger_fields() {
        let logger = ClipLogger::new(3, 1851190);
        assert_eq!(logger.index(), 3);
        assert_eq!(logger.video_id(), 1851190);
    }
}
