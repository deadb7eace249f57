//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Pexels error: {0}")]
    Pexels(#[from] clipcrop_pexels::PexelsError),

    #[error("Media error: {0}")]
    Media(#[from] clipcrop_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// True for a user-requested stop, at any layer.
    pub fn is_cancelled(&self) -> bool {
        match self {
            WorkerError::Cancelled => true,
            WorkerError::Media(e) => e.is_cancelled(),
            _ => false,
        }
    }

    /// Captured tool output explaining a media failure.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            WorkerError::Media(e) => e.diagnostics(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcrop_media::MediaError;

    #[test]
    fn test_cancel_detected_through_media_layer() {
        assert!(WorkerError::Cancelled.is_cancelled());
        assert!(WorkerError::from(MediaError::Cancelled).is_cancelled());
        assert!(!WorkerError::from(MediaError::Timeout(5)).is_cancelled());
    }

    #[test]
    fn test_diagnostics_forwarded() {
        let err = WorkerError::from(MediaError::ffmpeg_failed(
            "FFmpeg exited with non-zero status",
            Some("moov atom not found".to_string()),
            Some(1),
        ));
        assert_eq!(err.diagnostics(), Some("moov atom not found"));
        assert!(WorkerError::config_error("x").diagnostics().is_none());
    }
}
