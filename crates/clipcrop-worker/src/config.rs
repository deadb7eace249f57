//! Worker configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{WorkerError, WorkerResult};

/// What to do when one clip fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run at the first failed clip
    #[default]
    Abort,
    /// Log the failure and continue with the next clip
    Skip,
}

impl FromStr for FailurePolicy {
    type Err = WorkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(WorkerError::config_error(format!(
                "unknown failure policy '{}', expected 'abort' or 'skip'",
                other
            ))),
        }
    }
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory numbered clips are written to
    pub output_dir: PathBuf,
    /// Parent of the per-clip scratch directories
    pub work_dir: PathBuf,
    /// Failure handling per clip
    pub on_error: FailurePolicy,
    /// Kill FFmpeg after this long
    pub ffmpeg_timeout: Option<Duration>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            work_dir: std::env::temp_dir(),
            on_error: FailurePolicy::Abort,
            ffmpeg_timeout: None,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> WorkerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            output_dir: lookup("CLIPCROP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            work_dir: lookup("CLIPCROP_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            on_error: lookup("CLIPCROP_ON_ERROR")
                .map(|s| s.parse::<FailurePolicy>())
                .transpose()?
                .unwrap_or_default(),
            ffmpeg_timeout: lookup("CLIPCROP_FFMPEG_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs),
        })
    }

    /// Final location of the clip at 1-based `index`.
    pub fn output_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}.mp4", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.on_error, FailurePolicy::Abort);
        assert!(config.ffmpeg_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            ("CLIPCROP_OUTPUT_DIR", "/srv/clips"),
            ("CLIPCROP_WORK_DIR", "/scratch"),
            ("CLIPCROP_ON_ERROR", "Skip"),
            ("CLIPCROP_FFMPEG_TIMEOUT", "600"),
        ]))
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/clips"));
        assert_eq!(config.work_dir, PathBuf::from("/scratch"));
        assert_eq!(config.on_error, FailurePolicy::Skip);
        assert_eq!(config.ffmpeg_timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = WorkerConfig::from_lookup(lookup_from(&[("CLIPCROP_ON_ERROR", "retry")]))
            .unwrap_err();
        assert!(matches!(err, WorkerError::ConfigError(_)));
    }

    #[test]
    fn test_output_path_numbering() {
        let config = WorkerConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(config.output_path(1), PathBuf::from("out/1.mp4"));
        assert_eq!(config.output_path(12), PathBuf::from("out/12.mp4"));
    }
}
