//! FFmpeg progress parsing.
//!
//! FFmpeg writes `key=value` lines to stderr when run with
//! `-progress pipe:2`. Each block ends with a `progress=continue` or
//! `progress=end` line, at which point a snapshot is emitted.

use serde::{Deserialize, Serialize};

/// Progress snapshot from FFmpeg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FfmpegProgress {
    /// Current frame number
    pub frame: u64,
    /// Current encode FPS
    pub fps: f64,
    /// Output time in milliseconds
    pub out_time_ms: i64,
    /// Encoding speed (1.5 = 1.5x realtime)
    pub speed: f64,
    /// Whether encoding is complete
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Percentage encoded given the clip duration in milliseconds.
    pub fn percentage(&self, total_duration_ms: i64) -> f64 {
        if total_duration_ms <= 0 {
            return 0.0;
        }
        ((self.out_time_ms as f64 / total_duration_ms as f64) * 100.0).min(100.0)
    }
}

/// Outcome of feeding one stderr line to the parser.
#[derive(Debug, PartialEq)]
pub(crate) enum ProgressLine {
    /// A progress key was absorbed, no snapshot yet
    Field,
    /// End of a progress block
    Snapshot(FfmpegProgress),
    /// Not part of the progress protocol (diagnostic output)
    Other,
}

/// Parse a line of FFmpeg's `-progress` output into `current`.
pub(crate) fn parse_progress_line(line: &str, current: &mut FfmpegProgress) -> ProgressLine {
    let Some((key, value)) = line.trim().split_once('=') else {
        return ProgressLine::Other;
    };

    match key {
        "out_time_us" | "out_time_ms" => {
            // FFmpeg reports both keys in microseconds
            if let Ok(us) = value.parse::<i64>() {
                current.out_time_ms = us / 1000;
            }
        }
        "frame" => {
            if let Ok(frame) = value.parse() {
                current.frame = frame;
            }
        }
        "fps" => {
            if let Ok(fps) = value.parse() {
                current.fps = fps;
            }
        }
        "speed" => {
            if let Some(speed) = value.strip_suffix('x').and_then(|s| s.trim().parse().ok()) {
                current.speed = speed;
            }
        }
        "progress" => {
            current.is_complete = value == "end";
            return ProgressLine::Snapshot(current.clone());
        }
        "bitrate" | "total_size" | "out_time" | "dup_frames" | "drop_frames" => {}
        k if k.starts_with("stream_") => {}
        _ => return ProgressLine::Other,
    }

    ProgressLine::Field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let progress = FfmpegProgress {
            out_time_ms: 5000,
            ..Default::default()
        };

        assert!((progress.percentage(10000) - 50.0).abs() < 0.01);
        assert!((progress.percentage(4000) - 100.0).abs() < 0.01);
        assert_eq!(progress.percentage(0), 0.0);
    }

    #[test]
    fn test_progress_parsing() {
        let mut progress = FfmpegProgress::default();

        assert_eq!(parse_progress_line("out_time_us=5000000", &mut progress), ProgressLine::Field);
        assert_eq!(progress.out_time_ms, 5000);

        parse_progress_line("frame=150", &mut progress);
        parse_progress_line("speed=1.5x", &mut progress);
        assert_eq!(progress.frame, 150);
        assert!((progress.speed - 1.5).abs() < 0.01);

        // N/A leaves the previous value alone
        parse_progress_line("speed=N/A", &mut progress);
        assert!((progress.speed - 1.5).abs() < 0.01);

        match parse_progress_line("progress=end", &mut progress) {
            ProgressLine::Snapshot(snap) => assert!(snap.is_complete),
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_diagnostic_lines_are_not_progress() {
        let mut progress = FfmpegProgress::default();
        assert_eq!(
            parse_progress_line("tmp.mp4: Invalid data found when processing input", &mut progress),
            ProgressLine::Other
        );
        assert_eq!(
            parse_progress_line("[libx264 @ 0x55] width not divisible by 2 (1081x1920)", &mut progress),
            ProgressLine::Other
        );
    }
}
