//! # Run Timer Module / 运行计时器模块
//!
//! Measures a whole run. The monotonic clock gives the elapsed time; the
//! wall-clock start is only shown in the start line.
//!
//! 测量整个运行过程。单调时钟给出耗时；挂钟开始时间仅显示在开始行中。

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// A started timer. `stop` consumes it, so a timer can only be stopped once.
#[derive(Debug)]
pub struct RunTimer {
    label: String,
    started: Instant,
    started_at: DateTime<Local>,
}

impl RunTimer {
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Local time the timer was started, for display.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn stop(self) -> Duration {
        self.started.elapsed()
    }
}

/// Formats a duration the way the run timer reports it, e.g. `2m 5s` or `4.21s`.
/// 按运行计时器的方式格式化时长，例如 `2m 5s` 或 `4.21s`。
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}
