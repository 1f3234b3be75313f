use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    pipeline::{PipelineError, Reporter, RunResult},
    warning,
};

const PROGRESS_STEPS: u64 = 1000;

/// Shows pipeline progress on the terminal with a progress bar.
///
/// Per-artist warnings are printed above the bar so they stay visible
/// after the bar is cleared.
pub struct ConsoleReporter {
    pb: ProgressBar,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let pb = ProgressBar::new(PROGRESS_STEPS);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {percent:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .progress_chars("=> "),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn on_status(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_warning(&self, artist: &str, message: &str) {
        self.pb.suspend(|| warning!("{}: {}", artist, message));
    }

    fn on_progress(&self, fraction: f64) {
        let position = (fraction.clamp(0.0, 1.0) * PROGRESS_STEPS as f64).round() as u64;
        self.pb.set_position(position);
    }

    fn on_final_result(&self, _result: &Result<RunResult, PipelineError>) {
        self.pb.finish_and_clear();
    }
}
