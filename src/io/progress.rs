//! Progress display for batches of levels, with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for batch operations
///
/// Shows one bar per level for small batches and adds a single batch bar
/// for large ones, keeping only the most recent levels on screen.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    level_bars: Vec<ProgressBar>,
    /// Stores (`name`, `status`, `done`) for rolling window display
    level_states: Vec<(String, String, bool)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static LEVEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:<24} [{bar:10.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Levels: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            level_bars: Vec::new(),
            level_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on level count
    pub fn initialize(&mut self, level_count: usize) {
        // Switch to batch mode for large sets to avoid terminal spam
        if level_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(level_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..level_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(1);
            bar.set_style(LEVEL_STYLE.clone());
            self.level_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Show a level as in progress
    pub fn start_level(&mut self, index: usize, name: &str, status: &str) {
        if index >= self.level_states.len() {
            self.level_states
                .resize(index + 1, (String::new(), String::new(), false));
        }
        if let Some(state) = self.level_states.get_mut(index) {
            *state = (name.to_string(), status.to_string(), false);
        }
        self.update_bars();
    }

    /// Mark a level as finished with a short verdict
    pub fn complete_level(&mut self, index: usize, verdict: &str, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.level_states.get_mut(index) {
            state.1 = format!("{verdict} ({:.2}s)", elapsed.as_secs_f64());
            state.2 = true;
        }
        self.update_bars();
    }

    /// Run `print` with the bars hidden so its output does not tear them
    pub fn suspend<F: FnOnce()>(&self, print: F) {
        self.multi_progress.suspend(print);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All levels processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N started levels
    fn update_bars(&self) {
        let started: Vec<&(String, String, bool)> = self
            .level_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, status, done)) in visible.iter().enumerate() {
            if let Some(bar) = self.level_bars.get(bar_idx) {
                bar.set_position(u64::from(*done));
                bar.set_prefix(if *done {
                    format!("✓ {name}")
                } else {
                    name.clone()
                });
                bar.set_message(status.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible.len()..self.level_bars.len() {
            if let Some(bar) = self.level_bars.get(bar_idx) {
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
