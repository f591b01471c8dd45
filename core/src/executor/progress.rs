use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Progress bars for a batch: one overall bar plus a spinner per in-flight job.
pub struct ProgressMonitor {
    multi: MultiProgress,
    overall: ProgressBar,
    // task id -> (spinner, label)
    in_flight: HashMap<String, (ProgressBar, String)>,
    failed: usize,
    enabled: bool,
}

impl ProgressMonitor {
    /// `enabled = false` gives a monitor whose methods are no-ops.
    pub fn new(total_jobs: usize, enabled: bool) -> Self {
        let multi = MultiProgress::new();
        let overall = if enabled {
            let bar = multi.add(ProgressBar::new(total_jobs as u64));
            bar.set_style(overall_style());
            bar
        } else {
            ProgressBar::hidden()
        };

        let monitor = Self {
            multi,
            overall,
            in_flight: HashMap::new(),
            failed: 0,
            enabled,
        };
        monitor.refresh_message();
        monitor
    }

    pub fn add_task(&mut self, task_id: &str, label: &str) {
        if !self.enabled {
            return;
        }

        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(spinner_style());
        spinner.set_message(format!("⏳ {label}"));
        spinner.enable_steady_tick(Duration::from_millis(100));

        self.in_flight
            .insert(task_id.to_string(), (spinner, label.to_string()));
        self.refresh_message();
    }

    pub fn complete_task(&mut self, task_id: &str, success: bool, duration_ms: u64) {
        if !self.enabled {
            return;
        }

        if !success {
            self.failed += 1;
        }
        if let Some((spinner, label)) = self.in_flight.remove(task_id) {
            let icon = if success { "✅" } else { "❌" };
            spinner.finish_with_message(format!("{icon} {label} ({duration_ms}ms)"));
        }

        self.overall.inc(1);
        self.refresh_message();
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }

        let msg = match self.failed {
            0 => "✅ all files generated".to_string(),
            n => format!("⚠ {n} file(s) failed"),
        };
        self.overall.finish_with_message(msg);
    }

    fn refresh_message(&self) {
        if !self.enabled {
            return;
        }
        let running = self.in_flight.len();
        match self.failed {
            0 => self.overall.set_message(format!("{running} running")),
            n => self
                .overall
                .set_message(format!("{running} running, {n} failed")),
        }
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        for (_, (spinner, _)) in self.in_flight.drain() {
            spinner.finish_and_clear();
        }
    }
}

fn overall_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("  {spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_TICKS)
}
