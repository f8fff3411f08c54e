use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Batch progress over input lines. Interactive runs get a spinner bar on
/// stderr; quiet or piped runs get nothing. Per-molecule stdout printing is
/// routed through [`BatchProgress::run`] so the bar is not clobbered.
pub enum BatchProgress {
    Interactive(ProgressBar),
    Silent,
}

impl BatchProgress {
    pub fn new(interactive: bool, total: u64) -> Self {
        if !interactive {
            return Self::Silent;
        }
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Self::Interactive(bar)
    }

    pub fn advance(&self, message: &str) {
        if let Self::Interactive(bar) = self {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Interactive(bar) => bar.suspend(f),
            Self::Silent => f(),
        }
    }

    pub fn finish(&self) {
        if let Self::Interactive(bar) = self {
            bar.finish_and_clear();
        }
    }
}
