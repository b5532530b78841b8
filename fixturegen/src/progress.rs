/// Per-case progress reporting
///
/// A bar is only drawn when progress is requested and stdout is a terminal;
/// otherwise every call is a no-op and output goes through `tracing` alone.

use crate::case::TestCase;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

pub struct CaseProgress {
    bar: Option<ProgressBar>,
}

impl CaseProgress {
    /// Progress that draws nothing
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn for_case(case: &TestCase, enabled: bool) -> Self {
        if !enabled || !io::stdout().is_terminal() {
            return Self::hidden();
        }

        let bar = ProgressBar::new(case.file_count);
        // Template is a constant; fall back to the default style rather than abort.
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.cyan} {msg} [{bar:30.cyan/bright.black}] {pos}/{len} {elapsed_precise} eta {eta}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#-");
        bar.set_style(style);
        bar.set_message(case.name.clone());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }

    /// Abandon the bar in place so the failure message lands below it
    pub fn abandon(&self) {
        if let Some(bar) = &self.bar {
            bar.abandon();
        }
    }
}

impl Drop for CaseProgress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}
