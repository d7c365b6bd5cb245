//! Progress reporting for board requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pybo_application::ProgressNotifier;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Shows a spinner on stderr while a request is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_request_start(&self, label: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(Duration::from_millis(80));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_request_complete(&self, label: &str, success: bool) {
        let pb = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pb) = pb {
            if success {
                pb.finish_and_clear();
            } else {
                pb.finish_with_message(format!("{} {} failed", "x".red(), label));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_clears_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_request_start("Loading question");
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_request_complete("Loading question", true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_complete_without_start_is_noop() {
        let reporter = ProgressReporter::new();
        reporter.on_request_complete("Voting", false);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
