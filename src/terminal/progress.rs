//! Spinners for the stages of an export run.

use std::fmt::Display;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ports::terminal::ProgressReporter;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed}]";

fn spinner(message: &str, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if visible {
        pb.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
    } else {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_message(message.to_string());
    pb
}

/// A single step of the run, shown as a spinner until it succeeds or fails.
pub struct Stage {
    title: String,
    visible: bool,
    bar: Mutex<ProgressBar>,
}

impl Stage {
    pub fn start(title: impl Into<String>) -> Self {
        Self::with_visibility(title.into(), true)
    }

    /// A stage that never draws anything.
    #[cfg(test)]
    pub fn hidden(title: impl Into<String>) -> Self {
        Self::with_visibility(title.into(), false)
    }

    fn with_visibility(title: String, visible: bool) -> Self {
        tracing::debug!("Stage started: {}", title);
        let bar = spinner(&title, visible);
        Self {
            title,
            visible,
            bar: Mutex::new(bar),
        }
    }

    fn bar(&self) -> ProgressBar {
        match self.bar.lock() {
            Ok(bar) => bar.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Bring a paused spinner back.
    fn resume(&self) -> ProgressBar {
        let mut bar = match self.bar.lock() {
            Ok(bar) => bar,
            Err(poisoned) => poisoned.into_inner(),
        };
        if bar.is_finished() {
            *bar = spinner(&self.title, self.visible);
        }
        bar.clone()
    }

    fn finish_with(&self, symbol: &'static str, color: &str, message: String) {
        let bar = self.resume();
        if self.visible {
            bar.set_style(
                ProgressStyle::with_template(&format!("{{prefix:.{}}} {{msg}}", color))
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
        }
        bar.set_prefix(symbol);
        bar.finish_with_message(message);
    }

    pub fn succeed(&self) {
        tracing::debug!("Stage succeeded: {}", self.title);
        self.finish_with("✔", "green", self.title.clone());
    }

    pub fn fail(&self, reason: &str) {
        tracing::error!("Stage '{}' failed: {}", self.title, reason);
        self.finish_with("✖", "red", reason.to_string());
    }

    /// Succeed or fail the stage from `result` and hand the result back.
    pub fn finish<T, E: Display>(&self, result: Result<T, E>) -> Result<T, E> {
        match &result {
            Ok(_) => self.succeed(),
            Err(e) => self.fail(&e.to_string()),
        }
        result
    }

    #[cfg(test)]
    pub fn message(&self) -> String {
        self.bar().message()
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.bar().is_finished()
    }
}

impl ProgressReporter for Stage {
    fn report(&self, message: &str) {
        self.resume().set_message(message.to_string());
    }

    /// Clear the spinner line so a prompt can use the terminal.
    fn pause(&self) {
        self.bar().finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_updates_message() {
        let stage = Stage::hidden("Fetching YouTube Tracks");
        assert_eq!(stage.message(), "Fetching YouTube Tracks");

        stage.report("Fetching YouTube Tracks for Mix: 1/3");
        assert_eq!(stage.message(), "Fetching YouTube Tracks for Mix: 1/3");
    }

    #[test]
    fn test_report_after_pause_resumes() {
        let stage = Stage::hidden("Fetching YouTube Tracks");
        stage.pause();
        assert!(stage.is_finished());

        stage.report("Fetching YouTube Tracks for B: 0/2");
        assert!(!stage.is_finished());
        assert_eq!(stage.message(), "Fetching YouTube Tracks for B: 0/2");
    }

    #[test]
    fn test_finish_passes_result_through() {
        let stage = Stage::hidden("Fetching Spotify Playlists");
        let result: Result<u32, String> = stage.finish(Ok(3));
        assert_eq!(result, Ok(3));
        assert!(stage.is_finished());
        assert_eq!(stage.message(), "Fetching Spotify Playlists");

        let stage = Stage::hidden("Initializing APIs");
        let result: Result<(), String> = stage.finish(Err("invalid_grant".to_string()));
        assert!(result.is_err());
        assert_eq!(stage.message(), "invalid_grant");
    }

    #[test]
    fn test_failure_after_pause_is_shown() {
        let stage = Stage::hidden("Choosing playlists");
        stage.pause();

        let result: Result<(), String> = stage.finish(Err("Selection was cancelled".into()));
        assert!(result.is_err());
        assert!(stage.is_finished());
        assert_eq!(stage.message(), "Selection was cancelled");
    }
}
