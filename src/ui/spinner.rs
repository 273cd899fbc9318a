use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Animated status line on stderr, shown while a merge or translation runs.
///
/// The line is erased once the value goes out of scope.
pub struct Spinner {
    progress_bar: ProgressBar,
}

impl Spinner {
    /// Starts ticking immediately with `message` as the status text.
    #[allow(clippy::unwrap_used)]
    pub fn new(message: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();
        // constant template, cannot fail to parse
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner} {msg}")
                .unwrap(),
        );
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    /// Replaces the status text, e.g. with the file currently being merged.
    pub fn set_message(&self, message: impl Into<String>) {
        self.progress_bar.set_message(message.into());
    }

    /// Erases the status line so a final message can be printed in its place.
    pub fn stop(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
