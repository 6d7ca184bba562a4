//! Progress bars for the fetch loops.

use indicatif::{ProgressBar, ProgressStyle};

/// A bar for a fetch loop over a known number of items.
pub fn fetch_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{msg:24} [{bar:40}] {pos}/{len}")
            .expect("static progress template")
            .progress_chars("=> "),
    );
    bar.set_message(message);
    bar
}

/// A spinner for a fetch loop whose length is not yet known; callers upgrade
/// it with [`set_known_length`] once the remote reports a total.
pub fn fetch_spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar
}

/// Turn a spinner into a regular bar once the total is known.
pub fn set_known_length(bar: &ProgressBar, len: u64) {
    bar.set_style(
        ProgressStyle::with_template("{msg:24} [{bar:40}] {pos}/{len}")
            .expect("static progress template")
            .progress_chars("=> "),
    );
    bar.set_length(len);
}
