use std::borrow::Cow;

use duration_macro::duration;
use indicatif::{ProgressBar, ProgressStyle};

/// A steadily ticking spinner for requests that may take minutes.
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();

    bar.set_message(message);

    bar.set_style(
        ProgressStyle::with_template("{spinner:^9.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    bar.enable_steady_tick(duration!(100 ms));

    bar
}
