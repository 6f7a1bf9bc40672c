//! Terminal progress bar.

use apidoc_site::ProgressSink;
use console::{Style, Term};

const WIDTH: usize = 40;

/// Draws `[=====>    ]  42%` on stderr, redrawing the same line.
pub(crate) struct ProgressBar {
    term: Term,
    style: Style,
    last_percent: Option<usize>,
}

impl ProgressBar {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            style: Style::new().cyan(),
            last_percent: None,
        }
    }
}

/// Render the bar text for `current` of `total`.
fn render(current: usize, total: usize) -> (String, usize) {
    let percent = if total == 0 {
        100
    } else {
        current.min(total) * 100 / total
    };
    let filled = percent * WIDTH / 100;
    let bar = if filled >= WIDTH {
        "=".repeat(WIDTH)
    } else {
        format!("{}>{}", "=".repeat(filled), " ".repeat(WIDTH - filled - 1))
    };
    (format!("[{bar}] {percent:>3}%"), percent)
}

impl ProgressSink for ProgressBar {
    fn update(&mut self, current: usize, total: usize) {
        let (line, percent) = render(current, total);
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&self.style.apply_to(line).to_string());
    }

    fn finish(&mut self) {
        let _ = self.term.write_line("");
    }
}
