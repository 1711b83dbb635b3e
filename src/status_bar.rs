//! Status line under the test page: countdown, answered count and total elapsed time

use crate::config::StatusStyleConfig;
use crate::scoring::format_time;
use crate::view::Progress;
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Seconds left at which the countdown turns red
const LOW_TIME_SECS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusDisplayStyle {
    /// Use emojis and symbols
    Emoji,
    /// Use text labels
    Text,
}

impl StatusDisplayStyle {
    pub fn next(&self) -> Self {
        match self {
            StatusDisplayStyle::Emoji => StatusDisplayStyle::Text,
            StatusDisplayStyle::Text => StatusDisplayStyle::Emoji,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusDisplayStyle::Emoji => "Emoji",
            StatusDisplayStyle::Text => "Text",
        }
    }
}

impl From<StatusStyleConfig> for StatusDisplayStyle {
    fn from(style: StatusStyleConfig) -> Self {
        match style {
            StatusStyleConfig::Emoji => StatusDisplayStyle::Emoji,
            StatusStyleConfig::Text => StatusDisplayStyle::Text,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StatusBarState {
    pub progress: Progress,
    pub notes_focused: bool,
    pub spin_frame: usize,
    pub display_style: StatusDisplayStyle,
}

impl StatusBarState {
    pub fn new(display_style: StatusDisplayStyle) -> Self {
        Self {
            progress: Progress {
                remaining: 0,
                elapsed: 0,
                answered: 0,
                total: 0,
            },
            notes_focused: false,
            spin_frame: 0,
            display_style,
        }
    }

    pub fn update_spinner(&mut self) {
        self.spin_frame = self.spin_frame.wrapping_add(1);
    }

    pub fn toggle_display_style(&mut self) {
        self.display_style = self.display_style.next();
    }

    fn countdown_color(&self) -> &'static str {
        if self.progress.is_expired() {
            "\x1b[90m"
        } else if self.progress.remaining <= LOW_TIME_SECS {
            "\x1b[91m"
        } else {
            "\x1b[93m"
        }
    }

    /// Plain status text, no colour codes
    pub fn content(&self) -> String {
        let p = &self.progress;
        match self.display_style {
            StatusDisplayStyle::Emoji => {
                let spinner = if p.is_expired() {
                    "⌛"
                } else {
                    SPINNER[self.spin_frame % SPINNER.len()]
                };
                format!(
                    "{} {} │ ✅ {}/{} │ ⏱ {}{}",
                    spinner,
                    format_time(p.remaining),
                    p.answered,
                    p.total,
                    format_time(p.elapsed),
                    if self.notes_focused { " │ ✎ Notes" } else { "" }
                )
            }
            StatusDisplayStyle::Text => format!(
                " Time left: {} | Answered: {}/{} | Elapsed: {}{}",
                format_time(p.remaining),
                p.answered,
                p.total,
                format_time(p.elapsed),
                if self.notes_focused { " | [NOTES]" } else { "" }
            ),
        }
    }

    /// Coloured status line, centered when a terminal width is given
    pub fn render(&self, term_width: Option<usize>) -> String {
        let content = self.content();
        let padding = match term_width {
            Some(width) => width.saturating_sub(content.width()) / 2,
            None => 0,
        };
        format!(
            "{}{}{}\x1b[0m",
            " ".repeat(padding),
            self.countdown_color(),
            content
        )
    }
}
