//! Styles for note output
//!
//! Notes and confirmations go to stdout, failures to stderr, and each stream
//! decides on color separately (console honours `NO_COLOR`/`CLICOLOR` and
//! falls back to plain text when the stream is not a terminal).

use owo_colors::Style;
use std::sync::OnceLock;

static STDOUT_THEME: OnceLock<Theme> = OnceLock::new();
static STDERR_THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// "Note added:" and the version banner title
    pub title: Style,
    /// Confirmation after a note is deleted
    pub confirm: Style,
    pub failure: Style,
    pub note_id: Style,
    pub stamp: Style,
    /// Secondary text such as the empty-window line
    pub quiet: Style,
}

impl Theme {
    pub fn with_color(enabled: bool) -> Self {
        if !enabled {
            return Self::plain();
        }

        Self {
            title: Style::new().cyan().bold(),
            confirm: Style::new().green(),
            failure: Style::new().red().bold(),
            note_id: Style::new().yellow().bold(),
            stamp: Style::new().blue(),
            quiet: Style::new().bright_black().italic(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            title: none,
            confirm: none,
            failure: none,
            note_id: none,
            stamp: none,
            quiet: none,
        }
    }
}

/// Theme for stdout
pub fn theme() -> &'static Theme {
    STDOUT_THEME.get_or_init(|| Theme::with_color(console::colors_enabled()))
}

/// Theme for stderr
pub fn error_theme() -> &'static Theme {
    STDERR_THEME.get_or_init(|| Theme::with_color(console::colors_enabled_stderr()))
}
