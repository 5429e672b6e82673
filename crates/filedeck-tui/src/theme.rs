//! Color theme for the TUI.

use ratatui::style::palette::tailwind::{AMBER, BLUE, GREEN, RED, SLATE, YELLOW};
use ratatui::style::{Color, Modifier, Style};

/// Semantic styles used by the widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    /// Row under the cursor.
    pub selected: Style,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    pub column_header: Style,
    pub directory: Style,
    pub file: Style,
    /// Entries on the clipboard waiting to be moved.
    pub cut: Style,
    pub marked: Style,

    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Slate-based dark theme.
    pub fn dark() -> Self {
        let bold = Modifier::BOLD;
        Self {
            background: SLATE.c900,
            foreground: SLATE.c100,
            muted: SLATE.c500,

            selected: Style::new().bg(SLATE.c700).fg(SLATE.c50).add_modifier(bold),

            success: GREEN.c500,
            warning: YELLOW.c500,
            error: RED.c500,
            info: BLUE.c400,

            border: Style::new().fg(SLATE.c600),
            title: Style::new().fg(BLUE.c400).add_modifier(bold),
            help_key: Style::new().fg(BLUE.c400).add_modifier(bold),
            help_desc: Style::new().fg(SLATE.c400),

            column_header: Style::new().fg(SLATE.c400).add_modifier(bold),
            directory: Style::new().fg(BLUE.c500).add_modifier(bold),
            file: Style::new().fg(SLATE.c300),
            cut: Style::new().fg(SLATE.c500).add_modifier(Modifier::ITALIC),
            marked: Style::new().fg(AMBER.c500).add_modifier(bold),

            header: Style::new().bg(SLATE.c800).fg(SLATE.c100),
            footer: Style::new().bg(SLATE.c800).fg(SLATE.c400),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
