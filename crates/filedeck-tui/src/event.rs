//! Key bindings for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use filedeck_core::SortColumn;

/// Action bound to a key in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    /// Navigate into a folder or open a file with the default application.
    Open,
    GoUp,
    GoHome,
    GoBack,
    /// Prompt for a path to navigate to.
    GoTo,
    Refresh,

    ToggleMark,
    SelectAll,

    Copy,
    Cut,
    Paste,

    /// Delete marked or current items.
    Delete,
    Rename,
    CreateFile,
    CreateFolder,
    Properties,

    Filter,
    /// Sort by a column, flipping direction if it is already active.
    SortBy(SortColumn),
    CycleSort,
    ReverseSort,
    ToggleHidden,

    ToggleHelp,
    /// Clear marks, then the filter, then the status message.
    Cancel,
    Quit,
    None,
}

impl KeyAction {
    /// Map a key press to an action.
    ///
    /// Control and Alt chords are matched first. Plain keys ignore SHIFT,
    /// since terminals differ in whether they report it for uppercase
    /// letters and symbols.
    pub fn from_key_event(event: KeyEvent) -> Self {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => Self::Quit,
                KeyCode::Char('u') => Self::PageUp,
                KeyCode::Char('d') => Self::PageDown,
                KeyCode::Char('a') => Self::SelectAll,
                KeyCode::Char('l') => Self::GoTo,
                _ => Self::None,
            };
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            return match event.code {
                KeyCode::Left => Self::GoBack,
                _ => Self::None,
            };
        }

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => Self::MoveUp,
            KeyCode::Down | KeyCode::Char('j') => Self::MoveDown,
            KeyCode::Home | KeyCode::Char('g') => Self::JumpToTop,
            KeyCode::End | KeyCode::Char('G') => Self::JumpToBottom,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,

            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Self::Open,
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h' | '-') => Self::GoUp,
            KeyCode::Char('~') => Self::GoHome,
            KeyCode::Char('b') => Self::GoBack,
            KeyCode::Char(':') => Self::GoTo,
            KeyCode::F(5) | KeyCode::Char('R') => Self::Refresh,

            KeyCode::Char(' ') => Self::ToggleMark,
            KeyCode::Char('y') => Self::Copy,
            KeyCode::Char('x') => Self::Cut,
            KeyCode::Char('p') => Self::Paste,

            KeyCode::Delete | KeyCode::Char('d') => Self::Delete,
            KeyCode::F(2) | KeyCode::Char('r') => Self::Rename,
            KeyCode::Char('a') => Self::CreateFile,
            KeyCode::Char('A') => Self::CreateFolder,
            KeyCode::Char('i') => Self::Properties,

            KeyCode::Char('/') => Self::Filter,
            KeyCode::Char('1') => Self::SortBy(SortColumn::Name),
            KeyCode::Char('2') => Self::SortBy(SortColumn::Size),
            KeyCode::Char('3') => Self::SortBy(SortColumn::Type),
            KeyCode::Char('4') => Self::SortBy(SortColumn::Modified),
            KeyCode::Char('s') => Self::CycleSort,
            KeyCode::Char('S') => Self::ReverseSort,
            KeyCode::Char('.') => Self::ToggleHidden,

            KeyCode::F(1) | KeyCode::Char('?') => Self::ToggleHelp,
            KeyCode::Esc => Self::Cancel,
            KeyCode::Char('q') => Self::Quit,
            _ => Self::None,
        }
    }
}

/// Help overlay contents: section title and `(keys, description)` rows.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k ↑/↓", "Move up/down"),
            ("Enter/l", "Open folder or file"),
            ("Bksp/h/-", "Parent directory"),
            ("b Alt-←", "Back"),
            ("~", "Home directory"),
            (": Ctrl-l", "Go to path"),
            ("g/G", "Jump to top/bottom"),
            ("Ctrl-u/d", "Page up/down"),
            ("R F5", "Refresh"),
        ],
    ),
    (
        "Selection & Clipboard",
        &[
            ("Space", "Mark item"),
            ("Ctrl-a", "Select all"),
            ("y", "Copy to clipboard"),
            ("x", "Cut to clipboard"),
            ("p", "Paste into directory"),
            ("Esc", "Clear marks/filter"),
        ],
    ),
    (
        "File Operations",
        &[
            ("d/Del", "Delete item(s)"),
            ("r F2", "Rename"),
            ("a", "New file"),
            ("A", "New folder"),
            ("i", "Properties"),
        ],
    ),
    (
        "Listing",
        &[
            ("/", "Filter by name or type"),
            ("1-4", "Sort by name/size/type/date"),
            ("s", "Next sort column"),
            ("S", "Reverse sort order"),
            (".", "Show/hide hidden files"),
        ],
    ),
    (
        "General",
        &[("? F1", "Show this help"), ("q Ctrl-c", "Quit")],
    ),
];
