//! Main application state and logic.

pub mod input;
mod render;
pub mod state;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use itertools::Itertools;
use ratatui::widgets::TableState;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, warn};

use filedeck_core::{
    Config, DirectoryEntry, DirectoryListing, Session, SortState, filter_entries,
    validate_filename,
};
use filedeck_ops::{FileService, OperationOutcome};

use crate::event::KeyAction;
use crate::theme::Theme;

use self::input::{InputResult, InputState};
use self::state::{AppMode, PAGE_SIZE, Pending, StatusMessage};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    service: FileService,
    /// Current directory, history and clipboard.
    session: Session,
    /// Last listing of the current directory, sorted by `sort`.
    listing: DirectoryListing,
    /// Cursor index into the filtered listing.
    selected: usize,
    table_state: TableState,
    /// Paths marked for multi-item operations.
    marked: HashSet<PathBuf>,
    sort: SortState,
    filter: String,
    mode: AppMode,
    input: InputState,
    pending: Pending,
    confirm_delete: bool,
    message: Option<StatusMessage>,
    theme: Theme,
    needs_redraw: bool,
}

impl App {
    /// Create the application and list `path`.
    pub fn new(path: PathBuf, config: &Config) -> Self {
        let start = path.canonicalize().unwrap_or(path);
        let mut app = Self {
            service: FileService::new(config),
            session: Session::new(start.clone()),
            listing: DirectoryListing::new(start, Vec::new()),
            selected: 0,
            table_state: TableState::default(),
            marked: HashSet::new(),
            sort: SortState::default(),
            filter: String::new(),
            mode: AppMode::default(),
            input: InputState::new(),
            pending: Pending::None,
            confirm_delete: config.confirm_delete,
            message: None,
            theme: Theme::default(),
            needs_redraw: true,
        };
        app.load(None);
        app
    }

    /// Run the event loop until the user quits.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            match events.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key);
                    self.needs_redraw = true;
                }
                Some(Ok(Event::Resize(..))) => self.needs_redraw = true,
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        render::render_app(self, frame);
    }

    /// Entries shown after filtering.
    fn visible(&self) -> Vec<&DirectoryEntry> {
        filter_entries(&self.listing.entries, &self.filter)
    }

    fn current_entry(&self) -> Option<&DirectoryEntry> {
        self.visible().get(self.selected).copied()
    }

    /// Marked paths in listing order, or the entry under the cursor.
    fn targets(&self) -> Vec<PathBuf> {
        if self.marked.is_empty() {
            return self
                .current_entry()
                .map(|e| vec![e.path.clone()])
                .unwrap_or_default();
        }
        self.listing
            .entries
            .iter()
            .filter(|e| self.marked.contains(&e.path))
            .map(|e| e.path.clone())
            .collect()
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "showing error");
        self.pending = Pending::Error(message);
        self.mode = AppMode::Error;
    }

    fn info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::info(text));
    }

    fn failure(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage::failure(text));
    }

    // ---- listing ----

    /// Re-list the current directory, keeping the cursor on the same item.
    fn reload(&mut self) {
        let focus = self.current_entry().map(|e| e.path.clone());
        self.load(focus.as_deref());
    }

    fn load(&mut self, focus: Option<&Path>) {
        match self.service.list(self.session.current_dir()) {
            Ok(mut listing) => {
                self.sort.apply(&mut listing.entries);
                self.marked
                    .retain(|p| listing.entries.iter().any(|e| &e.path == p));
                self.listing = listing;
            }
            Err(err) => {
                warn!(dir = %self.session.current_dir().display(), error = %err, "listing failed");
                self.listing =
                    DirectoryListing::new(self.session.current_dir().to_path_buf(), Vec::new());
                self.show_error(err.to_string());
            }
        }
        self.focus(focus);
    }

    fn focus(&mut self, path: Option<&Path>) {
        if let Some(index) = path.and_then(|p| self.visible().iter().position(|e| e.path == p)) {
            self.selected = index;
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn resort(&mut self) {
        let focus = self.current_entry().map(|e| e.path.clone());
        self.sort.apply(&mut self.listing.entries);
        self.focus(focus.as_deref());
    }

    // ---- navigation ----

    /// Reset per-directory state after the current directory changed.
    fn entered(&mut self, focus: Option<&Path>) {
        self.filter.clear();
        self.marked.clear();
        self.selected = 0;
        debug!(dir = %self.session.current_dir().display(), "entered directory");
        self.load(focus);
    }

    fn navigate_to(&mut self, target: &Path) {
        match self.session.navigate(target).map(|_| ()) {
            Ok(()) => self.entered(None),
            Err(err) => self.show_error(err.to_string()),
        }
    }

    fn open_selected(&mut self) {
        let Some((path, name, is_folder)) = self
            .current_entry()
            .map(|e| (e.path.clone(), e.name.to_string(), e.is_folder()))
        else {
            return;
        };
        if is_folder {
            self.navigate_to(&path);
            return;
        }
        match self.service.open_with_default_app(&path) {
            Ok(()) => self.info(format!("Opened {name}")),
            Err(err) => self.show_error(err.to_string()),
        }
    }

    fn go_up(&mut self) {
        let from = self.session.current_dir().to_path_buf();
        match self.session.go_up() {
            Ok(true) => self.entered(Some(&from)),
            Ok(false) => self.info("Already at the filesystem root"),
            Err(err) => self.show_error(err.to_string()),
        }
    }

    fn go_back(&mut self) {
        if self.session.go_back() {
            self.entered(None);
        } else {
            self.info("No previous directory");
        }
    }

    fn go_home(&mut self) {
        match dirs::home_dir() {
            Some(home) => self.navigate_to(&home),
            None => self.show_error("Home directory not found"),
        }
    }

    // ---- selection ----

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    fn toggle_mark(&mut self) {
        if let Some(path) = self.current_entry().map(|e| e.path.clone()) {
            if !self.marked.remove(&path) {
                self.marked.insert(path);
            }
            self.move_cursor(1);
        }
    }

    fn select_all(&mut self) {
        let visible: Vec<PathBuf> = self.visible().iter().map(|e| e.path.clone()).collect();
        if visible.iter().all(|p| self.marked.contains(p)) {
            self.marked.clear();
        } else {
            self.marked.extend(visible);
        }
    }

    // ---- clipboard ----

    fn fill_clipboard(&mut self, cut: bool) {
        let targets = self.targets();
        if targets.is_empty() {
            self.info("Nothing selected");
            return;
        }
        let count = targets.len();
        if cut {
            self.session.clipboard.cut(targets);
            self.info(format!("Cut {count} item(s)"));
        } else {
            self.session.clipboard.copy(targets);
            self.info(format!("Copied {count} item(s)"));
        }
        self.marked.clear();
    }

    fn paste(&mut self) {
        if self.session.clipboard.is_empty() {
            self.info("Clipboard is empty");
            return;
        }
        let dest = self.session.current_dir().to_path_buf();
        match self.service.paste(&mut self.session.clipboard, &dest) {
            Ok(outcome) => {
                self.report(&outcome);
                self.load(outcome.created.last().map(PathBuf::as_path));
            }
            Err(err) => self.show_error(err.to_string()),
        }
    }

    /// Status message on success, error dialog listing failures otherwise.
    fn report(&mut self, outcome: &OperationOutcome) {
        if outcome.is_success() {
            self.info(outcome.summary());
        } else {
            let details = outcome.errors.iter().join("\n");
            self.show_error(format!("{}\n\n{details}", outcome.summary()));
        }
    }

    // ---- file operations ----

    fn request_delete(&mut self) {
        let targets = self.targets();
        if targets.is_empty() {
            return;
        }
        if self.confirm_delete {
            self.pending = Pending::Delete(targets);
            self.mode = AppMode::ConfirmDelete;
        } else {
            self.delete_paths(&targets);
        }
    }

    fn delete_paths(&mut self, paths: &[PathBuf]) {
        let outcome = self.service.delete_many(paths);
        self.marked.clear();
        self.report(&outcome);
        self.reload();
    }

    fn request_rename(&mut self) {
        let mut targets = self.targets();
        if targets.len() != 1 {
            self.failure("Select exactly one item to rename");
            return;
        }
        let path = targets.remove(0);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.input = InputState::with_initial(&name);
        self.pending = Pending::Rename(path);
        self.mode = AppMode::Renaming;
    }

    fn show_properties(&mut self) {
        let targets = self.targets();
        let [path] = targets.as_slice() else {
            self.failure("Select exactly one item to view properties");
            return;
        };
        match self.service.properties(path) {
            Ok(properties) => {
                self.pending = Pending::Properties(Box::new(properties));
                self.mode = AppMode::Properties;
            }
            Err(err) => self.show_error(err.to_string()),
        }
    }

    fn open_prompt(&mut self, mode: AppMode, initial: &str) {
        self.input = InputState::with_initial(initial);
        self.mode = mode;
    }

    fn close_prompt(&mut self) {
        self.input = InputState::new();
        self.pending = Pending::None;
        self.mode = AppMode::Normal;
    }

    // ---- key handling ----

    /// Dispatch a key press according to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.mode = AppMode::Quit;
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_action(KeyAction::from_key_event(key)),
            AppMode::ConfirmDelete => self.handle_confirm_key(key),
            AppMode::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
                ) {
                    self.mode = AppMode::Normal;
                }
            }
            AppMode::Properties | AppMode::Error => {
                self.pending = Pending::None;
                self.mode = AppMode::Normal;
            }
            AppMode::Quit => {}
            mode if mode.is_input() => self.handle_input_key(key),
            _ => {}
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.move_cursor(-1),
            KeyAction::MoveDown => self.move_cursor(1),
            KeyAction::JumpToTop => self.selected = 0,
            KeyAction::JumpToBottom => self.selected = self.visible().len().saturating_sub(1),
            KeyAction::PageUp => self.move_cursor(-(PAGE_SIZE as isize)),
            KeyAction::PageDown => self.move_cursor(PAGE_SIZE as isize),

            KeyAction::Open => self.open_selected(),
            KeyAction::GoUp => self.go_up(),
            KeyAction::GoHome => self.go_home(),
            KeyAction::GoBack => self.go_back(),
            KeyAction::GoTo => {
                let current = self.session.current_dir().display().to_string();
                self.open_prompt(AppMode::GoingTo, &current);
            }
            KeyAction::Refresh => {
                self.reload();
                self.info("Refreshed");
            }

            KeyAction::ToggleMark => self.toggle_mark(),
            KeyAction::SelectAll => self.select_all(),

            KeyAction::Copy => self.fill_clipboard(false),
            KeyAction::Cut => self.fill_clipboard(true),
            KeyAction::Paste => self.paste(),

            KeyAction::Delete => self.request_delete(),
            KeyAction::Rename => self.request_rename(),
            KeyAction::CreateFile => self.open_prompt(AppMode::CreatingFile, ""),
            KeyAction::CreateFolder => self.open_prompt(AppMode::CreatingFolder, ""),
            KeyAction::Properties => self.show_properties(),

            KeyAction::Filter => {
                let current = self.filter.clone();
                self.open_prompt(AppMode::Filtering, &current);
            }
            KeyAction::SortBy(column) => {
                self.sort.toggle(column);
                self.resort();
            }
            KeyAction::CycleSort => {
                self.sort.toggle(self.sort.column.next());
                self.resort();
            }
            KeyAction::ReverseSort => {
                self.sort.order = self.sort.order.reverse();
                self.resort();
            }
            KeyAction::ToggleHidden => {
                let show = !self.service.show_hidden();
                self.service.set_show_hidden(show);
                self.reload();
                self.info(if show {
                    "Showing hidden files"
                } else {
                    "Hiding hidden files"
                });
            }

            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::Cancel => {
                if !self.marked.is_empty() {
                    self.marked.clear();
                } else if !self.filter.is_empty() {
                    self.filter.clear();
                    self.clamp_selection();
                } else {
                    self.message = None;
                }
            }

            KeyAction::Quit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let pending = std::mem::take(&mut self.pending);
                self.mode = AppMode::Normal;
                if let Pending::Delete(paths) = pending {
                    self.delete_paths(&paths);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                self.pending = Pending::None;
                self.mode = AppMode::Normal;
                self.info("Delete cancelled");
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match self.input.handle_key(key) {
            InputResult::Continue => {}
            InputResult::Changed => {
                if self.mode == AppMode::Filtering {
                    self.filter = self.input.buffer().to_string();
                    self.selected = 0;
                }
            }
            InputResult::Cancel => {
                if self.mode == AppMode::Filtering {
                    self.filter.clear();
                    self.clamp_selection();
                }
                self.close_prompt();
            }
            InputResult::Submit(value) => self.submit_input(value),
        }
    }

    fn submit_input(&mut self, value: String) {
        match self.mode {
            AppMode::Filtering => self.close_prompt(),
            AppMode::GoingTo => self.submit_go_to(&value),
            AppMode::Renaming => self.submit_rename(&value),
            AppMode::CreatingFile | AppMode::CreatingFolder => self.submit_create(&value),
            _ => {}
        }
    }

    fn submit_go_to(&mut self, value: &str) {
        let target = expand_home(value.trim());
        match self.session.navigate(&target).map(|_| ()) {
            Ok(()) => {
                self.close_prompt();
                self.entered(None);
            }
            Err(err) => self.input.set_error(err.to_string()),
        }
    }

    fn submit_rename(&mut self, value: &str) {
        if !self.input.has_changed() {
            self.close_prompt();
            return;
        }
        if let Err(reason) = validate_filename(value) {
            self.input.set_error(reason);
            return;
        }
        let Pending::Rename(source) = &self.pending else {
            self.close_prompt();
            return;
        };
        match self.service.rename(source, value) {
            Ok(renamed) => {
                self.close_prompt();
                self.marked.clear();
                self.info(format!("Renamed to {value}"));
                self.load(Some(&renamed));
            }
            Err(err) => self.input.set_error(err.to_string()),
        }
    }

    fn submit_create(&mut self, value: &str) {
        if let Err(reason) = validate_filename(value) {
            self.input.set_error(reason);
            return;
        }
        let path = self.session.current_dir().join(value);
        let folder = self.mode == AppMode::CreatingFolder;
        let result = if folder {
            self.service.create_folder(&path)
        } else {
            self.service.create_file(&path)
        };
        match result {
            Ok(()) => {
                self.close_prompt();
                self.info(format!(
                    "Created {} {value}",
                    if folder { "folder" } else { "file" }
                ));
                self.load(Some(&path));
            }
            Err(err) => self.input.set_error(err.to_string()),
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    match value.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => dirs::home_dir()
            .map(|home| home.join(rest.trim_start_matches('/')))
            .unwrap_or_else(|| PathBuf::from(value)),
        _ => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use filedeck_core::{SortColumn, SortOrder};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/readme.txt"), b"hello").unwrap();
        fs::write(root.join("big.bin"), vec![0u8; 4096]).unwrap();
        fs::write(root.join("notes.txt"), b"notes").unwrap();
        (dir, root)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.visible().iter().map(|e| e.name.to_string()).collect()
    }

    fn select(app: &mut App, name: &str) {
        app.selected = app
            .visible()
            .iter()
            .position(|e| e.name == name)
            .unwrap();
    }

    #[test]
    fn test_listing_puts_folders_first() {
        let (_dir, root) = fixture();
        let app = App::new(root, &Config::default());
        assert_eq!(names(&app), ["docs", "big.bin", "notes.txt"]);
    }

    #[test]
    fn test_open_folder_and_go_up_restores_cursor() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        select(&mut app, "docs");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.current_dir(), root.join("docs"));
        assert_eq!(names(&app), ["readme.txt"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.current_dir(), root);
        assert_eq!(app.current_entry().unwrap().name, "docs");

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.session.current_dir(), root.join("docs"));
    }

    #[test]
    fn test_go_to_missing_path_keeps_directory() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.mode, AppMode::GoingTo);
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut app, &root.join("missing").display().to_string());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::GoingTo);
        assert!(app.input.error().is_some());
        assert_eq!(app.session.current_dir(), root);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        select(&mut app, "docs");
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::ConfirmDelete);

        press(&mut app, KeyCode::Char('n'));
        assert!(root.join("docs").exists());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!root.join("docs").exists());
        assert_eq!(names(&app), ["big.bin", "notes.txt"]);
    }

    #[test]
    fn test_delete_without_confirmation() {
        let (_dir, root) = fixture();
        let config = Config::builder().confirm_delete(false).build().unwrap();
        let mut app = App::new(root.clone(), &config);

        select(&mut app, "notes.txt");
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!root.join("notes.txt").exists());
    }

    #[test]
    fn test_rename_needs_exactly_one_item() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.message.as_ref().unwrap().success);

        press(&mut app, KeyCode::Esc);
        select(&mut app, "notes.txt");
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.mode, AppMode::Renaming);
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut app, "big.bin");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Renaming);
        assert!(app.input.error().is_some());

        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut app, "todo.txt");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(root.join("todo.txt").exists());
        assert_eq!(app.current_entry().unwrap().name, "todo.txt");
    }

    #[test]
    fn test_copy_paste_in_same_directory_adds_suffix() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        select(&mut app, "notes.txt");
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Char('p'));

        assert_eq!(fs::read_to_string(root.join("notes (1).txt")).unwrap(), "notes");
        assert_eq!(app.current_entry().unwrap().name, "notes (1).txt");
        assert!(!app.session.clipboard.is_empty());
    }

    #[test]
    fn test_cut_paste_moves_and_clears_clipboard() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        select(&mut app, "notes.txt");
        press(&mut app, KeyCode::Char('x'));
        select(&mut app, "docs");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));

        assert!(root.join("docs/notes.txt").exists());
        assert!(!root.join("notes.txt").exists());
        assert!(app.session.clipboard.is_empty());
    }

    #[test]
    fn test_filter_narrows_and_escape_clears() {
        let (_dir, root) = fixture();
        let mut app = App::new(root, &Config::default());

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "TEXT");
        assert_eq!(names(&app), ["notes.txt"]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(names(&app), ["notes.txt"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(names(&app).len(), 3);
    }

    #[test]
    fn test_sort_by_size_toggles_direction() {
        let (_dir, root) = fixture();
        let mut app = App::new(root, &Config::default());

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.sort, SortState::new(SortColumn::Size, SortOrder::Ascending));
        assert_eq!(names(&app), ["docs", "notes.txt", "big.bin"]);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.sort.order, SortOrder::Descending);
        assert_eq!(names(&app), ["docs", "big.bin", "notes.txt"]);
    }

    #[test]
    fn test_create_folder_rejects_invalid_name() {
        let (_dir, root) = fixture();
        let mut app = App::new(root.clone(), &Config::default());

        app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(app.mode, AppMode::CreatingFolder);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input.error(), Some("Name is required"));

        type_text(&mut app, "photos");
        press(&mut app, KeyCode::Enter);
        assert!(root.join("photos").is_dir());
        assert_eq!(app.current_entry().unwrap().name, "photos");
    }

    #[test]
    fn test_properties_dialog() {
        let (_dir, root) = fixture();
        let mut app = App::new(root, &Config::default());

        select(&mut app, "big.bin");
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode, AppMode::Properties);
        match &app.pending {
            Pending::Properties(props) => assert_eq!(props.size_display(), "4.0 KB"),
            other => panic!("unexpected pending state: {other:?}"),
        }

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_render_shows_listing_and_status() {
        let (_dir, root) = fixture();
        let mut app = App::new(root, &Config::default());
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("notes.txt"));
        assert!(screen.contains("1 folders, 2 files"));
        assert!(screen.contains("Clipboard empty"));
    }
}
