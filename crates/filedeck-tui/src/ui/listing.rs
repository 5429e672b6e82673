//! Directory listing table.

use std::collections::HashSet;
use std::path::PathBuf;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget};
use strum::IntoEnumIterator;

use filedeck_core::{
    ClipboardState, DirectoryEntry, SortColumn, SortState, format_datetime, format_optional_size,
};

use crate::theme::Theme;

/// Table of the (filtered) entries of the current directory.
pub struct ListingView<'a> {
    theme: &'a Theme,
    entries: &'a [&'a DirectoryEntry],
    sort: SortState,
    marked: &'a HashSet<PathBuf>,
    clipboard: &'a ClipboardState,
}

impl<'a> ListingView<'a> {
    pub fn new(
        theme: &'a Theme,
        entries: &'a [&'a DirectoryEntry],
        sort: SortState,
        marked: &'a HashSet<PathBuf>,
        clipboard: &'a ClipboardState,
    ) -> Self {
        Self {
            theme,
            entries,
            sort,
            marked,
            clipboard,
        }
    }

    fn row(&self, entry: &DirectoryEntry) -> Row<'a> {
        let marked = self.marked.contains(&entry.path);
        let style = if marked {
            self.theme.marked
        } else if self.clipboard.is_cut(&entry.path) {
            self.theme.cut
        } else if entry.is_folder() {
            self.theme.directory
        } else {
            self.theme.file
        };

        let marker = if marked { "● " } else { "  " };
        let name = if entry.is_folder() {
            format!("{marker}{}/", entry.name)
        } else {
            format!("{marker}{}", entry.name)
        };

        Row::new([
            Cell::from(name),
            Cell::from(Line::from(format_optional_size(entry.size)).right_aligned()),
            Cell::from(entry.type_label()),
            Cell::from(format_datetime(entry.modified.as_ref())),
        ])
        .style(style)
    }
}

impl StatefulWidget for ListingView<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(self.theme.border);

        if self.entries.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("  This folder is empty")
                .style(Style::default().fg(self.theme.muted))
                .render(inner, buf);
            return;
        }

        let header = Row::new(SortColumn::iter().map(|column| Cell::from(self.sort.header(column))))
            .style(self.theme.column_header);
        let rows: Vec<Row> = self.entries.iter().map(|entry| self.row(entry)).collect();
        let widths = [
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2)
            .row_highlight_style(self.theme.selected)
            .highlight_symbol("▌");

        StatefulWidget::render(table, area, buf, state);
    }
}
