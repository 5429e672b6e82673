//! Modal dialog widgets.

use std::path::PathBuf;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use filedeck_core::ItemProperties;

use crate::app::input::InputState;
use crate::theme::Theme;
use crate::ui::popup_area;

/// Number of names listed in the delete confirmation before summarizing.
const DELETE_PREVIEW_LIMIT: usize = 5;

/// Names shown in the delete confirmation: at most five, then
/// `... and N more`.
pub fn delete_preview(paths: &[PathBuf]) -> Vec<String> {
    let mut lines: Vec<String> = paths
        .iter()
        .take(DELETE_PREVIEW_LIMIT)
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();
    if paths.len() > DELETE_PREVIEW_LIMIT {
        lines.push(format!("... and {} more", paths.len() - DELETE_PREVIEW_LIMIT));
    }
    lines
}

/// Draw a cleared, bordered popup and return its inner area.
pub(crate) fn popup_frame(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    color: Style,
    border: Style,
) -> Rect {
    Clear.render(area, buf);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(color.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Confirmation dialog for deletion.
pub struct DeleteConfirmModal<'a> {
    theme: &'a Theme,
    paths: &'a [PathBuf],
}

impl<'a> DeleteConfirmModal<'a> {
    pub fn new(theme: &'a Theme, paths: &'a [PathBuf]) -> Self {
        Self { theme, paths }
    }
}

impl Widget for DeleteConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let preview = delete_preview(self.paths);
        let popup = popup_area(area, 60, preview.len() as u16 + 7);
        let error = Style::default().fg(self.theme.error);
        let inner = popup_frame(popup, buf, "Confirm Delete", error, error);

        let question = if self.paths.len() == 1 {
            "Permanently delete this item?".to_string()
        } else {
            format!("Permanently delete these {} items?", self.paths.len())
        };
        let mut lines = vec![
            Line::styled(
                question,
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];
        lines.extend(preview.into_iter().map(|name| Line::raw(format!("  {name}"))));
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("y/Enter", self.theme.help_key),
            Span::styled(" delete   ", self.theme.help_desc),
            Span::styled("n/Esc", self.theme.help_key),
            Span::styled(" cancel", self.theme.help_desc),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Text prompt for rename, create, go-to and filter.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.input.error().is_some() { 8 } else { 7 };
        let popup = popup_area(area, 60, height);
        let inner = popup_frame(
            popup,
            buf,
            self.title,
            Style::default().fg(self.theme.info),
            self.theme.border,
        );

        // Scroll so the cursor stays visible
        let chars: Vec<char> = self.input.buffer().chars().collect();
        let cursor = self.input.cursor();
        let max_visible = (inner.width as usize).saturating_sub(4).max(1);
        let start = cursor.saturating_sub(max_visible - 1);
        let end = (start + max_visible).min(chars.len());

        let before: String = chars[start..cursor.min(end)].iter().collect();
        let at: String = chars.get(cursor).map_or(" ".to_string(), char::to_string);
        let after: String = chars
            .get(cursor + 1..end)
            .map(|rest| rest.iter().collect())
            .unwrap_or_default();

        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
        let mut lines = vec![
            Line::styled(self.prompt, self.theme.help_desc),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::raw(before),
                Span::styled(at, cursor_style),
                Span::raw(after),
            ]),
        ];
        if let Some(error) = self.input.error() {
            lines.push(Line::styled(error, Style::default().fg(self.theme.error)));
        }
        lines.push(Line::styled(
            "Enter confirm  Esc cancel",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Properties of a single item.
pub struct PropertiesModal<'a> {
    theme: &'a Theme,
    properties: &'a ItemProperties,
}

impl<'a> PropertiesModal<'a> {
    pub fn new(theme: &'a Theme, properties: &'a ItemProperties) -> Self {
        Self { theme, properties }
    }
}

impl Widget for PropertiesModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.properties.rows();
        let popup = popup_area(area, 70, rows.len() as u16 + 4);
        let inner = popup_frame(
            popup,
            buf,
            "Properties",
            Style::default().fg(self.theme.info),
            self.theme.border,
        );

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:>10}  "), self.theme.help_key),
                    Span::raw(value),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press any key to close",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Error dialog.
pub struct ErrorModal<'a> {
    theme: &'a Theme,
    message: &'a str,
}

impl<'a> ErrorModal<'a> {
    pub fn new(theme: &'a Theme, message: &'a str) -> Self {
        Self { theme, message }
    }
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.message.lines().count() as u16 + 5;
        let popup = popup_area(area, 70, height);
        let error = Style::default().fg(self.theme.error);
        let inner = popup_frame(popup, buf, "Error", error, error);

        let mut lines: Vec<Line> = self.message.lines().map(Line::raw).collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press any key to continue",
            Style::default().fg(self.theme.muted),
        ));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
