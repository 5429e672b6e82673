//! Application rendering.

use filedeck_core::filter_entries;
use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::modals::{DeleteConfirmModal, ErrorModal, InputModal, PropertiesModal};
use crate::ui::{AppLayout, HelpOverlay, ListingView};

use super::App;
use super::state::{AppMode, Pending};

/// Draw the whole screen for the current state.
pub fn render_app(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = &app.theme;
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(theme.background).fg(theme.foreground));

    let layout = AppLayout::new(area);

    // Header: app name, current directory, filter
    let mut header = vec![
        Span::styled(" filedeck ", theme.title),
        Span::raw(" "),
        Span::raw(app.session.current_dir().display().to_string()),
    ];
    if !app.filter.is_empty() {
        header.push(Span::styled(
            format!("  filter: {}", app.filter),
            Style::default().fg(theme.warning),
        ));
    }
    if app.service.show_hidden() {
        header.push(Span::styled("  [hidden shown]", Style::default().fg(theme.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(header)).style(theme.header), layout.header);

    let visible = filter_entries(&app.listing.entries, &app.filter);
    let listing = ListingView::new(theme, &visible, app.sort, &app.marked, &app.session.clipboard);
    app.table_state.select((!visible.is_empty()).then_some(app.selected));
    frame.render_stateful_widget(listing, layout.main, &mut app.table_state);

    // Footer: counts, sort, clipboard, last message
    let separator = Span::styled(" │ ", Style::default().fg(theme.muted));
    let mut footer = vec![
        Span::raw(" "),
        Span::raw(app.listing.summary()),
    ];
    if !app.marked.is_empty() {
        footer.push(separator.clone());
        footer.push(Span::styled(format!("{} marked", app.marked.len()), theme.marked));
    }
    footer.push(separator.clone());
    footer.push(Span::raw(format!("sort: {}", app.sort.label())));
    footer.push(separator.clone());
    footer.push(Span::raw(app.service.clipboard_summary(&app.session.clipboard)));
    if let Some(message) = &app.message {
        let color = if message.success { theme.success } else { theme.error };
        footer.push(separator);
        footer.push(Span::styled(message.text.clone(), Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)).style(theme.footer), layout.footer);

    // Overlays
    match (app.mode, &app.pending) {
        (AppMode::Help, _) => frame.render_widget(HelpOverlay::new(theme), area),
        (AppMode::ConfirmDelete, Pending::Delete(paths)) => {
            frame.render_widget(DeleteConfirmModal::new(theme, paths), area);
        }
        (AppMode::Properties, Pending::Properties(properties)) => {
            frame.render_widget(PropertiesModal::new(theme, properties), area);
        }
        (AppMode::Error, Pending::Error(message)) => {
            frame.render_widget(ErrorModal::new(theme, message), area);
        }
        (mode, _) if mode.is_input() => {
            let (title, prompt) = mode.prompt();
            frame.render_widget(InputModal::new(theme, &app.input, title, prompt), area);
        }
        _ => {}
    }
}
