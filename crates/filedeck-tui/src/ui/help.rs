//! Key binding reference shown with `?`.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::event::HELP_SECTIONS;
use crate::theme::Theme;
use crate::ui::modals::popup_frame;
use crate::ui::popup_area;

type Section<'s> = (&'s str, &'s [(&'s str, &'s str)]);

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn column(&self, sections: &[Section<'_>]) -> Paragraph<'static> {
        let key_width = sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(keys, _)| keys.chars().count()))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (heading, rows) in sections {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::styled(heading.to_string(), self.theme.title));
            lines.extend(rows.iter().map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(format!(" {keys:<key_width$}  "), self.theme.help_key),
                    Span::styled(what.to_string(), self.theme.help_desc),
                ])
            }));
        }
        Paragraph::new(lines)
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = popup_frame(
            popup_area(area, 80, 26),
            buf,
            "Keys (? or Esc closes)",
            self.theme.title,
            self.theme.border,
        );
        let [left, right] = Layout::horizontal([Constraint::Fill(1); 2])
            .spacing(2)
            .areas(inner);

        let (first, rest) = HELP_SECTIONS.split_at(2);
        self.column(first).render(left, buf);
        self.column(rest).render(right, buf);
    }
}
