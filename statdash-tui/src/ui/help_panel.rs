//! Panel 4 (Help): keyboard shortcuts.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Palette;

pub struct HelpPanel<'a> {
    palette: &'a Palette,
}

impl<'a> HelpPanel<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    fn section(&self, lines: &mut Vec<Line<'a>>, title: &str) {
        lines.push(Line::from(Span::styled(title.to_string(), self.palette.accent_bold())));
    }

    fn key(&self, lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:>14}  "), self.palette.accent()),
            Span::styled(desc.to_string(), self.palette.muted()),
        ]));
    }
}

impl<'a> Widget for HelpPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = Vec::new();

        self.section(&mut lines, "Navigation");
        self.key(&mut lines, "1-4", "Chart / Table / Summary / Help");
        self.key(&mut lines, "Tab / S-Tab", "Cycle panels forward / back");
        self.key(&mut lines, "q", "Quit");
        lines.push(Line::from(""));

        self.section(&mut lines, "View");
        self.key(&mut lines, "m", "Toggle composition / trend chart");
        self.key(&mut lines, "t", "Toggle dark / light theme");
        self.key(&mut lines, "[ / ]", "Move first year down / up");
        self.key(&mut lines, "{ / }", "Move last year down / up");
        self.key(&mut lines, "r", "Reset to the full year range");
        lines.push(Line::from(""));

        self.section(&mut lines, "Highlights");
        self.key(&mut lines, "h / l", "Move year cursor left / right");
        self.key(&mut lines, "Space", "Mark or unmark the cursor year");
        lines.push(Line::from(""));

        self.section(&mut lines, "Data");
        self.key(&mut lines, "R", "Reload from the store");
        self.key(&mut lines, "x", "Export the filtered table as CSV");
        self.key(&mut lines, "j / k, g / G", "Step or jump the cursor (Table panel)");

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.palette.panel_border(true))
                    .title(Span::styled(" Help ", self.palette.accent_bold())),
            )
            .style(self.palette.base())
            .render(area, buf);
    }
}
