//! Bottom status bar: view state on the left, last status message on the right.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme::Palette;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    let mut spans: Vec<Span> = Vec::new();

    let range = app
        .effective_range()
        .map_or_else(|| "—".to_string(), |r| r.to_string());
    spans.push(Span::styled(
        format!(" {} · {} · {range} ", app.mode, app.theme),
        palette.accent(),
    ));

    if let Some(at) = app.loaded_at {
        spans.push(Span::styled(
            format!("· loaded {} ", at.format("%H:%M:%S")),
            palette.muted(),
        ));
    }

    spans.push(Span::raw("| "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => palette.accent(),
            StatusLevel::Warning => palette.warning(),
            StatusLevel::Error => palette.negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    } else {
        spans.push(Span::styled("4:Help  q:Quit", palette.muted()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
}
