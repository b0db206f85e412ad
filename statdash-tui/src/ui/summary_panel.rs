//! Panel 3 (Summary): one KPI card per mean.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use statdash_core::{SummaryStats, YearRange};

use crate::theme::Palette;

pub struct SummaryPanel<'a> {
    summary: &'a SummaryStats,
    range: Option<YearRange>,
    palette: &'a Palette,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(summary: &'a SummaryStats, range: Option<YearRange>, palette: &'a Palette) -> Self {
        Self {
            summary,
            range,
            palette,
        }
    }
}

fn fmt_mean(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}M"))
}

impl<'a> Widget for SummaryPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let range = self
            .range
            .map_or_else(|| "no data".to_string(), |r| r.to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.panel_border(true))
            .title(Span::styled(
                format!(" Summary · {range} · {} years ", self.summary.record_count),
                self.palette.accent_bold(),
            ))
            .style(self.palette.base());
        let inner = block.inner(area);
        block.render(area, buf);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(inner);

        for (card, (label, value)) in cards.iter().zip(self.summary.entries()) {
            let value_style = match value {
                Some(_) => Style::default()
                    .fg(self.palette.foreground)
                    .add_modifier(Modifier::BOLD),
                None => self.palette.muted(),
            };
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(fmt_mean(value), value_style)),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.grid))
                    .title(Span::styled(label, self.palette.muted())),
            )
            .render(*card, buf);
        }
    }
}
