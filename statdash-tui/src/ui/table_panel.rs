//! Panel 2 (Table): filtered rows, scrolled so the cursor year stays visible.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState, Widget},
};

use statdash_core::domain::Year;
use statdash_core::DisplayTable;

use crate::theme::Palette;

pub struct TablePanel<'a> {
    table: &'a DisplayTable,
    palette: &'a Palette,
    cursor: Option<Year>,
    highlights: &'a [Year],
}

impl<'a> TablePanel<'a> {
    pub fn new(table: &'a DisplayTable, palette: &'a Palette) -> Self {
        Self {
            table,
            palette,
            cursor: None,
            highlights: &[],
        }
    }

    pub fn cursor(mut self, year: Option<Year>) -> Self {
        self.cursor = year;
        self
    }

    pub fn highlights(mut self, years: &'a [Year]) -> Self {
        self.highlights = years;
        self
    }

    fn row_style(&self, year: Year) -> Style {
        let base = Style::default().fg(self.palette.foreground);
        if Some(year) == self.cursor {
            base.bg(self.palette.selection).add_modifier(Modifier::BOLD)
        } else if self.highlights.contains(&year) {
            base.fg(self.palette.warning)
        } else {
            base
        }
    }
}

impl<'a> Widget for TablePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Data Table (millions) · {} rows ", self.table.rows.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.panel_border(true))
            .title(Span::styled(title, self.palette.accent_bold()))
            .style(self.palette.base());

        let header = Row::new(
            self.table
                .headers
                .iter()
                .map(|h| Cell::from(h.as_str()).style(self.palette.accent_bold())),
        )
        .height(1);

        let rows: Vec<Row> = (0..self.table.rows.len())
            .map(|i| {
                let cells = (0..self.table.headers.len())
                    .map(|c| Cell::from(self.table.cell_text(i, c).unwrap_or_default()));
                Row::new(cells).style(self.row_style(self.table.rows[i].year))
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(17),
            Constraint::Length(21),
        ];

        // Selecting the cursor row makes the table pick an offset that keeps it on screen.
        let selected = self
            .cursor
            .and_then(|year| self.table.rows.iter().position(|r| r.year == year));
        let mut state = TableState::default().with_selected(selected);

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}
