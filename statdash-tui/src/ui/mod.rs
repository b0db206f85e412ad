//! Top-level UI layout: tabs above the active panel, status bar below.

pub mod chart_panel;
pub mod help_panel;
pub mod status_bar;
pub mod summary_panel;
pub mod table_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use statdash_core::domain::Year;

use crate::app::{AppState, Panel};
use crate::theme::Palette;

use chart_panel::ChartPanel;
use help_panel::HelpPanel;
use summary_panel::SummaryPanel;
use table_panel::TablePanel;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let palette = Palette::for_theme(app.theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app, &palette);
    draw_panel(f, chunks[1], app, &palette);
    status_bar::render(f, chunks[2], app, &palette);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    let spans: Vec<Span> = (0..4)
        .filter_map(Panel::from_index)
        .map(|panel| {
            let text = format!(" {}:{} ", panel.index() + 1, panel.label());
            if panel == app.active_panel {
                Span::styled(text, palette.accent_bold())
            } else {
                Span::styled(text, palette.muted())
            }
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    let output = &app.output;
    match app.active_panel {
        Panel::Chart => f.render_widget(
            ChartPanel::new(&output.chart, palette).cursor(app.cursor_year),
            area,
        ),
        Panel::Table => {
            let highlights: Vec<Year> = app.highlights.iter().copied().collect();
            f.render_widget(
                TablePanel::new(&output.table, palette)
                    .cursor(app.cursor_year)
                    .highlights(&highlights),
                area,
            );
        }
        Panel::Summary => f.render_widget(
            SummaryPanel::new(&output.summary, output.range, palette),
            area,
        ),
        Panel::Help => f.render_widget(HelpPanel::new(palette), area),
    }
}
