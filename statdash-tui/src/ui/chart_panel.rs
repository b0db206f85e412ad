//! Panel 1 (Chart): draws a `ChartSpec` with ratatui's canvas chart.
//!
//! Stacked bars are drawn as vertical segments from base to base + value, one
//! dataset per segment. Highlight markers become gold vertical lines that span
//! the y range and carry their year in the legend.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

use statdash_core::chart::{ChartSpec, Series, SeriesKind};
use statdash_core::domain::Year;

use crate::theme::{category_color, highlight_color, Palette};

pub struct ChartPanel<'a> {
    spec: &'a ChartSpec,
    palette: &'a Palette,
    cursor: Option<Year>,
    active: bool,
}

/// One polyline to draw, with its legend entry if it has one.
struct Trace {
    name: Option<String>,
    style: Style,
    graph: GraphType,
    points: Vec<(f64, f64)>,
}

impl<'a> ChartPanel<'a> {
    pub fn new(spec: &'a ChartSpec, palette: &'a Palette) -> Self {
        Self {
            spec,
            palette,
            cursor: None,
            active: true,
        }
    }

    pub fn cursor(mut self, year: Option<Year>) -> Self {
        self.cursor = year;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn block(&self) -> Block<'a> {
        let mut title = format!(" {} ", self.spec.title);
        if let Some(year) = self.cursor {
            title.push_str(&format!("· cursor {year} "));
        }
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.panel_border(self.active))
            .title(Span::styled(title, self.palette.accent_bold()))
            .style(self.palette.base())
    }

    fn traces(&self, y_bounds: (f64, f64)) -> Vec<Trace> {
        let mut traces = Vec::new();
        for series in &self.spec.series {
            let style = Style::default().fg(category_color(series.category));
            match series.kind {
                SeriesKind::Bar => bar_traces(series, style, &mut traces),
                SeriesKind::LinesMarkers => line_traces(series, style, &mut traces),
            }
        }
        for marker in &self.spec.markers {
            let x = marker.year as f64;
            traces.push(Trace {
                name: Some(format!("┆ {}", marker.label)),
                style: Style::default().fg(highlight_color()),
                graph: GraphType::Line,
                points: vec![(x, y_bounds.0), (x, y_bounds.1)],
            });
        }
        traces
    }
}

fn bar_traces(series: &Series, style: Style, out: &mut Vec<Trace>) {
    let mut named = false;
    for (year, bottom, top) in series.segments() {
        let x = year as f64;
        out.push(Trace {
            name: (!named).then(|| series.name.clone()),
            style,
            graph: GraphType::Line,
            points: vec![(x, bottom), (x, top)],
        });
        named = true;
    }
}

/// Consecutive present values form one run; a missing value breaks the line.
fn line_traces(series: &Series, style: Style, out: &mut Vec<Trace>) {
    let mut runs: Vec<Vec<(f64, f64)>> = vec![Vec::new()];
    for point in &series.points {
        match point.value {
            Some(v) => {
                if let Some(run) = runs.last_mut() {
                    run.push((point.year as f64, v));
                }
            }
            None => runs.push(Vec::new()),
        }
    }
    let mut named = false;
    for run in runs.into_iter().filter(|r| !r.is_empty()) {
        let graph = if run.len() == 1 {
            GraphType::Scatter
        } else {
            GraphType::Line
        };
        out.push(Trace {
            name: (!named).then(|| series.name.clone()),
            style,
            graph,
            points: run,
        });
        named = true;
    }
}

/// Pad a value range so flat series still get a visible axis.
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span.abs() < f64::EPSILON {
        lo.abs().max(1.0) * 0.1
    } else {
        span * 0.05
    };
    (lo - pad, hi + pad)
}

impl<'a> Widget for ChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let years = self.spec.years();
        let (Some(&first), Some(&last), Some((lo, hi))) =
            (years.first(), years.last(), self.spec.y_bounds())
        else {
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No data in the selected year range.",
                    self.palette.muted(),
                )),
                Line::from(Span::styled(
                    "Press r to reset the range or R to reload the store.",
                    self.palette.muted(),
                )),
            ])
            .block(block)
            .render(area, buf);
            return;
        };

        let (y_min, y_max) = padded(lo, hi);
        let traces = self.traces((y_min, y_max));
        let datasets: Vec<Dataset> = traces
            .iter()
            .map(|t| {
                let ds = Dataset::default()
                    .marker(symbols::Marker::Braille)
                    .graph_type(t.graph)
                    .style(t.style)
                    .data(&t.points);
                match &t.name {
                    Some(name) => ds.name(name.clone()),
                    None => ds,
                }
            })
            .collect();

        let x_bounds = [first as f64 - 0.5, last as f64 + 0.5];
        let mid_year = first + (last - first) / 2;
        let x_labels: Vec<Span> = if first == last {
            vec![Span::styled(first.to_string(), self.palette.muted())]
        } else {
            [first, mid_year, last]
                .iter()
                .map(|y| Span::styled(y.to_string(), self.palette.muted()))
                .collect()
        };
        let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
            .iter()
            .map(|v| Span::styled(format!("{v:.1}"), self.palette.muted()))
            .collect();

        Chart::new(datasets)
            .block(block)
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
            .x_axis(
                Axis::default()
                    .title(Span::styled(self.spec.x_axis_title.clone(), self.palette.muted()))
                    .style(Style::default().fg(self.palette.grid))
                    .bounds(x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(self.spec.y_axis_title.clone(), self.palette.muted()))
                    .style(Style::default().fg(self.palette.grid))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}
