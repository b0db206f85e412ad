//! Chart builder: filtered table → `ChartSpec`.

use std::collections::BTreeSet;

use tracing::debug;

use super::spec::{
    BarMode, ChartMode, ChartSpec, HighlightMarker, Legend, Series, SeriesKind, SeriesPoint,
};
use super::theme::Theme;
use crate::domain::{Category, NormalizedRecord, Year};

pub const COMPOSITION_TITLE: &str =
    "Growth Potential: Publishers, Studies & Other Memorial Attendees";
pub const TREND_TITLE: &str = "Trends: Publishers, Studies & Other Memorial Attendees";

const CHART_HEIGHT: u32 = 600;

/// Build the chart for `mode` over an already filtered table.
///
/// `highlights` only affects composition mode; years not present in
/// `records` are ignored.
pub fn build_chart(
    records: &[NormalizedRecord],
    mode: ChartMode,
    theme: Theme,
    highlights: &[Year],
) -> ChartSpec {
    let (title, bar_mode, series, markers) = match mode {
        ChartMode::Composition => (
            COMPOSITION_TITLE,
            Some(BarMode::Stack),
            stacked_series(records),
            highlight_markers(records, highlights),
        ),
        ChartMode::Trend => (TREND_TITLE, None, trend_series(records), Vec::new()),
    };

    ChartSpec {
        mode,
        title: title.to_string(),
        x_axis_title: "Year".into(),
        y_axis_title: "Millions".into(),
        height: CHART_HEIGHT,
        bar_mode,
        theme: theme.chart_theme(),
        legend: Legend::default(),
        series,
        markers,
    }
}

/// One bar series per category; each year's base is the running sum of the
/// categories below it. A missing value breaks the stack above it for that year.
fn stacked_series(records: &[NormalizedRecord]) -> Vec<Series> {
    let mut bases: Vec<Option<f64>> = vec![Some(0.0); records.len()];

    Category::ALL
        .iter()
        .map(|&category| {
            let points = records
                .iter()
                .zip(bases.iter_mut())
                .map(|(record, base)| {
                    let value = category.value(record);
                    let point = SeriesPoint {
                        year: record.year,
                        value,
                        base: *base,
                    };
                    *base = match (*base, value) {
                        (Some(b), Some(v)) => Some(b + v),
                        _ => None,
                    };
                    point
                })
                .collect();
            Series {
                name: category.label().to_string(),
                category,
                kind: SeriesKind::Bar,
                color: category.color().to_string(),
                offset_group: Some(0),
                points,
            }
        })
        .collect()
}

fn trend_series(records: &[NormalizedRecord]) -> Vec<Series> {
    Category::ALL
        .iter()
        .map(|&category| Series {
            name: category.label().to_string(),
            category,
            kind: SeriesKind::LinesMarkers,
            color: category.color().to_string(),
            offset_group: None,
            points: records
                .iter()
                .map(|r| SeriesPoint {
                    year: r.year,
                    value: category.value(r),
                    base: None,
                })
                .collect(),
        })
        .collect()
}

fn highlight_markers(records: &[NormalizedRecord], highlights: &[Year]) -> Vec<HighlightMarker> {
    let present: BTreeSet<Year> = records.iter().map(|r| r.year).collect();
    let requested: BTreeSet<Year> = highlights.iter().copied().collect();

    let ignored = requested.difference(&present).count();
    if ignored > 0 {
        debug!(ignored, "highlight years outside the filtered range");
    }

    requested
        .intersection(&present)
        .map(|&year| HighlightMarker::at(year))
        .collect()
}
