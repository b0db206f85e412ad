//! Render pipeline: load → normalize once, then filter → chart/table/summary
//! per request.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::chart::{build_chart, ChartMode, ChartSpec, Theme};
use crate::config::ViewConfig;
use crate::data::{filter_range, normalize, resolve_range, StoreError, YearRange, YearlySource};
use crate::domain::{NormalizedRecord, Year};
use crate::summary::SummaryStats;
use crate::table::DisplayTable;

/// The normalized table for one session. Built once per load, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<NormalizedRecord>,
}

impl Dashboard {
    pub fn load(source: &dyn YearlySource) -> Result<Self, StoreError> {
        let raw = source.load()?;
        debug!(source = source.name(), rows = raw.len(), "normalizing");
        Ok(Self {
            records: normalize(&raw),
        })
    }

    pub fn from_records(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn observed_range(&self) -> Option<YearRange> {
        YearRange::observed(&self.records)
    }

    pub fn years(&self) -> Vec<Year> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// One render cycle. A missing range means the full observed range.
    pub fn render(&self, request: &RenderRequest) -> RenderOutput {
        let _span = debug_span!("render", mode = %request.mode, theme = %request.theme).entered();

        let range = request
            .range
            .or_else(|| resolve_range(&self.records, None, None));
        let filtered = match range {
            Some(range) => filter_range(&self.records, range),
            None => Vec::new(),
        };

        let chart = build_chart(&filtered, request.mode, request.theme, &request.highlight_years);
        let table = DisplayTable::from_records(&filtered);
        let summary = SummaryStats::compute(&filtered);
        debug!(rows = filtered.len(), markers = chart.markers.len(), "rendered");

        RenderOutput {
            range,
            filtered,
            chart,
            table,
            summary,
        }
    }
}

/// Parameters of one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub range: Option<YearRange>,
    pub mode: ChartMode,
    pub theme: Theme,
    pub highlight_years: Vec<Year>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::from_view(&ViewConfig::default(), None)
    }
}

impl RenderRequest {
    /// Request for a configured view. Configured bounds are filled from
    /// `observed` when only one side is set.
    pub fn from_view(view: &ViewConfig, observed: Option<YearRange>) -> Self {
        let range = match (view.min_year, view.max_year) {
            (None, None) => None,
            (Some(min), Some(max)) => Some(YearRange::new(min, max)),
            (min, max) => observed.map(|o| YearRange::new(min.unwrap_or(o.min), max.unwrap_or(o.max))),
        };
        Self {
            range,
            mode: view.mode,
            theme: view.theme,
            highlight_years: view.highlight_years.clone(),
        }
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Applied range; `None` only for an empty table with no requested range.
    pub range: Option<YearRange>,
    pub filtered: Vec<NormalizedRecord>,
    pub chart: ChartSpec,
    pub table: DisplayTable,
    pub summary: SummaryStats,
}
