//! Statdash Core: yearly statistics shaping and chart construction.
//!
//! This crate contains everything between the store and the screen:
//! - Domain types (raw yearly rows, normalized rows, chart categories)
//! - SQLite loader behind the `YearlySource` trait
//! - Column normalizer (thousands separators, millions scaling, derived column)
//! - Inclusive year-range filter
//! - Chart builder (stacked composition chart, trend chart, highlight markers)
//! - Display table renderer and summary aggregator
//! - CSV export with a content-hash memo
//! - TOML configuration and the render pipeline tying it together

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod export;
pub mod pipeline;
pub mod summary;
pub mod table;

pub use chart::{build_chart, ChartMode, ChartSpec, Theme};
pub use config::{ConfigError, DashboardConfig};
pub use data::{filter_range, normalize, StoreError, YearRange, YearlySource};
pub use domain::{Category, NormalizedRecord, RawValue, YearlyRecord};
pub use pipeline::{Dashboard, RenderOutput, RenderRequest};
pub use summary::SummaryStats;
pub use table::DisplayTable;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything handed to the presentation layer is Send + Sync,
    /// so a UI may move a render result across threads without a retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<YearlyRecord>();
        require_sync::<YearlyRecord>();
        require_send::<NormalizedRecord>();
        require_sync::<NormalizedRecord>();
        require_send::<ChartSpec>();
        require_sync::<ChartSpec>();
        require_send::<DisplayTable>();
        require_sync::<DisplayTable>();
        require_send::<SummaryStats>();
        require_sync::<SummaryStats>();
        require_send::<RenderOutput>();
        require_sync::<RenderOutput>();
        require_send::<Dashboard>();
        require_sync::<Dashboard>();
        require_send::<DashboardConfig>();
        require_sync::<DashboardConfig>();
    }

    #[test]
    fn dashboard_loads_through_trait_object() {
        let memory = data::InMemorySource::new(vec![
            YearlyRecord::new(2021, 21_000_000i64, 8_600_000i64, 10_300_000i64),
            YearlyRecord::new(2020, 20_000_000i64, 8_700_000i64, 10_500_000i64),
        ]);
        let source: &dyn YearlySource = &memory;
        let dash = Dashboard::load(source).unwrap();
        assert_eq!(dash.records().len(), 2);
        assert_eq!(dash.years(), vec![2020, 2021]);
    }
}
