//! Declarative chart construction.
//!
//! The builder turns a filtered table into a `ChartSpec`: a renderer-agnostic
//! description (series with x/y/base/style, highlight markers, layout) that a
//! terminal UI, a JSON consumer, or any plotting backend can draw.

pub mod builder;
pub mod spec;
pub mod theme;

pub use builder::{build_chart, COMPOSITION_TITLE, TREND_TITLE};
pub use spec::{
    AnnotationPosition, BarMode, ChartMode, ChartSpec, HighlightMarker, Legend, LineDash,
    ParseEnumError, Series, SeriesKind, SeriesPoint, HIGHLIGHT_COLOR,
};
pub use theme::{ChartTheme, Theme};
