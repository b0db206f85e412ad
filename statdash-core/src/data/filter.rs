//! Inclusive year-range filter.

use serde::{Deserialize, Serialize};

use crate::domain::{NormalizedRecord, Year};

/// Inclusive `[min, max]` year bound.
///
/// An inverted range (`min > max`) is representable and simply matches
/// nothing; callers are expected to prevent it, but filtering never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Year,
    pub max: Year,
}

impl YearRange {
    pub fn new(min: Year, max: Year) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: Year) -> bool {
        self.min <= year && year <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Full observed `[min(year), max(year)]` of a table, `None` when empty.
    pub fn observed(records: &[NormalizedRecord]) -> Option<Self> {
        let min = records.iter().map(|r| r.year).min()?;
        let max = records.iter().map(|r| r.year).max()?;
        Some(Self { min, max })
    }

    /// True when the two ranges share at least one year.
    pub fn overlaps(&self, other: &YearRange) -> bool {
        !self.is_inverted() && !other.is_inverted() && self.min <= other.max && other.min <= self.max
    }

    /// Clamp both bounds into `outer`.
    pub fn clamp_to(&self, outer: &YearRange) -> Self {
        Self {
            min: self.min.clamp(outer.min, outer.max),
            max: self.max.clamp(outer.min, outer.max),
        }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// Records whose year falls within `range`, in input order.
pub fn filter_range(records: &[NormalizedRecord], range: YearRange) -> Vec<NormalizedRecord> {
    if range.is_inverted() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| range.contains(r.year))
        .copied()
        .collect()
}

/// Resolve a possibly partial request against the observed range.
///
/// Missing bounds default to the observed minimum/maximum. Returns `None`
/// only when the table is empty and a bound is missing.
pub fn resolve_range(
    records: &[NormalizedRecord],
    min: Option<Year>,
    max: Option<Year>,
) -> Option<YearRange> {
    match (min, max) {
        (Some(min), Some(max)) => Some(YearRange::new(min, max)),
        _ => {
            let observed = YearRange::observed(records)?;
            Some(YearRange::new(
                min.unwrap_or(observed.min),
                max.unwrap_or(observed.max),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(from: Year, to: Year) -> Vec<NormalizedRecord> {
        (from..=to)
            .map(|y| NormalizedRecord::from_measured(y, Some(20.0), Some(8.0), Some(5.0)))
            .collect()
    }

    #[test]
    fn filter_two_years_out_of_seventy_five() {
        let data = table(1950, 2024);
        let out = filter_range(&data, YearRange::new(2020, 2021));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| (2020..=2021).contains(&r.year)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let data = table(2000, 2010);
        let out = filter_range(&data, YearRange::new(2000, 2000));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].year, 2000);
    }

    #[test]
    fn inverted_range_yields_empty() {
        let data = table(2000, 2010);
        assert!(filter_range(&data, YearRange::new(2005, 2001)).is_empty());
    }

    #[test]
    fn out_of_domain_range_yields_empty() {
        let data = table(2000, 2010);
        assert!(filter_range(&data, YearRange::new(1800, 1900)).is_empty());
    }

    #[test]
    fn filter_preserves_unsorted_input_order() {
        let mut data = table(2000, 2004);
        data.reverse();
        let years: Vec<Year> = filter_range(&data, YearRange::new(2001, 2003))
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2003, 2002, 2001]);
    }

    #[test]
    fn observed_range_spans_table() {
        let data = table(1950, 2024);
        assert_eq!(YearRange::observed(&data), Some(YearRange::new(1950, 2024)));
        assert_eq!(YearRange::observed(&[]), None);
    }

    #[test]
    fn resolve_fills_missing_bounds_from_observed() {
        let data = table(1950, 2024);
        assert_eq!(
            resolve_range(&data, None, None),
            Some(YearRange::new(1950, 2024))
        );
        assert_eq!(
            resolve_range(&data, Some(2000), None),
            Some(YearRange::new(2000, 2024))
        );
        assert_eq!(
            resolve_range(&data, None, Some(1960)),
            Some(YearRange::new(1950, 1960))
        );
        assert_eq!(resolve_range(&[], None, Some(2000)), None);
    }

    #[test]
    fn overlap_needs_a_shared_year() {
        let observed = YearRange::new(1990, 2024);
        assert!(YearRange::new(2024, 2030).overlaps(&observed));
        assert!(YearRange::new(1800, 1990).overlaps(&observed));
        assert!(!YearRange::new(1800, 1900).overlaps(&observed));
        assert!(!YearRange::new(2025, 2030).overlaps(&observed));
        assert!(!YearRange::new(2010, 2000).overlaps(&observed));
    }

    #[test]
    fn clamp_into_observed() {
        let outer = YearRange::new(1950, 2024);
        assert_eq!(
            YearRange::new(1900, 2030).clamp_to(&outer),
            YearRange::new(1950, 2024)
        );
    }
}
