//! The risk table: an ordered, append-only collection of risk records.

use chrono::NaiveDate;

use super::record::{RiskMetric, RiskRecord, RiskRow};

/// Full risk inventory for one portfolio snapshot.
///
/// Rebuilt from scratch on every run. Record order is emission order: per
/// asset, each position's point Greeks then its scenario P&L, followed by the
/// asset's hedge records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskTable {
    as_of: Option<NaiveDate>,
    records: Vec<RiskRecord>,
}

impl RiskTable {
    /// Creates an empty table with no snapshot date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from already-built records.
    pub fn from_records(records: Vec<RiskRecord>) -> Self {
        Self {
            as_of: None,
            records,
        }
    }

    /// Stamps the snapshot date used by dated queries.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Snapshot date, if stamped.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Appends one record.
    pub fn push(&mut self, record: RiskRecord) {
        self.records.push(record);
    }

    /// Appends many records, preserving their order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = RiskRecord>) {
        self.records.extend(records);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in emission order.
    pub fn records(&self) -> &[RiskRecord] {
        &self.records
    }

    /// Iterates over records in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, RiskRecord> {
        self.records.iter()
    }

    /// Distinct assets in first-seen order.
    pub fn assets(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.asset()) {
                seen.push(record.asset());
            }
        }
        seen
    }

    /// Records for one asset.
    pub fn for_asset<'a>(&'a self, asset: &'a str) -> impl Iterator<Item = &'a RiskRecord> + 'a {
        self.records.iter().filter(move |r| r.asset() == asset)
    }

    /// Sum of every record with the given metric.
    pub fn metric_total(&self, metric: RiskMetric) -> f64 {
        self.records
            .iter()
            .filter(|r| r.metric() == metric)
            .fold(0.0, |acc, r| acc + r.value())
    }

    /// Flat rows for export.
    pub fn rows(&self) -> impl Iterator<Item = RiskRow<'_>> {
        self.records.iter().map(RiskRecord::row)
    }
}

impl<'a> IntoIterator for &'a RiskTable {
    type Item = &'a RiskRecord;
    type IntoIter = std::slice::Iter<'a, RiskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{AssetInfo, PointGreek};
    use crate::scenarios::MarketScenario;
    use std::sync::Arc;

    fn sample() -> RiskTable {
        let aapl = Arc::new(AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"));
        let msft = Arc::new(AssetInfo::new("MSFT", "Technology", "Software", "Equity"));

        let mut table = RiskTable::new();
        table.push(RiskRecord::point("AAPL Call 1.0 1.0Y", PointGreek::Vega, 10.0, &aapl));
        table.push(RiskRecord::point("MSFT Put 1.2 0.5Y", PointGreek::Vega, 5.0, &msft));
        table.push(RiskRecord::point("AAPL Put 0.8 2.0Y", PointGreek::Vega, -3.0, &aapl));
        table.push(RiskRecord::spot_vol(
            "AAPL",
            MarketScenario::new(0.05, 0.0),
            7.0,
            &aapl,
        ));
        table
    }

    #[test]
    fn test_len_and_empty() {
        assert!(RiskTable::new().is_empty());
        let table = sample();
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_assets_first_seen_order() {
        assert_eq!(sample().assets(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_for_asset() {
        let table = sample();
        assert_eq!(table.for_asset("AAPL").count(), 3);
        assert_eq!(table.for_asset("GOOG").count(), 0);
    }

    #[test]
    fn test_metric_total() {
        let table = sample();
        assert_eq!(table.metric_total(RiskMetric::Vega), 12.0);
        assert_eq!(table.metric_total(RiskMetric::SpotVolPnl), 7.0);
        assert_eq!(table.metric_total(RiskMetric::Delta), 0.0);
        assert!(table.metric_total(RiskMetric::Delta).is_sign_positive());
        assert!(RiskTable::new().metric_total(RiskMetric::Vega).is_sign_positive());
    }

    #[test]
    fn test_as_of_stamp() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let table = sample().with_as_of(date);
        assert_eq!(table.as_of(), Some(date));
        assert_eq!(RiskTable::new().as_of(), None);
    }

    #[test]
    fn test_rows_preserve_order() {
        let table = sample();
        let positions: Vec<&str> = table.rows().map(|r| r.position).collect();
        assert_eq!(
            positions,
            vec!["AAPL Call 1.0 1.0Y", "MSFT Put 1.2 0.5Y", "AAPL Put 0.8 2.0Y", "AAPL"]
        );
    }
}
