//! Risk records: the atomic rows of a risk inventory.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::scenarios::MarketScenario;

/// Risk measure carried by a [`RiskRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RiskMetric {
    /// Position-scaled delta
    Delta,
    /// Position-scaled vega
    Vega,
    /// Position-scaled gamma
    Gamma,
    /// Full-revaluation P&L under one spot/vol scenario
    SpotVolPnl,
}

impl RiskMetric {
    /// All metrics, in record emission order.
    pub const ALL: [RiskMetric; 4] = [
        RiskMetric::Delta,
        RiskMetric::Vega,
        RiskMetric::Gamma,
        RiskMetric::SpotVolPnl,
    ];

    /// Upper-case identifier used in tables and filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskMetric::Delta => "DELTA",
            RiskMetric::Vega => "VEGA",
            RiskMetric::Gamma => "GAMMA",
            RiskMetric::SpotVolPnl => "SPOT_VOL_PNL",
        }
    }

    /// Name used in query explanations.
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskMetric::Delta => "Delta",
            RiskMetric::Vega => "Vega",
            RiskMetric::Gamma => "Gamma",
            RiskMetric::SpotVolPnl => "Spot/Vol P&L",
        }
    }

    /// True for DELTA, VEGA and GAMMA.
    pub fn is_point_greek(&self) -> bool {
        !matches!(self, RiskMetric::SpotVolPnl)
    }
}

impl fmt::Display for RiskMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskMetric {
    type Err = String;

    /// Case-insensitive; accepts `SpotVol` as an alias of `SPOT_VOL_PNL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DELTA" => Ok(RiskMetric::Delta),
            "VEGA" => Ok(RiskMetric::Vega),
            "GAMMA" => Ok(RiskMetric::Gamma),
            "SPOT_VOL_PNL" | "SPOTVOL" | "SPOT_VOL" | "PNL" => Ok(RiskMetric::SpotVolPnl),
            _ => Err(s.to_string()),
        }
    }
}

/// The metrics a point (unshocked) record can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointGreek {
    /// Position-scaled delta
    Delta,
    /// Position-scaled vega
    Vega,
    /// Position-scaled gamma
    Gamma,
}

impl From<PointGreek> for RiskMetric {
    fn from(greek: PointGreek) -> Self {
        match greek {
            PointGreek::Delta => RiskMetric::Delta,
            PointGreek::Vega => RiskMetric::Vega,
            PointGreek::Gamma => RiskMetric::Gamma,
        }
    }
}

impl TryFrom<RiskMetric> for PointGreek {
    type Error = RiskMetric;

    fn try_from(metric: RiskMetric) -> Result<Self, Self::Error> {
        match metric {
            RiskMetric::Delta => Ok(PointGreek::Delta),
            RiskMetric::Vega => Ok(PointGreek::Vega),
            RiskMetric::Gamma => Ok(PointGreek::Gamma),
            RiskMetric::SpotVolPnl => Err(metric),
        }
    }
}

/// Static classification of an underlying.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetInfo {
    /// Ticker, e.g. "AAPL"
    pub asset: String,
    /// e.g. "Technology"
    pub sector: String,
    /// e.g. "Consumer Electronics"
    pub subsector: String,
    /// e.g. "Equity"
    pub desk: String,
}

impl AssetInfo {
    /// Creates asset metadata.
    pub fn new(
        asset: impl Into<String>,
        sector: impl Into<String>,
        subsector: impl Into<String>,
        desk: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            sector: sector.into(),
            subsector: subsector.into(),
            desk: desk.into(),
        }
    }
}

/// One row of the risk inventory.
///
/// Point Greek records (DELTA, VEGA, GAMMA) carry no scenario; SPOT_VOL_PNL
/// records always carry one. The two constructors are the only way to build a
/// record, which keeps that invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskRecord {
    position: String,
    metric: RiskMetric,
    scenario: Option<MarketScenario>,
    value: f64,
    info: Arc<AssetInfo>,
}

impl RiskRecord {
    /// A DELTA, VEGA or GAMMA record.
    pub fn point(
        position: impl Into<String>,
        greek: PointGreek,
        value: f64,
        info: &Arc<AssetInfo>,
    ) -> Self {
        Self {
            position: position.into(),
            metric: greek.into(),
            scenario: None,
            value,
            info: Arc::clone(info),
        }
    }

    /// A SPOT_VOL_PNL record for one grid cell.
    pub fn spot_vol(
        position: impl Into<String>,
        scenario: MarketScenario,
        value: f64,
        info: &Arc<AssetInfo>,
    ) -> Self {
        Self {
            position: position.into(),
            metric: RiskMetric::SpotVolPnl,
            scenario: Some(scenario),
            value,
            info: Arc::clone(info),
        }
    }

    /// Position label.
    pub fn position(&self) -> &str {
        &self.position
    }

    /// Metric.
    pub fn metric(&self) -> RiskMetric {
        self.metric
    }

    /// Scenario cell, present only for SPOT_VOL_PNL.
    pub fn scenario(&self) -> Option<MarketScenario> {
        self.scenario
    }

    /// Relative spot shock, present only for SPOT_VOL_PNL.
    pub fn spot_shock(&self) -> Option<f64> {
        self.scenario.map(|s| s.spot_shock)
    }

    /// Relative volatility shock, present only for SPOT_VOL_PNL.
    pub fn vol_shock(&self) -> Option<f64> {
        self.scenario.map(|s| s.vol_shock)
    }

    /// Risk value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Asset metadata shared by every record of the same underlying.
    pub fn info(&self) -> &AssetInfo {
        &self.info
    }

    /// Underlying ticker.
    pub fn asset(&self) -> &str {
        &self.info.asset
    }

    /// Sector.
    pub fn sector(&self) -> &str {
        &self.info.sector
    }

    /// Subsector.
    pub fn subsector(&self) -> &str {
        &self.info.subsector
    }

    /// Desk.
    pub fn desk(&self) -> &str {
        &self.info.desk
    }

    /// Flat borrowed view for tabular export.
    pub fn row(&self) -> RiskRow<'_> {
        RiskRow {
            position: &self.position,
            metric: self.metric,
            spot_move: self.spot_shock(),
            vol_move: self.vol_shock(),
            risk_value: self.value,
            asset: &self.info.asset,
            sector: &self.info.sector,
            subsector: &self.info.subsector,
            desk: &self.info.desk,
        }
    }
}

/// Flat view of a [`RiskRecord`], one field per exported column.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct RiskRow<'a> {
    /// Position label
    pub position: &'a str,
    /// Metric
    pub metric: RiskMetric,
    /// Relative spot shock
    pub spot_move: Option<f64>,
    /// Relative volatility shock
    pub vol_move: Option<f64>,
    /// Risk value
    pub risk_value: f64,
    /// Ticker
    pub asset: &'a str,
    /// Sector
    pub sector: &'a str,
    /// Subsector
    #[cfg_attr(feature = "serde", serde(rename = "SubSector"))]
    pub subsector: &'a str,
    /// Desk
    pub desk: &'a str,
}
