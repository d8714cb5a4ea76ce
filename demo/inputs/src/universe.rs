//! Demonstration asset universe.
//!
//! Static sector, subsector and desk classification for the 20 equities the
//! demo book trades.

use pricer_risk::inventory::AssetInfo;

use crate::error::GeneratorError;

/// Desk every demo asset is booked on.
pub const DEFAULT_DESK: &str = "Equity";

/// (ticker, sector, subsector)
const UNIVERSE: [(&str, &str, &str); 20] = [
    ("AAPL", "Technology", "Consumer Electronics"),
    ("MSFT", "Technology", "Software"),
    ("GOOG", "Technology", "Internet"),
    ("AMZN", "Consumer Discretionary", "E-commerce"),
    ("TSLA", "Consumer Discretionary", "Automobiles"),
    ("NVDA", "Semi Conductor", "Semiconductors"),
    ("ASML", "Semi Conductor", "Semiconductors"),
    ("INTC", "Semi Conductor", "Semiconductors"),
    ("QCOM", "Semi Conductor", "Semiconductors"),
    ("AMD", "Semi Conductor", "Semiconductors"),
    ("JNJ", "Healthcare", "Pharmaceuticals"),
    ("V", "Financials", "Payment Processing"),
    ("MA", "Financials", "Payment Processing"),
    ("PG", "Consumer Staples", "Household Products"),
    ("UNH", "Healthcare", "Managed Care"),
    ("HD", "Consumer Discretionary", "Home Improvement"),
    ("BAC", "Financials", "Banks"),
    ("CRM", "Technology", "Software"),
    ("PYPL", "Technology", "Financial Technology"),
    ("ADBE", "Technology", "Software"),
];

fn info((asset, sector, subsector): (&str, &str, &str)) -> AssetInfo {
    AssetInfo::new(asset, sector, subsector, DEFAULT_DESK)
}

/// Every demo asset, in booking order.
pub fn asset_universe() -> Vec<AssetInfo> {
    UNIVERSE.iter().copied().map(info).collect()
}

/// Looks up one ticker, case-insensitively.
pub fn lookup(ticker: &str) -> Option<AssetInfo> {
    let ticker = ticker.trim();
    UNIVERSE
        .iter()
        .copied()
        .find(|(asset, _, _)| asset.eq_ignore_ascii_case(ticker))
        .map(info)
}

/// Resolves a subset of tickers, preserving the requested order.
///
/// An empty request selects the whole universe.
///
/// # Errors
/// [`GeneratorError::UnknownAsset`] for the first ticker not in the universe.
pub fn select<S: AsRef<str>>(tickers: &[S]) -> Result<Vec<AssetInfo>, GeneratorError> {
    if tickers.is_empty() {
        return Ok(asset_universe());
    }
    tickers
        .iter()
        .map(|ticker| {
            let ticker = ticker.as_ref();
            lookup(ticker).ok_or_else(|| GeneratorError::UnknownAsset(ticker.to_string()))
        })
        .collect()
}
