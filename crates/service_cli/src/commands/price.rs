//! Price command implementation
//!
//! Prices a single European option and reports its Greeks.

use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
use tracing::info;

use crate::config::RiskStoreConfig;
use crate::Result;

/// Market overrides from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketOverrides {
    /// Spot price
    pub spot: Option<f64>,
    /// Risk-free rate
    pub rate: Option<f64>,
    /// Volatility
    pub vol: Option<f64>,
}

/// Price and Greeks of one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Market the option was priced in
    pub market: BlackScholes<f64>,
    /// Premium
    pub price: f64,
    /// Delta, vega, gamma
    pub greeks: Greeks<f64>,
}

/// Run the price command
pub fn run(
    config: &RiskStoreConfig,
    overrides: MarketOverrides,
    strike: f64,
    tenor: f64,
    direction: OptionDirection,
) -> Result<()> {
    let quote = quote(config, overrides, strike, tenor, direction)?;
    info!(%direction, strike, tenor, price = quote.price, "Priced option");

    println!(
        "\n{} K={} T={}Y  (S={}, r={}, σ={})",
        direction,
        strike,
        tenor,
        quote.market.spot(),
        quote.market.rate(),
        quote.market.volatility()
    );
    println!("┌────────────┬──────────────────┐");
    println!("│ Price      │ {:>16.8} │", quote.price);
    println!("│ Delta      │ {:>16.8} │", quote.greeks.delta);
    println!("│ Vega       │ {:>16.8} │", quote.greeks.vega);
    println!("│ Gamma      │ {:>16.8} │", quote.greeks.gamma);
    println!("└────────────┴──────────────────┘");
    Ok(())
}

/// Prices one unit, validating every input.
pub fn quote(
    config: &RiskStoreConfig,
    overrides: MarketOverrides,
    strike: f64,
    tenor: f64,
    direction: OptionDirection,
) -> Result<Quote> {
    let market = BlackScholes::new(
        overrides.spot.unwrap_or(config.market.spot),
        overrides.rate.unwrap_or(config.market.rate),
        overrides.vol.unwrap_or(config.market.volatility),
    )?;
    let option = OptionPosition::new("CLI", 1.0, strike, tenor, direction, PositionSide::Long)?;

    Ok(Quote {
        market,
        price: market.price(option.direction(), option.strike(), option.tenor()),
        greeks: market.greeks(option.direction(), option.strike(), option.tenor()),
    })
}
