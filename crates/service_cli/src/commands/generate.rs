//! Generate command implementation
//!
//! Builds the demo risk inventory, prints a summary, and optionally exports
//! it as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pricer_risk::inventory::{RiskMetric, RiskTable};
use tracing::info;

use super::build_risk_table;
use crate::config::RiskStoreConfig;
use crate::Result;

/// Run the generate command
pub fn run(
    config: &RiskStoreConfig,
    output: Option<&Path>,
    seed: Option<u64>,
    assets: Option<&[String]>,
) -> Result<()> {
    let table = build_risk_table(config, seed, assets)?;
    print_summary(&table);

    if let Some(path) = output {
        info!("Writing risk inventory to {}", path.display());
        write_csv(&table, File::create(path)?)?;
        info!(records = table.len(), "Export complete");
    }

    Ok(())
}

/// Writes `Position,Metric,SpotMove,VolMove,RiskValue,Asset,Sector,SubSector,Desk`
/// rows; point Greeks leave the shock columns empty.
pub fn write_csv<W: Write>(table: &RiskTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in table.rows() {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

fn print_summary(table: &RiskTable) {
    println!("\nRisk inventory: {} records across {} assets", table.len(), table.assets().len());
    if let Some(date) = table.as_of() {
        println!("As of: {}", date);
    }
    println!("\n┌──────────────┬──────────────────────┐");
    println!("│ Metric       │ Total                │");
    println!("├──────────────┼──────────────────────┤");
    for metric in RiskMetric::ALL {
        println!("│ {:<12} │ {:>20.4} │", metric.as_str(), table.metric_total(metric));
    }
    println!("└──────────────┴──────────────────────┘");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_risk::inventory::{AssetInfo, PointGreek, RiskRecord};
    use pricer_risk::scenarios::MarketScenario;
    use std::sync::Arc;

    #[test]
    fn test_write_csv_columns_and_rows() {
        let aapl = Arc::new(AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"));
        let table = RiskTable::from_records(vec![
            RiskRecord::point("AAPL Call 1.0 1.0Y", PointGreek::Vega, 3.5, &aapl),
            RiskRecord::spot_vol("AAPL", MarketScenario::new(-0.25, 0.1), -2.0, &aapl),
        ]);

        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Position,Metric,SpotMove,VolMove,RiskValue,Asset,Sector,SubSector,Desk"
        );
        assert_eq!(
            lines[1],
            "AAPL Call 1.0 1.0Y,VEGA,,,3.5,AAPL,Technology,Consumer Electronics,Equity"
        );
        assert_eq!(
            lines[2],
            "AAPL,SPOT_VOL_PNL,-0.25,0.1,-2.0,AAPL,Technology,Consumer Electronics,Equity"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");
        let config = RiskStoreConfig::default();
        let assets = vec!["AAPL".to_string()];

        run(&config, Some(&path), Some(3), Some(assets.as_slice())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Position,Metric"));
        // Hedge rows are always present
        assert!(text.lines().filter(|l| l.starts_with("AAPL,")).count() >= 57);
    }
}
