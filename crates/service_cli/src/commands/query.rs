//! Query command implementation
//!
//! Builds the demo risk inventory and answers one risk question against it.

use clap::ValueEnum;
use pricer_risk::inventory::RiskTable;
use pricer_risk::query::{
    FilterResolver, FixedResolver, QueryEngine, QueryResponse, StructuredResolver,
};
use tracing::info;

use super::build_risk_table;
use crate::config::RiskStoreConfig;
use crate::Result;

/// How request text becomes a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// Always AAPL vega, whatever the text
    Fixed,
    /// `key=value` tokens
    Structured,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// `{content, source}` JSON
    Json,
}

/// Run the query command
pub fn run(
    config: &RiskStoreConfig,
    request: &str,
    resolver: ResolverKind,
    format: OutputFormat,
    seed: Option<u64>,
) -> Result<()> {
    let table = build_risk_table(config, seed, None)?;
    info!(request, resolver = ?resolver, "Answering query");

    let response = answer(config, request, resolver, &table)?;
    println!("{}", render(&response, format)?);
    Ok(())
}

/// Answers `request` with the chosen resolver.
pub fn answer(
    config: &RiskStoreConfig,
    request: &str,
    resolver: ResolverKind,
    table: &RiskTable,
) -> Result<QueryResponse> {
    match resolver {
        ResolverKind::Fixed => answer_with(config, FixedResolver::default(), request, table),
        ResolverKind::Structured => {
            answer_with(config, StructuredResolver::default(), request, table)
        }
    }
}

fn answer_with<R: FilterResolver>(
    config: &RiskStoreConfig,
    resolver: R,
    request: &str,
    table: &RiskTable,
) -> Result<QueryResponse> {
    let source = Some(config.source.clone()).filter(|s| !s.is_empty());
    let engine = QueryEngine::new(resolver).with_source(source);
    Ok(engine.answer(request, table)?)
}

/// Formats a response for the terminal.
pub fn render(response: &QueryResponse, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => match &response.source {
            Some(source) => format!("{}\nSource: {}", response.content, source),
            None => response.content.clone(),
        },
        OutputFormat::Json => serde_json::to_string_pretty(&response.create_response())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_risk::inventory::RiskMetric;

    fn table() -> RiskTable {
        let mut config = RiskStoreConfig::default();
        config.assets = vec!["AAPL".to_string(), "MSFT".to_string()];
        build_risk_table(&config, Some(8), None).unwrap()
    }

    #[test]
    fn test_fixed_answer_is_aapl_vega() {
        let table = table();
        let expected: f64 = table
            .for_asset("AAPL")
            .filter(|r| r.metric() == RiskMetric::Vega)
            .map(|r| r.value())
            .sum();
        let response = answer(
            &RiskStoreConfig::default(),
            "what is my vega",
            ResolverKind::Fixed,
            &table,
        )
        .unwrap();
        assert_eq!(response.value, expected);
        assert_eq!(response.source.as_deref(), Some("RiskStore"));
    }

    #[test]
    fn test_structured_answer() {
        let table = table();
        let response = answer(
            &RiskStoreConfig::default(),
            "metric=DELTA asset=MSFT",
            ResolverKind::Structured,
            &table,
        )
        .unwrap();
        // Hedged to zero
        assert!(response.value.abs() < 1e-3);
        assert!(response.content.starts_with("Your Delta risk to MSFT is"));
    }

    #[test]
    fn test_structured_answer_error() {
        let result = answer(
            &RiskStoreConfig::default(),
            "asset=MSFT",
            ResolverKind::Structured,
            &table(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_source_is_omitted() {
        let mut config = RiskStoreConfig::default();
        config.source = String::new();
        let response = answer(&config, "", ResolverKind::Fixed, &RiskTable::new()).unwrap();
        assert_eq!(response.source, None);
        assert_eq!(render(&response, OutputFormat::Text).unwrap(), "Your Vega risk to AAPL is 0");
    }

    #[test]
    fn test_render_json() {
        let response = answer(
            &RiskStoreConfig::default(),
            "",
            ResolverKind::Fixed,
            &RiskTable::new(),
        )
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render(&response, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["content"], "Your Vega risk to AAPL is 0");
        assert_eq!(json["source"], "RiskStore");
    }

    #[test]
    fn test_render_text_with_source() {
        let response = answer(
            &RiskStoreConfig::default(),
            "",
            ResolverKind::Fixed,
            &RiskTable::new(),
        )
        .unwrap();
        assert_eq!(
            render(&response, OutputFormat::Text).unwrap(),
            "Your Vega risk to AAPL is 0\nSource: RiskStore"
        );
    }
}
