use anyhow::{bail, Result};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geopop_common::Config;
use geopop_rollup::{Dataset, FactProvider, PopulationBreakdown, PopulationReports};
use geopop_world::FactKind;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("geopop=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.log_summary();

    if config.report == "schema" {
        let schema = schemars::schema_for!(PopulationBreakdown);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let raw = tokio::fs::read_to_string(config.require_dataset()?).await?;
    let provider = Dataset::from_json(&raw)?.into_provider()?;
    let reports = PopulationReports::new(provider);

    let output = run_report(&reports, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    info!(report = config.report.as_str(), "Report complete");
    Ok(())
}

async fn run_report<P: FactProvider>(reports: &PopulationReports<P>, config: &Config) -> Result<Value> {
    let scope = &config.scope;
    let value = match config.report.as_str() {
        "world-population" => serde_json::json!({
            "world_population": reports.world_population().await?,
        }),
        "area-population" => serde_json::to_value(reports.area_population(scope).await?)?,
        "breakdown" => serde_json::to_value(reports.breakdown(config.level, scope).await?)?,
        "ranked-countries" | "ranked-cities" => {
            let kind = if config.report == "ranked-countries" {
                FactKind::Country
            } else {
                FactKind::City
            };
            let ranked = match config.top_n {
                Some(n) => reports.top_ranked(kind, scope, n).await?,
                None => reports.ranked(kind, scope).await?,
            };
            serde_json::to_value(ranked)?
        }
        "ranked-capitals" => {
            let ranked = match config.top_n {
                Some(n) => reports.top_ranked_capitals(scope, n).await?,
                None => reports.ranked_capitals(scope).await?,
            };
            serde_json::to_value(ranked)?
        }
        "languages" => serde_json::to_value(reports.language_speakers(&config.languages).await?)?,
        other => bail!("Unknown report {other:?}"),
    };
    Ok(value)
}
