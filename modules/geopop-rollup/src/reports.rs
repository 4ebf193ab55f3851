//! Report assembly.
//!
//! Every report is an independent `(scope, limit?) -> record(s)` call: fetch
//! facts, then run the pure aggregator/ranker over them. Nothing is cached
//! between calls.

use geopop_common::{Result, RollupError};
use geopop_world::{AreaScope, FactKind, GeoFact, Level};
use tracing::{debug, warn};

use crate::aggregate::{breakdown_by, rollup, validate_scope};
use crate::breakdown::{PopulationBreakdown, Rounding};
use crate::language::{speakers, LanguageReport};
use crate::provider::FactProvider;
use crate::ranker::{rank, RankedEntity};

/// Population reports over one fact provider.
#[derive(Debug, Clone)]
pub struct PopulationReports<P> {
    provider: P,
}

impl<P: FactProvider> PopulationReports<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    // ========== Rankings ==========

    /// All countries or cities in `scope`, most populous first.
    pub async fn ranked(&self, kind: FactKind, scope: &AreaScope) -> Result<Vec<RankedEntity<GeoFact>>> {
        self.ranking(kind, scope, false, None).await
    }

    /// The `n` most populous countries or cities in `scope`.
    pub async fn top_ranked(
        &self,
        kind: FactKind,
        scope: &AreaScope,
        n: i64,
    ) -> Result<Vec<RankedEntity<GeoFact>>> {
        self.ranking(kind, scope, false, Some(n)).await
    }

    /// All capital cities in `scope`, most populous first.
    pub async fn ranked_capitals(&self, scope: &AreaScope) -> Result<Vec<RankedEntity<GeoFact>>> {
        self.ranking(FactKind::City, scope, true, None).await
    }

    /// The `n` most populous capital cities in `scope`.
    pub async fn top_ranked_capitals(
        &self,
        scope: &AreaScope,
        n: i64,
    ) -> Result<Vec<RankedEntity<GeoFact>>> {
        self.ranking(FactKind::City, scope, true, Some(n)).await
    }

    async fn ranking(
        &self,
        kind: FactKind,
        scope: &AreaScope,
        capitals_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<RankedEntity<GeoFact>>> {
        validate_scope(scope)?;
        if matches!(limit, Some(n) if n <= 0) {
            // Resolved to empty by the ranker; no point fetching.
            return Ok(rank(Vec::<GeoFact>::new(), limit));
        }

        let entities: Vec<GeoFact> = self
            .fetch(scope)
            .await?
            .into_iter()
            .filter(|f| f.kind == kind && (!capitals_only || f.is_capital))
            .collect();

        let ranked = rank(entities, limit);
        debug!(
            scope = %scope,
            kind = %kind,
            capitals_only,
            limit = ?limit,
            returned = ranked.len(),
            "Ranked entities"
        );
        Ok(ranked)
    }

    // ========== Breakdowns ==========

    /// City / non-city split of a single named area.
    ///
    /// A city's total is its own population, so its non-city share is always
    /// zero. When several cities share a name, the most populous one is
    /// reported. Percentages are not rounded.
    pub async fn area_population(&self, scope: &AreaScope) -> Result<PopulationBreakdown> {
        let Some(level) = scope.level() else {
            return Err(RollupError::InvalidScope(
                "world has no single-area breakdown; use world_population".into(),
            ));
        };
        validate_scope(scope)?;

        let mut facts = self.fetch(scope).await?;
        if level == Level::CityPoint {
            facts.retain(GeoFact::is_city);
            facts.truncate(1);
        }

        let Some(first) = facts.first() else {
            return Err(RollupError::NotFound {
                scope: scope.clone(),
            });
        };
        let area_name = match scope {
            AreaScope::Country(_) => first.country_name.clone(),
            AreaScope::City(_) => first.name.clone(),
            _ => scope.name().unwrap_or_default().to_string(),
        };

        let acc = rollup(scope, &facts)?;
        Ok(PopulationBreakdown::from_rollup(area_name, level, acc, Rounding::Exact))
    }

    /// One row per `level` group inside `scope`, largest total first,
    /// percentages rounded to two decimals.
    pub async fn breakdown(&self, level: Level, scope: &AreaScope) -> Result<Vec<PopulationBreakdown>> {
        validate_scope(scope)?;
        let facts = self.fetch(scope).await?;
        Ok(breakdown_by(level, &facts, Rounding::TwoDecimals))
    }

    // ========== Totals ==========

    /// Sum of every declared country population.
    pub async fn world_population(&self) -> Result<u64> {
        let facts = self.fetch(&AreaScope::World).await?;
        Ok(rollup(&AreaScope::World, &facts)?.total)
    }

    /// Speakers of each requested language and their share of the world.
    pub async fn language_speakers(&self, languages: &[String]) -> Result<Vec<LanguageReport>> {
        if languages.iter().any(|l| l.trim().is_empty()) {
            return Err(RollupError::InvalidScope(
                "language names must be non-blank".into(),
            ));
        }

        let countries = self.fetch(&AreaScope::World).await?;
        let shares = self.provider.fetch_languages().await.map_err(|e| {
            warn!(error = %e, "Language fetch failed");
            RollupError::from(e)
        })?;
        Ok(speakers(languages, &countries, &shares))
    }

    async fn fetch(&self, scope: &AreaScope) -> Result<Vec<GeoFact>> {
        let facts = self.provider.fetch_facts(scope).await.map_err(|e| {
            warn!(scope = %scope, error = %e, "Fact fetch failed");
            RollupError::from(e)
        })?;
        if facts.is_empty() {
            debug!(scope = %scope, "Scope matched no facts");
        }
        Ok(facts)
    }
}
