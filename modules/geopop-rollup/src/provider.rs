//! Fact provider boundary.

use std::sync::Arc;

use async_trait::async_trait;
use geopop_common::FetchError;
use geopop_world::{AreaScope, GeoFact, LanguageFact};
use tracing::debug;

/// Supplies raw facts for a scope.
///
/// Implementations match scope names exactly (case-sensitive) and return
/// country and city facts in population-descending order. The engine trusts
/// this filtering and never falls back to fuzzy matching.
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn fetch_facts(&self, scope: &AreaScope) -> Result<Vec<GeoFact>, FetchError>;

    /// Per-country language shares.
    async fn fetch_languages(&self) -> Result<Vec<LanguageFact>, FetchError>;
}

// ---------------------------------------------------------------------------
// MemoryFactProvider (no database required)
// ---------------------------------------------------------------------------

/// Serves facts from an immutable in-memory snapshot.
///
/// Cheap to clone; clones share the snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryFactProvider {
    facts: Arc<Vec<GeoFact>>,
    languages: Arc<Vec<LanguageFact>>,
}

impl MemoryFactProvider {
    pub fn new(mut facts: Vec<GeoFact>, languages: Vec<LanguageFact>) -> Self {
        facts.sort_by(|a, b| b.population.cmp(&a.population));
        Self {
            facts: Arc::new(facts),
            languages: Arc::new(languages),
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

#[async_trait]
impl FactProvider for MemoryFactProvider {
    async fn fetch_facts(&self, scope: &AreaScope) -> Result<Vec<GeoFact>, FetchError> {
        let matched: Vec<GeoFact> = self
            .facts
            .iter()
            .filter(|f| scope.contains(f))
            .cloned()
            .collect();
        debug!(scope = %scope, matched = matched.len(), "Served facts from snapshot");
        Ok(matched)
    }

    async fn fetch_languages(&self) -> Result<Vec<LanguageFact>, FetchError> {
        Ok(self.languages.as_ref().clone())
    }
}

// ---------------------------------------------------------------------------
// Arc<P> blanket — lets concurrent report tasks share one provider
// ---------------------------------------------------------------------------

#[async_trait]
impl<P: FactProvider + ?Sized> FactProvider for Arc<P> {
    async fn fetch_facts(&self, scope: &AreaScope) -> Result<Vec<GeoFact>, FetchError> {
        (**self).fetch_facts(scope).await
    }

    async fn fetch_languages(&self) -> Result<Vec<LanguageFact>, FetchError> {
        (**self).fetch_languages().await
    }
}
