//! Population rankings.
//!
//! Ordering is strictly by population, descending. The sort is stable, so
//! ties keep their input order; providers hand facts over population-sorted,
//! which makes tie order reproducible.

use geopop_common::RollupError;
use geopop_world::GeoFact;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::warn;

/// Anything that can be ranked by population.
pub trait Populated {
    fn population(&self) -> u64;
}

impl Populated for GeoFact {
    fn population(&self) -> u64 {
        self.population
    }
}

impl<T: Populated + ?Sized> Populated for &T {
    fn population(&self) -> u64 {
        (**self).population()
    }
}

/// An entity and its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RankedEntity<T> {
    pub rank: usize,
    #[serde(flatten)]
    pub entity: T,
}

/// Rank every entity.
pub fn rank_all<T: Populated>(mut items: Vec<T>) -> Vec<RankedEntity<T>> {
    items.sort_by(|a, b| b.population().cmp(&a.population()));
    items
        .into_iter()
        .enumerate()
        .map(|(i, entity)| RankedEntity { rank: i + 1, entity })
        .collect()
}

/// Rank and keep at most `limit` entities.
///
/// A non-positive limit yields an empty ranking rather than an error. A
/// limit past the end returns everything.
pub fn rank_top<T: Populated>(items: Vec<T>, limit: i64) -> Vec<RankedEntity<T>> {
    if limit <= 0 {
        warn!(error = %RollupError::InvalidLimit(limit), "Top-N request resolved to empty ranking");
        return Vec::new();
    }
    let mut ranked = rank_all(items);
    ranked.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    ranked
}

/// `None` ranks everything, `Some(n)` behaves like [`rank_top`].
pub fn rank<T: Populated>(items: Vec<T>, limit: Option<i64>) -> Vec<RankedEntity<T>> {
    match limit {
        Some(n) => rank_top(items, n),
        None => rank_all(items),
    }
}
