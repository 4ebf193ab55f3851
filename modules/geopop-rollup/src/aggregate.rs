//! Population rollups over the geographic hierarchy.
//!
//! Declared country populations are authoritative: continent, region and
//! country totals are sums of country facts, never re-derived from cities.
//! City population is always the sum of city facts in the area. Districts and
//! single cities have no declared figure, so their total is their city sum.

use std::collections::HashMap;

use geopop_common::{Result, RollupError};
use geopop_world::{AreaScope, GeoFact, GroupKey, Level};
use tracing::debug;

use crate::breakdown::{PopulationBreakdown, Rounding};

/// Total and city population of one area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rollup {
    pub total: u64,
    pub city: u64,
}

impl Rollup {
    /// Negative when city rows overcount the declared total. Clamped to the
    /// `i64` range.
    pub fn non_city(&self) -> i64 {
        let diff = i128::from(self.total) - i128::from(self.city);
        i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
    }

    /// Sums saturate at `u64::MAX` rather than wrapping.
    fn absorb(&mut self, fact: &GeoFact, declared_total: bool) {
        if fact.is_city() {
            self.city = self.city.saturating_add(fact.population);
            if !declared_total {
                self.total = self.total.saturating_add(fact.population);
            }
        } else if declared_total {
            self.total = self.total.saturating_add(fact.population);
        }
    }
}

/// Reject named scopes with a blank name.
pub fn validate_scope(scope: &AreaScope) -> Result<()> {
    if scope.is_blank() {
        return Err(RollupError::InvalidScope(format!(
            "{} scope requires a non-blank name",
            scope.level().map(|l| l.to_string()).unwrap_or_default()
        )));
    }
    Ok(())
}

/// Roll up every fact in `scope`.
///
/// A scope that matches nothing is not an error; it yields a zero rollup.
pub fn rollup(scope: &AreaScope, facts: &[GeoFact]) -> Result<Rollup> {
    validate_scope(scope)?;
    let declared_total = scope.level().map_or(true, |l| l.has_declared_total());

    let mut acc = Rollup::default();
    let mut matched = 0usize;
    for fact in facts.iter().filter(|f| scope.contains(f)) {
        acc.absorb(fact, declared_total);
        matched += 1;
    }

    debug!(scope = %scope, matched, total = acc.total, city = acc.city, "Rolled up scope");
    Ok(acc)
}

/// One breakdown row per distinct group at `level`, largest total first.
///
/// Groups keep first-seen order among equal totals.
pub fn breakdown_by(level: Level, facts: &[GeoFact], rounding: Rounding) -> Vec<PopulationBreakdown> {
    let declared_total = level.has_declared_total();
    let mut groups: Vec<(GroupKey, Rollup)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for fact in facts {
        let Some(key) = level.group_key(fact) else {
            continue;
        };
        let slot = match index.get(&key.key) {
            Some(&i) => i,
            None => {
                index.insert(key.key.clone(), groups.len());
                groups.push((key, Rollup::default()));
                groups.len() - 1
            }
        };
        groups[slot].1.absorb(fact, declared_total);
    }

    let mut rows: Vec<PopulationBreakdown> = groups
        .into_iter()
        .map(|(key, acc)| PopulationBreakdown::from_rollup(key.label, level, acc, rounding))
        .collect();
    rows.sort_by(|a, b| b.total_population().cmp(&a.total_population()));

    debug!(level = %level, groups = rows.len(), "Built breakdown");
    rows
}
