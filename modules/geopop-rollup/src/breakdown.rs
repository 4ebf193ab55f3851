use geopop_common::{Result, RollupError};
use geopop_world::Level;
use schemars::JsonSchema;
use serde::Serialize;

use crate::aggregate::Rollup;
use crate::percentage::PercentSplit;

/// Tolerance for the percentage invariant: two independently rounded
/// columns may drift by one unit in the last place.
const PERCENT_TOLERANCE: f64 = 0.01 + 1e-9;

/// How percentages are stored on a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Full precision. Single-area reports.
    Exact,
    /// Half-up to two decimal places. Multi-row reports.
    TwoDecimals,
}

/// City vs. non-city population of one area. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PopulationBreakdown {
    area_name: String,
    level: Level,
    total_population: u64,
    city_population: u64,
    non_city_population: i64,
    city_percentage: f64,
    non_city_percentage: f64,
}

impl PopulationBreakdown {
    pub fn from_rollup(
        area_name: impl Into<String>,
        level: Level,
        rollup: Rollup,
        rounding: Rounding,
    ) -> Self {
        let split = match rounding {
            Rounding::Exact => PercentSplit::of(rollup.total, rollup.city),
            Rounding::TwoDecimals => PercentSplit::rounded(rollup.total, rollup.city, 2),
        };
        Self {
            area_name: area_name.into(),
            level,
            total_population: rollup.total,
            city_population: rollup.city,
            non_city_population: rollup.non_city(),
            city_percentage: split.city,
            non_city_percentage: split.non_city,
        }
    }

    /// Build from externally computed figures, checking that the parts add
    /// up to the total and the percentages add up to 100.
    pub fn try_new(
        area_name: impl Into<String>,
        level: Level,
        total_population: u64,
        city_population: u64,
        non_city_population: i64,
        city_percentage: f64,
        non_city_percentage: f64,
    ) -> Result<Self> {
        let area_name = area_name.into();
        if city_population as i128 + non_city_population as i128 != total_population as i128 {
            return Err(RollupError::InvalidBreakdown(format!(
                "{area_name}: city {city_population} + non-city {non_city_population} != total {total_population}"
            )));
        }
        if !city_percentage.is_finite() || !non_city_percentage.is_finite() {
            return Err(RollupError::InvalidBreakdown(format!(
                "{area_name}: percentages must be finite"
            )));
        }
        if (city_percentage + non_city_percentage - 100.0).abs() > PERCENT_TOLERANCE {
            return Err(RollupError::InvalidBreakdown(format!(
                "{area_name}: {city_percentage}% + {non_city_percentage}% != 100%"
            )));
        }
        Ok(Self {
            area_name,
            level,
            total_population,
            city_population,
            non_city_population,
            city_percentage,
            non_city_percentage,
        })
    }

    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn total_population(&self) -> u64 {
        self.total_population
    }

    pub fn city_population(&self) -> u64 {
        self.city_population
    }

    /// Negative when city rows overcount the declared total.
    pub fn non_city_population(&self) -> i64 {
        self.non_city_population
    }

    pub fn city_percentage(&self) -> f64 {
        self.city_percentage
    }

    pub fn non_city_percentage(&self) -> f64 {
        self.non_city_percentage
    }
}
