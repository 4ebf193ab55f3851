use std::collections::HashMap;

use geopop_world::{GeoFact, LanguageFact};
use schemars::JsonSchema;
use serde::Serialize;

use crate::percentage::percent_half_up;

/// Speakers of one language worldwide.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct LanguageReport {
    pub language: String,
    pub speakers: u64,
    /// Share of the world population, two decimals.
    pub world_percentage: f64,
}

/// Count speakers of each requested language, most spoken first.
///
/// A country contributes `population * percentage / 100` speakers. Shares
/// for countries missing from `countries` contribute nothing. Requested
/// languages without any rows still get a zero row.
pub fn speakers(
    requested: &[String],
    countries: &[GeoFact],
    languages: &[LanguageFact],
) -> Vec<LanguageReport> {
    let population: HashMap<&str, u64> = countries
        .iter()
        .filter(|f| f.is_country())
        .map(|f| (f.country_code.as_str(), f.population))
        .collect();
    let world: u64 = population.values().fold(0u64, |acc, p| acc.saturating_add(*p));

    let mut reports: Vec<LanguageReport> = requested
        .iter()
        .map(|language| {
            let exact: f64 = languages
                .iter()
                .filter(|l| l.language == *language)
                .filter_map(|l| {
                    population
                        .get(l.country_code.as_str())
                        .map(|&pop| pop as f64 * l.percentage / 100.0)
                })
                .sum();
            let speakers = exact.round() as u64;
            let world_percentage = percent_half_up(i128::from(speakers), world, 2);
            LanguageReport {
                language: language.clone(),
                speakers,
                world_percentage,
            }
        })
        .collect();

    reports.sort_by(|a, b| b.speakers.cmp(&a.speakers));
    reports
}
