//! Raw country/city/language rows and the join that turns them into facts.

use std::collections::HashMap;

use geopop_common::{Result, RollupError};
use geopop_world::{GeoFact, LanguageFact};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::provider::MemoryFactProvider;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CountryRow {
    pub code: String,
    pub name: String,
    pub continent: String,
    pub region: String,
    pub population: u64,
    /// Id of the capital city, if any.
    #[serde(default)]
    pub capital: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CityRow {
    pub id: u64,
    pub name: String,
    pub country_code: String,
    pub district: String,
    pub population: u64,
}

/// A world snapshot as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    #[serde(default)]
    pub countries: Vec<CountryRow>,
    #[serde(default)]
    pub cities: Vec<CityRow>,
    #[serde(default)]
    pub languages: Vec<LanguageFact>,
}

impl Dataset {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RollupError::InvalidFact(format!("dataset: {e}")))
    }

    /// Join cities onto their countries.
    ///
    /// A city is a capital when its country's `capital` id points at it. A
    /// city naming an unknown country code, or a repeated country code, is
    /// rejected.
    pub fn into_facts(self) -> Result<Vec<GeoFact>> {
        let mut countries: HashMap<String, (GeoFact, Option<u64>)> = HashMap::new();
        let mut order = Vec::with_capacity(self.countries.len());
        for row in self.countries {
            if countries.contains_key(&row.code) {
                return Err(RollupError::InvalidFact(format!(
                    "duplicate country code {}",
                    row.code
                )));
            }
            let fact = GeoFact::country(
                row.code.clone(),
                row.name,
                row.continent,
                row.region,
                row.population,
            );
            order.push(row.code.clone());
            countries.insert(row.code, (fact, row.capital));
        }

        let mut facts = Vec::with_capacity(countries.len() + self.cities.len());
        for row in self.cities {
            let (country, capital) = countries.get(&row.country_code).ok_or_else(|| {
                RollupError::InvalidFact(format!(
                    "city {} ({}) references unknown country {}",
                    row.name, row.id, row.country_code
                ))
            })?;
            let city = GeoFact::city(
                row.id.to_string(),
                row.name,
                row.district,
                row.population,
                country,
            );
            facts.push(if *capital == Some(row.id) {
                city.as_capital()
            } else {
                city
            });
        }

        for code in order {
            if let Some((fact, _)) = countries.remove(&code) {
                facts.push(fact);
            }
        }
        Ok(facts)
    }

    pub fn into_provider(self) -> Result<MemoryFactProvider> {
        let languages = self.languages.clone();
        let facts = self.into_facts()?;
        let language_count = languages.len();
        let provider = MemoryFactProvider::new(facts, languages);
        if provider.is_empty() {
            warn!("Dataset has no countries or cities; every report will be empty");
        } else {
            info!(facts = provider.len(), languages = language_count, "Loaded dataset");
        }
        Ok(provider)
    }
}
