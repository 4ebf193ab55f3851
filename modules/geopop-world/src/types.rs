use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scope::ParseScopeError;

// --- Fact Types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    Country,
    City,
}

impl std::fmt::Display for FactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FactKind::Country => write!(f, "country"),
            FactKind::City => write!(f, "city"),
        }
    }
}

/// One row of raw population input.
///
/// Country facts carry the authoritative population of the country. City
/// facts carry the population of a named city and the full parent chain
/// (continent, region, country, district) copied from their country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeoFact {
    /// Country code for country facts, city id for city facts.
    pub entity_id: String,
    pub kind: FactKind,
    pub name: String,
    pub continent: String,
    pub region: String,
    pub country_code: String,
    pub country_name: String,
    /// Only set on city facts.
    pub district: Option<String>,
    pub population: u64,
    pub is_capital: bool,
}

impl GeoFact {
    pub fn country(
        code: impl Into<String>,
        name: impl Into<String>,
        continent: impl Into<String>,
        region: impl Into<String>,
        population: u64,
    ) -> Self {
        let code = code.into();
        let name = name.into();
        Self {
            entity_id: code.clone(),
            kind: FactKind::Country,
            country_code: code,
            country_name: name.clone(),
            name,
            continent: continent.into(),
            region: region.into(),
            district: None,
            population,
            is_capital: false,
        }
    }

    /// A city inheriting its continent, region and country from `parent`.
    pub fn city(
        id: impl Into<String>,
        name: impl Into<String>,
        district: impl Into<String>,
        population: u64,
        parent: &GeoFact,
    ) -> Self {
        Self {
            entity_id: id.into(),
            kind: FactKind::City,
            name: name.into(),
            continent: parent.continent.clone(),
            region: parent.region.clone(),
            country_code: parent.country_code.clone(),
            country_name: parent.country_name.clone(),
            district: Some(district.into()),
            population,
            is_capital: false,
        }
    }

    pub fn as_capital(mut self) -> Self {
        self.is_capital = true;
        self
    }

    pub fn is_city(&self) -> bool {
        self.kind == FactKind::City
    }

    pub fn is_country(&self) -> bool {
        self.kind == FactKind::Country
    }
}

/// Share of one country's population speaking a language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LanguageFact {
    pub country_code: String,
    pub language: String,
    pub is_official: bool,
    /// 0.0 - 100.0
    pub percentage: f64,
}

// --- Hierarchy ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Continent,
    Region,
    Country,
    District,
    CityPoint,
}

/// Grouping key produced by [`Level::group_key`]. `key` identifies the group,
/// `label` is what a report shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub key: String,
    pub label: String,
}

impl Level {
    /// Extract the group a fact rolls up into at this level.
    ///
    /// Country facts have no district and are not city points, so they
    /// yield `None` at those levels.
    pub fn group_key(&self, fact: &GeoFact) -> Option<GroupKey> {
        match self {
            Level::Continent => Some(GroupKey {
                key: fact.continent.clone(),
                label: fact.continent.clone(),
            }),
            Level::Region => Some(GroupKey {
                key: fact.region.clone(),
                label: fact.region.clone(),
            }),
            Level::Country => Some(GroupKey {
                key: fact.country_code.clone(),
                label: fact.country_name.clone(),
            }),
            Level::District => fact.district.as_ref().map(|d| GroupKey {
                key: format!("{}/{}", fact.country_code, d),
                label: d.clone(),
            }),
            Level::CityPoint => fact.is_city().then(|| GroupKey {
                key: fact.entity_id.clone(),
                label: fact.name.clone(),
            }),
        }
    }

    /// Whether the hierarchy carries an authoritative population figure at
    /// this level. Districts and cities only exist as sums of city rows.
    pub fn has_declared_total(&self) -> bool {
        matches!(self, Level::Continent | Level::Region | Level::Country)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Continent => write!(f, "continent"),
            Level::Region => write!(f, "region"),
            Level::Country => write!(f, "country"),
            Level::District => write!(f, "district"),
            Level::CityPoint => write!(f, "city"),
        }
    }
}

impl std::str::FromStr for Level {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "continent" => Ok(Level::Continent),
            "region" => Ok(Level::Region),
            "country" => Ok(Level::Country),
            "district" => Ok(Level::District),
            "city" => Ok(Level::CityPoint),
            other => Err(ParseScopeError::UnknownLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn china() -> GeoFact {
        GeoFact::country("CHN", "China", "Asia", "Eastern Asia", 1_277_558_000)
    }

    #[test]
    fn city_inherits_parent_chain() {
        let shanghai = GeoFact::city("1890", "Shanghai", "Shanghai", 9_696_300, &china());
        assert_eq!(shanghai.continent, "Asia");
        assert_eq!(shanghai.region, "Eastern Asia");
        assert_eq!(shanghai.country_code, "CHN");
        assert_eq!(shanghai.country_name, "China");
        assert_eq!(shanghai.district.as_deref(), Some("Shanghai"));
        assert!(shanghai.is_city());
        assert!(!shanghai.is_capital);
    }

    #[test]
    fn district_key_is_scoped_to_country() {
        let usa = GeoFact::country("USA", "United States", "North America", "North America", 1);
        let a = GeoFact::city("1", "Springfield", "Illinois", 1, &usa);
        let b = GeoFact::city("2", "Peking", "Peking", 1, &china());
        let key_a = Level::District.group_key(&a).unwrap();
        let key_b = Level::District.group_key(&b).unwrap();
        assert_eq!(key_a.label, "Illinois");
        assert_ne!(key_a.key, key_b.key);
    }

    #[test]
    fn country_fact_has_no_district_or_city_key() {
        assert!(Level::District.group_key(&china()).is_none());
        assert!(Level::CityPoint.group_key(&china()).is_none());
        assert_eq!(Level::Country.group_key(&china()).unwrap().label, "China");
    }

    #[test]
    fn level_parses_round_trip_names() {
        for level in [
            Level::Continent,
            Level::Region,
            Level::Country,
            Level::District,
            Level::CityPoint,
        ] {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
        assert!("planet".parse::<Level>().is_err());
    }
}
