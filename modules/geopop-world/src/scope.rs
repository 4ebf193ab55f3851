use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{GeoFact, Level};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseScopeError {
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Scope {0:?} is missing a name (expected <level>:<name>)")]
    MissingName(String),
}

/// Which facts participate in a rollup or ranking.
///
/// Matching is exact and case-sensitive. Names are trusted as given; blank
/// names are representable here and rejected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "level", content = "name", rename_all = "snake_case")]
pub enum AreaScope {
    World,
    Continent(String),
    Region(String),
    /// Country code or exact country name.
    Country(String),
    District(String),
    City(String),
}

impl AreaScope {
    pub fn name(&self) -> Option<&str> {
        match self {
            AreaScope::World => None,
            AreaScope::Continent(n)
            | AreaScope::Region(n)
            | AreaScope::Country(n)
            | AreaScope::District(n)
            | AreaScope::City(n) => Some(n.as_str()),
        }
    }

    /// True for a named scope whose name is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.name().is_some_and(|n| n.trim().is_empty())
    }

    /// The hierarchy level this scope selects. `None` for the world.
    pub fn level(&self) -> Option<Level> {
        match self {
            AreaScope::World => None,
            AreaScope::Continent(_) => Some(Level::Continent),
            AreaScope::Region(_) => Some(Level::Region),
            AreaScope::Country(_) => Some(Level::Country),
            AreaScope::District(_) => Some(Level::District),
            AreaScope::City(_) => Some(Level::CityPoint),
        }
    }

    pub fn contains(&self, fact: &GeoFact) -> bool {
        match self {
            AreaScope::World => true,
            AreaScope::Continent(n) => fact.continent == *n,
            AreaScope::Region(n) => fact.region == *n,
            AreaScope::Country(n) => fact.country_code == *n || fact.country_name == *n,
            AreaScope::District(n) => fact.district.as_deref() == Some(n.as_str()),
            AreaScope::City(n) => fact.is_city() && fact.name == *n,
        }
    }
}

impl std::fmt::Display for AreaScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.level(), self.name()) {
            (Some(level), Some(name)) => write!(f, "{level}:{name}"),
            _ => write!(f, "world"),
        }
    }
}

impl std::str::FromStr for AreaScope {
    type Err = ParseScopeError;

    /// Parses `world` or `<level>:<name>`. The name is kept verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "world" {
            return Ok(AreaScope::World);
        }
        let (level, name) = s
            .split_once(':')
            .ok_or_else(|| ParseScopeError::MissingName(s.to_string()))?;
        let name = name.to_string();
        Ok(match level.parse::<Level>()? {
            Level::Continent => AreaScope::Continent(name),
            Level::Region => AreaScope::Region(name),
            Level::Country => AreaScope::Country(name),
            Level::District => AreaScope::District(name),
            Level::CityPoint => AreaScope::City(name),
        })
    }
}
