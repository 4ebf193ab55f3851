use std::env;
use std::path::{Path, PathBuf};

use geopop_world::{AreaScope, Level};
use tracing::info;

use crate::error::RollupError;

/// Languages reported when `GEOPOP_LANGUAGES` is unset.
pub const DEFAULT_LANGUAGES: [&str; 5] = ["Chinese", "English", "Hindi", "Spanish", "Arabic"];

/// Report-runner configuration loaded from environment variables.
///
/// Only the binary reads this. Engine calls take every parameter explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Required by every report except `schema`; see [`Config::require_dataset`].
    pub dataset_path: Option<PathBuf>,
    pub report: String,
    pub scope: AreaScope,
    pub level: Level,
    /// `None` means the full ranking.
    pub top_n: Option<i64>,
    pub languages: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, RollupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RollupError> {
        let dataset_path = lookup("GEOPOP_DATASET").map(PathBuf::from);

        let report = lookup("GEOPOP_REPORT").unwrap_or_else(|| "world-population".to_string());

        let scope = match lookup("GEOPOP_SCOPE") {
            Some(raw) => raw
                .parse::<AreaScope>()
                .map_err(|e| RollupError::Config(format!("GEOPOP_SCOPE: {e}")))?,
            None => AreaScope::World,
        };

        let level = match lookup("GEOPOP_LEVEL") {
            Some(raw) => raw
                .parse::<Level>()
                .map_err(|e| RollupError::Config(format!("GEOPOP_LEVEL: {e}")))?,
            None => Level::Continent,
        };

        let top_n = lookup("GEOPOP_TOP_N")
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| RollupError::Config(format!("GEOPOP_TOP_N must be a number, got {raw:?}")))
            })
            .transpose()?;

        let languages = match lookup("GEOPOP_LANGUAGES") {
            Some(raw) => raw
                .split(',')
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            None => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        };

        Ok(Self {
            dataset_path,
            report,
            scope,
            level,
            top_n,
            languages,
        })
    }

    /// The dataset path, or a `Config` error when `GEOPOP_DATASET` is unset.
    pub fn require_dataset(&self) -> Result<&Path, RollupError> {
        self.dataset_path.as_deref().ok_or_else(|| {
            RollupError::Config("GEOPOP_DATASET environment variable is required".into())
        })
    }

    pub fn log_summary(&self) {
        info!(
            dataset = ?self.dataset_path,
            report = self.report.as_str(),
            scope = %self.scope,
            level = %self.level,
            top_n = ?self.top_n,
            "Loaded report config"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn dataset_is_required_only_when_loading() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.dataset_path, None);
        assert!(matches!(config.require_dataset(), Err(RollupError::Config(_))));
    }

    #[test]
    fn schema_report_needs_no_dataset() {
        let config = Config::from_lookup(lookup_from(&[("GEOPOP_REPORT", "schema")])).unwrap();
        assert_eq!(config.report, "schema");
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEOPOP_DATASET", "world.json")])).unwrap();
        assert_eq!(config.require_dataset().unwrap(), Path::new("world.json"));
        assert_eq!(config.report, "world-population");
        assert_eq!(config.scope, AreaScope::World);
        assert_eq!(config.level, Level::Continent);
        assert_eq!(config.top_n, None);
        assert_eq!(config.languages.len(), DEFAULT_LANGUAGES.len());
    }

    #[test]
    fn parses_scope_limit_and_languages() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEOPOP_DATASET", "world.json"),
            ("GEOPOP_REPORT", "ranked-cities"),
            ("GEOPOP_SCOPE", "continent:Asia"),
            ("GEOPOP_LEVEL", "region"),
            ("GEOPOP_TOP_N", " 5 "),
            ("GEOPOP_LANGUAGES", "English, Spanish,,"),
        ]))
        .unwrap();
        assert_eq!(config.scope, AreaScope::Continent("Asia".into()));
        assert_eq!(config.level, Level::Region);
        assert_eq!(config.top_n, Some(5));
        assert_eq!(config.languages, vec!["English", "Spanish"]);
    }

    #[test]
    fn non_numeric_limit_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("GEOPOP_DATASET", "world.json"),
            ("GEOPOP_TOP_N", "ten"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RollupError::Config(_)));
    }

    #[test]
    fn negative_limit_is_passed_through() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEOPOP_DATASET", "world.json"),
            ("GEOPOP_TOP_N", "-5"),
        ]))
        .unwrap();
        assert_eq!(config.top_n, Some(-5));
    }
}
