use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BasketError, Result};
use crate::optimizer::constants::{
    DEFAULT_ECO_WEIGHT, DEFAULT_ELASTICITY, DEFAULT_MAX_BUDGET, DEFAULT_MAX_ITEMS,
    DEFAULT_SOCIAL_WEIGHT, MAX_BUDGET_LIMIT, WEIGHT_SUM_TOLERANCE,
};

const CONFIG_FILE_NAME: &str = "eco_basket.toml";
const ENV_PREFIX: &str = "ECO_BASKET_";

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Tunables for the optimization engine.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub eco_weight: f64,
    pub social_weight: f64,
    /// CES elasticity ρ, in (0, 1].
    pub elasticity: f64,
    /// Largest budget the DP accepts in one call.
    pub max_budget: u64,
    /// Largest number of request lines accepted in one call.
    pub max_items: usize,
    pub substitution_policy: SubstitutionPolicy,
    /// Treat a zero budget as `InvalidBudget` instead of an empty basket.
    pub reject_zero_budget: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eco_weight: DEFAULT_ECO_WEIGHT,
            social_weight: DEFAULT_SOCIAL_WEIGHT,
            elasticity: DEFAULT_ELASTICITY,
            max_budget: DEFAULT_MAX_BUDGET,
            max_items: DEFAULT_MAX_ITEMS,
            substitution_policy: SubstitutionPolicy::FirstMatch,
            reject_zero_budget: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        let weights_in_range =
            (0.0..=1.0).contains(&self.eco_weight) && (0.0..=1.0).contains(&self.social_weight);
        if !weights_in_range
            || (self.eco_weight + self.social_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE
        {
            return Err(BasketError::Config(format!(
                "engine weights must be in [0, 1] and sum to 1 (got eco={} social={})",
                self.eco_weight, self.social_weight
            )));
        }

        if !(self.elasticity > 0.0 && self.elasticity <= 1.0) {
            return Err(BasketError::Config(format!(
                "engine.elasticity must be in (0, 1] (got {})",
                self.elasticity
            )));
        }

        if self.max_budget == 0 || self.max_budget > MAX_BUDGET_LIMIT {
            return Err(BasketError::Config(format!(
                "engine.max_budget must be in 1..={MAX_BUDGET_LIMIT} (got {})",
                self.max_budget
            )));
        }

        if self.max_items == 0 {
            return Err(BasketError::Config(
                "engine.max_items must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// How the substitution finder picks among valid alternatives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionPolicy {
    /// First valid alternative in catalog order.
    #[default]
    FirstMatch,
    /// Highest-utility alternative; ties go to the cheaper, then earlier item.
    BestMatch,
}

impl std::str::FromStr for SubstitutionPolicy {
    type Err = BasketError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_match" | "first" => Ok(Self::FirstMatch),
            "best_match" | "best" => Ok(Self::BestMatch),
            other => Err(BasketError::Config(format!(
                "unsupported substitution policy `{other}` (expected first_match|best_match)"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = BasketError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(BasketError::Config(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub substitution_policy: Option<SubstitutionPolicy>,
    pub max_budget: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    engine: Option<EnginePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    eco_weight: Option<f64>,
    social_weight: Option<f64>,
    elasticity: Option<f64>,
    max_budget: Option<u64>,
    max_items: Option<usize>,
    substitution_policy: Option<SubstitutionPolicy>,
    reject_zero_budget: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Load defaults, then the TOML file, then `ECO_BASKET_*` variables, then overrides.
    pub fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();

        match resolve_config_path(config_path) {
            Some(path) => config.apply_patch(read_patch(&path)?),
            None => {
                if let Some(path) = config_path {
                    return Err(BasketError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        }

        config.apply_env_overrides()?;
        config.apply_overrides(overrides);
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document on top of the defaults (no environment lookup).
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|e| BasketError::Config(format!("could not parse config: {e}")))?;
        let mut config = Self::default();
        config.apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(engine) = patch.engine {
            if let Some(eco_weight) = engine.eco_weight {
                self.engine.eco_weight = eco_weight;
            }
            if let Some(social_weight) = engine.social_weight {
                self.engine.social_weight = social_weight;
            }
            if let Some(elasticity) = engine.elasticity {
                self.engine.elasticity = elasticity;
            }
            if let Some(max_budget) = engine.max_budget {
                self.engine.max_budget = max_budget;
            }
            if let Some(max_items) = engine.max_items {
                self.engine.max_items = max_items;
            }
            if let Some(policy) = engine.substitution_policy {
                self.engine.substitution_policy = policy;
            }
            if let Some(reject) = engine.reject_zero_budget {
                self.engine.reject_zero_budget = reject;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = read_env("ECO_WEIGHT") {
            self.engine.eco_weight = parse_env("ECO_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("SOCIAL_WEIGHT") {
            self.engine.social_weight = parse_env("SOCIAL_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("ELASTICITY") {
            self.engine.elasticity = parse_env("ELASTICITY", &value)?;
        }
        if let Some(value) = read_env("MAX_BUDGET") {
            self.engine.max_budget = parse_env("MAX_BUDGET", &value)?;
        }
        if let Some(value) = read_env("MAX_ITEMS") {
            self.engine.max_items = parse_env("MAX_ITEMS", &value)?;
        }
        if let Some(value) = read_env("SUBSTITUTION_POLICY") {
            self.engine.substitution_policy = value.parse()?;
        }
        if let Some(value) = read_env("REJECT_ZERO_BUDGET") {
            self.engine.reject_zero_budget = parse_env("REJECT_ZERO_BUDGET", &value)?;
        }
        if let Some(value) = read_env("LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(policy) = overrides.substitution_policy {
            self.engine.substitution_policy = policy;
        }
        if let Some(max_budget) = overrides.max_budget {
            self.engine.max_budget = max_budget;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(BasketError::Config(format!(
                "logging.level `{}` is not a valid level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }

    [
        PathBuf::from(CONFIG_FILE_NAME),
        Path::new("config").join(CONFIG_FILE_NAME),
    ]
    .into_iter()
    .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch> {
    let raw = fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| {
        BasketError::Config(format!("could not parse config file `{}`: {e}", path.display()))
    })
}

fn read_env(key: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{key}"))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        BasketError::Config(format!(
            "invalid environment override for `{ENV_PREFIX}{key}`: `{value}`"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.eco_weight, 0.6);
        assert_eq!(config.engine.social_weight, 0.4);
        assert_eq!(config.engine.elasticity, 0.5);
        assert_eq!(config.engine.substitution_policy, SubstitutionPolicy::FirstMatch);
    }

    #[test]
    fn test_toml_patch_overrides_defaults() {
        let raw = r#"
            [engine]
            eco_weight = 0.5
            social_weight = 0.5
            substitution_policy = "best_match"

            [logging]
            level = "debug"
            format = "json"
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.engine.eco_weight, 0.5);
        assert_eq!(config.engine.substitution_policy, SubstitutionPolicy::BestMatch);
        assert_eq!(config.engine.max_budget, DEFAULT_MAX_BUDGET);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let raw = "[engine]\neco_weight = 0.7\nsocial_weight = 0.7\n";
        assert!(matches!(AppConfig::from_toml_str(raw), Err(BasketError::Config(_))));
    }

    #[test]
    fn test_elasticity_range() {
        let mut engine = EngineConfig::default();
        engine.elasticity = 0.0;
        assert!(engine.validate().is_err());
        engine.elasticity = 1.0;
        assert!(engine.validate().is_ok());
        engine.elasticity = 1.5;
        assert!(engine.validate().is_err());
    }

    #[test]
    fn test_max_budget_has_upper_bound() {
        let raw = "[engine]\nmax_budget = 9223372036854775807\n";
        assert!(matches!(AppConfig::from_toml_str(raw), Err(BasketError::Config(_))));

        let raw = format!("[engine]\nmax_budget = {MAX_BUDGET_LIMIT}\n");
        assert!(AppConfig::from_toml_str(&raw).is_ok());

        let raw = "[engine]\nmax_budget = 0\n";
        assert!(AppConfig::from_toml_str(raw).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let raw = "[logging]\nlevel = \"loud\"\n";
        assert!(AppConfig::from_toml_str(raw).is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "best-match".parse::<SubstitutionPolicy>().unwrap(),
            SubstitutionPolicy::BestMatch
        );
        assert_eq!(
            "first".parse::<SubstitutionPolicy>().unwrap(),
            SubstitutionPolicy::FirstMatch
        );
        assert!("random".parse::<SubstitutionPolicy>().is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let result = AppConfig::load(
            Some(Path::new("/nonexistent/eco_basket.toml")),
            ConfigOverrides::default(),
        );
        assert!(matches!(result, Err(BasketError::Config(_))));
    }
}
