//! Top-level brierboard configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CiMethod, FixedEffectsConfig, LeaderboardConfig, OverallPolicy, SimulationConfig,
    SotaConfig, SourceConfig, VariantConfig,
};
use crate::errors::ConfigError;

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "brierboard.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BRIERBOARD_*`)
/// 3. Project config (`brierboard.toml`, or an explicit file)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BrierboardConfig {
    pub leaderboard: LeaderboardConfig,
    pub fixed_effects: FixedEffectsConfig,
    pub simulation: SimulationConfig,
    pub sota: SotaConfig,
    pub sources: SourceConfig,
    pub variants: Vec<VariantConfig>,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub replicates: Option<u32>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub ci_method: Option<CiMethod>,
    pub overall_policy: Option<OverallPolicy>,
    pub baseline_model: Option<String>,
}

impl BrierboardConfig {
    /// Load configuration, reading `brierboard.toml` from `root` when present.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let file = project_config_path.exists().then_some(project_config_path.as_path());
        Self::resolve(file, cli_overrides)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::resolve(Some(path), cli_overrides)
    }

    fn resolve(file: Option<&Path>, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = file {
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &BrierboardConfig) -> Result<(), ConfigError> {
        if let Some(delay) = config.leaderboard.inclusion_delay_days {
            if delay < 0 {
                return Err(invalid("leaderboard.inclusion_delay_days", "must be >= 0"));
            }
        }
        if let Some(pct) = config.leaderboard.imputed_cutoff_pct {
            if !(0.0..=100.0).contains(&pct) {
                return Err(invalid(
                    "leaderboard.imputed_cutoff_pct",
                    "must be between 0 and 100",
                ));
            }
        }
        if let Some(days) = config.leaderboard.model_release_cutoff_days {
            if days <= 0 {
                return Err(invalid("leaderboard.model_release_cutoff_days", "must be > 0"));
            }
        }
        if let Some(tol) = config.fixed_effects.tolerance {
            if !(tol > 0.0 && tol.is_finite()) {
                return Err(invalid("fixed_effects.tolerance", "must be a positive number"));
            }
        }
        if config.fixed_effects.max_iterations == Some(0) {
            return Err(invalid("fixed_effects.max_iterations", "must be greater than 0"));
        }
        if config.simulation.replicates == Some(0) {
            return Err(invalid("simulation.replicates", "must be greater than 0"));
        }
        if let Some(tol) = config.sota.tolerance {
            if !(tol >= 0.0 && tol.is_finite()) {
                return Err(invalid("sota.tolerance", "must be >= 0"));
            }
        }
        if config.sota.projection_horizon_years == Some(0) {
            return Err(invalid("sota.projection_horizon_years", "must be greater than 0"));
        }
        let mut names = std::collections::BTreeSet::new();
        for variant in &config.variants {
            if variant.name.trim().is_empty() {
                return Err(invalid("variants.name", "must not be empty"));
            }
            if !names.insert(variant.name.as_str()) {
                return Err(invalid(
                    "variants.name",
                    &format!("duplicate variant {:?}", variant.name),
                ));
            }
        }
        Ok(())
    }

    /// Configured variants, or `baseline` and `tournament` when none are configured.
    pub fn effective_variants(&self) -> Vec<VariantConfig> {
        if self.variants.is_empty() {
            vec![VariantConfig::baseline(), VariantConfig::tournament()]
        } else {
            self.variants.clone()
        }
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut BrierboardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BrierboardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut BrierboardConfig, other: &BrierboardConfig) {
        // Leaderboard
        if other.leaderboard.inclusion_delay_days.is_some() {
            base.leaderboard.inclusion_delay_days = other.leaderboard.inclusion_delay_days;
        }
        if other.leaderboard.overall_policy.is_some() {
            base.leaderboard.overall_policy = other.leaderboard.overall_policy;
        }
        if other.leaderboard.imputed_cutoff_pct.is_some() {
            base.leaderboard.imputed_cutoff_pct = other.leaderboard.imputed_cutoff_pct;
        }
        if other.leaderboard.model_release_cutoff_days.is_some() {
            base.leaderboard.model_release_cutoff_days =
                other.leaderboard.model_release_cutoff_days;
        }
        if other.leaderboard.synthesize_references.is_some() {
            base.leaderboard.synthesize_references = other.leaderboard.synthesize_references;
        }
        if other.leaderboard.oracles.is_some() {
            base.leaderboard.oracles = other.leaderboard.oracles;
        }

        // Fixed effects
        if other.fixed_effects.tolerance.is_some() {
            base.fixed_effects.tolerance = other.fixed_effects.tolerance;
        }
        if other.fixed_effects.max_iterations.is_some() {
            base.fixed_effects.max_iterations = other.fixed_effects.max_iterations;
        }

        // Simulation
        if other.simulation.replicates.is_some() {
            base.simulation.replicates = other.simulation.replicates;
        }
        if other.simulation.seed.is_some() {
            base.simulation.seed = other.simulation.seed;
        }
        if other.simulation.threads.is_some() {
            base.simulation.threads = other.simulation.threads;
        }
        if other.simulation.ci_method.is_some() {
            base.simulation.ci_method = other.simulation.ci_method;
        }

        // SOTA
        if other.sota.tolerance.is_some() {
            base.sota.tolerance = other.sota.tolerance;
        }
        if other.sota.projection_horizon_years.is_some() {
            base.sota.projection_horizon_years = other.sota.projection_horizon_years;
        }
        if other.sota.baseline_model.is_some() {
            base.sota.baseline_model = other.sota.baseline_model.clone();
        }

        // Sources
        if !other.sources.dataset.is_empty() {
            base.sources.dataset = other.sources.dataset.clone();
        }
        if !other.sources.market.is_empty() {
            base.sources.market = other.sources.market.clone();
        }

        // Variants
        if !other.variants.is_empty() {
            base.variants = other.variants.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BRIERBOARD_SIMULATION_REPLICATES`, `BRIERBOARD_LEADERBOARD_OVERALL_POLICY`, etc.
    fn apply_env_overrides(config: &mut BrierboardConfig) {
        if let Ok(val) = std::env::var("BRIERBOARD_SIMULATION_REPLICATES") {
            if let Ok(v) = val.parse::<u32>() {
                config.simulation.replicates = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_SIMULATION_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.simulation.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_SIMULATION_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.simulation.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_SIMULATION_CI_METHOD") {
            if let Ok(v) = val.parse::<CiMethod>() {
                config.simulation.ci_method = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_LEADERBOARD_INCLUSION_DELAY_DAYS") {
            if let Ok(v) = val.parse::<i64>() {
                config.leaderboard.inclusion_delay_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_LEADERBOARD_OVERALL_POLICY") {
            if let Ok(v) = val.parse::<OverallPolicy>() {
                config.leaderboard.overall_policy = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BRIERBOARD_SOTA_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.sota.tolerance = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BrierboardConfig, cli: &CliOverrides) {
        if let Some(v) = cli.replicates {
            config.simulation.replicates = Some(v);
        }
        if let Some(v) = cli.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = cli.threads {
            config.simulation.threads = Some(v);
        }
        if let Some(v) = cli.ci_method {
            config.simulation.ci_method = Some(v);
        }
        if let Some(v) = cli.overall_policy {
            config.leaderboard.overall_policy = Some(v);
        }
        if let Some(ref v) = cli.baseline_model {
            config.sota.baseline_model = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
