//! Configuration system for brierboard.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod brierboard_config;
pub mod fixed_effects_config;
pub mod leaderboard_config;
pub mod simulation_config;
pub mod sota_config;
pub mod source_config;
pub mod variant_config;

pub use brierboard_config::{BrierboardConfig, CliOverrides};
pub use fixed_effects_config::FixedEffectsConfig;
pub use leaderboard_config::{LeaderboardConfig, OverallPolicy};
pub use simulation_config::{CiMethod, SimulationConfig};
pub use sota_config::SotaConfig;
pub use source_config::SourceConfig;
pub use variant_config::VariantConfig;
