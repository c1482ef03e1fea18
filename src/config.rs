//! Engine configuration.

/// Pattern-miner tunables. Set once at construction and never mutated,
/// so a single miner instance is safe to share across callers.
#[derive(Debug, Clone, Copy)]
pub struct MinerConfig {
    /// Findings with |effect| below this are classified flat and dropped.
    pub flat_threshold: f64,
    /// Reserved for nonlinear classification; stored but not consulted.
    pub nonlinear_threshold: f64,
    /// Safety cap on the number of cohorts a single screen will walk.
    pub max_cohorts: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            flat_threshold: 0.15,
            nonlinear_threshold: 0.60,
            max_cohorts: 30,
        }
    }
}

/// Deployment environment, used only to pick a log format in
/// [`crate::logging::init_logging`]. The engine itself reads no
/// configuration from the environment.
pub fn runtime_environment() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}
