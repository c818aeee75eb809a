use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DECIMALS: u32 = 2;
pub const MAX_DECIMALS: u32 = 6;
pub const DEFAULT_DENSITY_BIN_SIZE: f64 = 2.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Decides which residues produce a backbone [`AngleRecord`](crate::core::models::angles::AngleRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InclusionPolicy {
    /// All three angles present and none rounds to zero.
    #[default]
    Legacy,
    /// All three angles present.
    AllComputed,
    /// At least one angle present.
    AnyComputed,
}

impl InclusionPolicy {
    pub fn admits(&self, phi: Option<f64>, psi: Option<f64>, omega: Option<f64>) -> bool {
        let angles = [phi, psi, omega];
        match self {
            InclusionPolicy::Legacy => angles.iter().all(|a| matches!(a, Some(v) if *v != 0.0)),
            InclusionPolicy::AllComputed => angles.iter().all(Option::is_some),
            InclusionPolicy::AnyComputed => angles.iter().any(Option::is_some),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown inclusion policy '{0}'. Expected one of: legacy, all-computed, any-computed.")]
pub struct ParseInclusionPolicyError(String);

impl FromStr for InclusionPolicy {
    type Err = ParseInclusionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(InclusionPolicy::Legacy),
            "all-computed" => Ok(InclusionPolicy::AllComputed),
            "any-computed" => Ok(InclusionPolicy::AnyComputed),
            _ => Err(ParseInclusionPolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for InclusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InclusionPolicy::Legacy => "legacy",
            InclusionPolicy::AllComputed => "all-computed",
            InclusionPolicy::AnyComputed => "any-computed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub inclusion_policy: InclusionPolicy,
    /// Decimal places kept on backbone angles.
    pub decimals: u32,
    /// Assemble chains concurrently when the `parallel` feature is enabled.
    pub parallel: bool,
    pub density_bin_size: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inclusion_policy: InclusionPolicy::default(),
            decimals: DEFAULT_DECIMALS,
            parallel: true,
            density_bin_size: DEFAULT_DENSITY_BIN_SIZE,
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    inclusion_policy: Option<InclusionPolicy>,
    decimals: Option<u32>,
    parallel: Option<bool>,
    density_bin_size: Option<f64>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inclusion_policy(mut self, policy: InclusionPolicy) -> Self {
        self.inclusion_policy = Some(policy);
        self
    }
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
    pub fn density_bin_size(mut self, bin_size: f64) -> Self {
        self.density_bin_size = Some(bin_size);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();

        let decimals = self.decimals.unwrap_or(defaults.decimals);
        if decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidParameter {
                name: "decimals",
                reason: format!("must be between 0 and {}, got {}", MAX_DECIMALS, decimals),
            });
        }

        let density_bin_size = self.density_bin_size.unwrap_or(defaults.density_bin_size);
        if !(density_bin_size.is_finite() && density_bin_size > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "density_bin_size",
                reason: format!("must be a positive number, got {}", density_bin_size),
            });
        }

        Ok(AnalysisConfig {
            inclusion_policy: self.inclusion_policy.unwrap_or(defaults.inclusion_policy),
            decimals,
            parallel: self.parallel.unwrap_or(defaults.parallel),
            density_bin_size,
        })
    }
}
