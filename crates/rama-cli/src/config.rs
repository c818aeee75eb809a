use crate::cli::AnalysisOptions;
use crate::error::{CliError, Result};
use ramapp::core::io::table::Delimiter;
use ramapp::engine::config::{AnalysisConfig, AnalysisConfigBuilder, InclusionPolicy};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialAnglesConfig {
    #[serde(rename = "inclusion-policy")]
    inclusion_policy: Option<InclusionPolicy>,
    decimals: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialExecutionConfig {
    parallel: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialDensityConfig {
    #[serde(rename = "bin-size")]
    bin_size: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    delimiter: Option<Delimiter>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    angles: Option<PartialAnglesConfig>,
    execution: Option<PartialExecutionConfig>,
    density: Option<PartialDensityConfig>,
    output: Option<PartialOutputConfig>,
}

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    delimiter: Option<Delimiter>,
}

impl AppConfig {
    /// Delimiter for a table at `path`: the configured one, else inferred
    /// from the extension, else tab.
    pub fn delimiter_for(&self, path: Option<&Path>) -> Delimiter {
        self.delimiter
            .or_else(|| path.and_then(Delimiter::from_extension))
            .unwrap_or_default()
    }
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the config file named in `options`, if any, and merges the CLI overrides.
    pub fn resolve(options: &AnalysisOptions) -> Result<AppConfig> {
        let partial = match &options.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        partial.merge_with_cli(options)
    }

    /// Merges with CLI options. Precedence: explicit flag, then `-S`, then file, then default.
    pub fn merge_with_cli(mut self, options: &AnalysisOptions) -> Result<AppConfig> {
        self.apply_set_values(&options.set_values)?;

        let angles = self.angles.take().unwrap_or_default();
        let execution = self.execution.take().unwrap_or_default();
        let density = self.density.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let mut builder = AnalysisConfigBuilder::new();
        if let Some(policy) = options.policy.or(angles.inclusion_policy) {
            builder = builder.inclusion_policy(policy);
        }
        if let Some(decimals) = options.decimals.or(angles.decimals) {
            builder = builder.decimals(decimals);
        }
        let parallel = if options.no_parallel {
            Some(false)
        } else {
            execution.parallel
        };
        if let Some(parallel) = parallel {
            builder = builder.parallel(parallel);
        }
        if let Some(bin_size) = options.bin_size.or(density.bin_size) {
            builder = builder.density_bin_size(bin_size);
        }

        let analysis = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!(?analysis, "Resolved analysis configuration.");

        Ok(AppConfig {
            analysis,
            delimiter: options.delimiter.or(output.delimiter),
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "angles.inclusion-policy" => {
                    self.angles
                        .get_or_insert_with(Default::default)
                        .inclusion_policy = Some(
                        value_str
                            .parse()
                            .map_err(|e: ramapp::engine::config::ParseInclusionPolicyError| {
                                CliError::Config(e.to_string())
                            })?,
                    );
                }
                "angles.decimals" => {
                    self.angles.get_or_insert_with(Default::default).decimals =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "execution.parallel" => {
                    self.execution.get_or_insert_with(Default::default).parallel =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid boolean value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                "density.bin-size" => {
                    self.density.get_or_insert_with(Default::default).bin_size =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                        })?);
                }
                "output.delimiter" => {
                    self.output.get_or_insert_with(Default::default).delimiter = Some(
                        value_str
                            .parse()
                            .map_err(|e: ramapp::core::io::table::ParseDelimiterError| {
                                CliError::Config(e.to_string())
                            })?,
                    );
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
