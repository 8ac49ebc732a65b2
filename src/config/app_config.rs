use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub benchmark: BenchmarkConfig,
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

/// Timings and fault injection of the mock benchmark pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Simulated upload time before benchmarking starts
    pub upload_delay_ms: u64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Probability in [0, 1] that a benchmark run fails
    pub failure_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Where the `bench` command writes reports
    pub output_dir: PathBuf,
    /// Completed models required for a comparison report
    pub min_comparison_models: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            upload_delay_ms: 2000,
            min_delay_ms: 1000,
            max_delay_ms: 4000,
            failure_rate: 0.0,
        }
    }
}

impl BenchmarkConfig {
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            min_comparison_models: 2,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let benchmark = &self.benchmark;

        if !(0.0..=1.0).contains(&benchmark.failure_rate) {
            return Err(config::ConfigError::Message(format!(
                "benchmark.failure_rate must be within [0, 1], got {}",
                benchmark.failure_rate
            )));
        }

        if benchmark.min_delay_ms > benchmark.max_delay_ms {
            return Err(config::ConfigError::Message(format!(
                "benchmark.min_delay_ms ({}) exceeds benchmark.max_delay_ms ({})",
                benchmark.min_delay_ms, benchmark.max_delay_ms
            )));
        }

        if self.reports.min_comparison_models == 0 {
            return Err(config::ConfigError::Message(
                "reports.min_comparison_models must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
