//! Randomized metric synthesizer

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument};

use crate::config::BenchmarkConfig;
use crate::domain::benchmark::{compute_metrics, BaseDraws, MetricSynthesizer, SynthesisError};
use crate::domain::model::{BenchmarkMetrics, ModelFormat};

/// Synthesizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizerConfig {
    /// Shortest simulated benchmark duration
    pub min_delay: Duration,
    /// Upper bound (exclusive) of the simulated duration
    pub max_delay: Duration,
    /// Probability in [0, 1] that a run fails
    pub failure_rate: f64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(4000),
            failure_rate: 0.0,
        }
    }
}

impl From<&BenchmarkConfig> for SynthesizerConfig {
    fn from(config: &BenchmarkConfig) -> Self {
        Self {
            min_delay: config.min_delay(),
            max_delay: config.max_delay(),
            failure_rate: config.failure_rate,
        }
    }
}

impl SynthesizerConfig {
    /// Configuration without any simulated delay
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            failure_rate: 0.0,
        }
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    fn sample_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }

        rng.gen_range(self.min_delay..self.max_delay)
    }
}

/// Production synthesizer drawing from the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct RandomMetricSynthesizer {
    config: SynthesizerConfig,
}

impl RandomMetricSynthesizer {
    pub fn new(mut config: SynthesizerConfig) -> Self {
        config.failure_rate = config.failure_rate.clamp(0.0, 1.0);
        Self { config }
    }

    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }
}

#[async_trait]
impl MetricSynthesizer for RandomMetricSynthesizer {
    #[instrument(skip(self), fields(file_type = %file_type))]
    async fn synthesize(
        &self,
        file_type: ModelFormat,
        size_bytes: u64,
    ) -> Result<BenchmarkMetrics, SynthesisError> {
        // ThreadRng is not Send, so finish drawing before the first await
        let (delay, draws, fails) = {
            let mut rng = rand::thread_rng();
            (
                self.config.sample_delay(&mut rng),
                BaseDraws::sample(&mut rng),
                rng.gen_bool(self.config.failure_rate),
            )
        };

        debug!(delay_ms = delay.as_millis() as u64, "Simulating benchmark run");
        tokio::time::sleep(delay).await;

        if fails {
            return Err(SynthesisError::simulated(format!(
                "benchmark of {} model ({} bytes) did not finish",
                file_type.label(),
                size_bytes
            )));
        }

        Ok(compute_metrics(file_type, size_bytes, &draws))
    }
}
