//! Benchmark domain - Mock metric synthesis

mod error;
mod synthesizer;

#[cfg(test)]
pub use synthesizer::MockMetricSynthesizer;

pub use error::SynthesisError;
pub use synthesizer::{
    compute_metrics, format_multiplier, BaseDraws, MetricSynthesizer, ACCURACY_RANGE,
    INFERENCE_TIME_RANGE, MAX_ACCURACY, MIN_PARAMETERS,
};
