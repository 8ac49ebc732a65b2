//! Metric synthesis - stands in for a real benchmarking engine

use std::ops::Range;

use async_trait::async_trait;
use rand::Rng;

#[cfg(test)]
use mockall::automock;

use super::error::SynthesisError;
use crate::domain::model::{BenchmarkMetrics, ModelFormat};

/// Uniform range of the base accuracy draw
pub const ACCURACY_RANGE: Range<f64> = 0.85..0.95;

/// Uniform range of the base inference time draw, in milliseconds
pub const INFERENCE_TIME_RANGE: Range<f64> = 10.0..50.0;

/// Memory grows by this many MB per MB of model file, scaled by a draw in [0, 1)
pub const MEMORY_PER_MB_MAX: f64 = 10.0;

/// Baseline memory in MB before the size-dependent term
pub const BASE_MEMORY_MB: f64 = 50.0;

pub const PARAMETERS_DRAW_MAX: f64 = 2.0;

/// Floor of the base parameter count, in millions
pub const MIN_PARAMETERS: f64 = 0.1;

pub const FLOPS_DRAW_MAX: f64 = 5.0;

/// Accuracy never exceeds this after the format multiplier
pub const MAX_ACCURACY: f64 = 0.999;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Produces benchmark metrics for a model file
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetricSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        file_type: ModelFormat,
        size_bytes: u64,
    ) -> Result<BenchmarkMetrics, SynthesisError>;
}

/// Per-format adjustment applied to every synthesized metric
pub fn format_multiplier(file_type: ModelFormat) -> f64 {
    match file_type {
        ModelFormat::Pt => 1.10,
        ModelFormat::H5 => 0.95,
        ModelFormat::Onnx => 1.05,
        ModelFormat::Pb => 0.90,
        ModelFormat::Tflite => 0.80,
        ModelFormat::Other => 1.00,
    }
}

/// Raw random draws a synthesis run is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseDraws {
    /// In [0.85, 0.95)
    pub accuracy: f64,
    /// In [10, 50)
    pub inference_time: f64,
    /// In [0, 10)
    pub memory_factor: f64,
    /// In [0, 2)
    pub parameters: f64,
    /// In [0, 5)
    pub flops: f64,
}

impl BaseDraws {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            accuracy: rng.gen_range(ACCURACY_RANGE),
            inference_time: rng.gen_range(INFERENCE_TIME_RANGE),
            memory_factor: rng.gen_range(0.0..MEMORY_PER_MB_MAX),
            parameters: rng.gen_range(0.0..PARAMETERS_DRAW_MAX),
            flops: rng.gen_range(0.0..FLOPS_DRAW_MAX),
        }
    }
}

/// Turn base draws into final metrics for a file of `size_bytes`
pub fn compute_metrics(file_type: ModelFormat, size_bytes: u64, draws: &BaseDraws) -> BenchmarkMetrics {
    let size_mb = size_bytes as f64 / BYTES_PER_MB;
    let multiplier = format_multiplier(file_type);

    let base_memory = BASE_MEMORY_MB + size_mb * draws.memory_factor;
    let base_parameters = (draws.parameters + size_mb / 10.0).max(MIN_PARAMETERS);
    let base_flops = draws.flops + 1.0;

    BenchmarkMetrics {
        accuracy: (draws.accuracy * multiplier).min(MAX_ACCURACY),
        inference_time: draws.inference_time * multiplier,
        memory_usage: base_memory * multiplier,
        parameters: base_parameters * multiplier,
        flops: base_flops * multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn draws() -> BaseDraws {
        BaseDraws {
            accuracy: 0.9,
            inference_time: 20.0,
            memory_factor: 5.0,
            parameters: 1.0,
            flops: 2.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(format_multiplier(ModelFormat::Pt), 1.10);
        assert_eq!(format_multiplier(ModelFormat::H5), 0.95);
        assert_eq!(format_multiplier(ModelFormat::Onnx), 1.05);
        assert_eq!(format_multiplier(ModelFormat::Pb), 0.90);
        assert_eq!(format_multiplier(ModelFormat::Tflite), 0.80);
        assert_eq!(format_multiplier(ModelFormat::Other), 1.00);
    }

    #[test]
    fn test_onnx_ten_megabytes() {
        let metrics = compute_metrics(ModelFormat::Onnx, 10_485_760, &draws());

        assert_close(metrics.accuracy, 0.9 * 1.05);
        assert_close(metrics.inference_time, 20.0 * 1.05);
        assert_close(metrics.memory_usage, (50.0 + 10.0 * 5.0) * 1.05);
        assert_close(metrics.parameters, (1.0 + 1.0) * 1.05);
        assert_close(metrics.flops, (2.0 + 1.0) * 1.05);
    }

    #[test]
    fn test_accuracy_is_capped() {
        let high = BaseDraws {
            accuracy: 0.949,
            ..draws()
        };

        let metrics = compute_metrics(ModelFormat::Pt, 0, &high);
        assert_eq!(metrics.accuracy, MAX_ACCURACY);
    }

    #[test]
    fn test_parameters_floor_for_tiny_models() {
        let tiny = BaseDraws {
            parameters: 0.0,
            ..draws()
        };

        let metrics = compute_metrics(ModelFormat::Tflite, 0, &tiny);
        assert_close(metrics.parameters, MIN_PARAMETERS * 0.80);
        assert_close(metrics.memory_usage, BASE_MEMORY_MB * 0.80);
    }

    #[test]
    fn test_sampled_metrics_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for file_type in ModelFormat::all() {
            let multiplier = format_multiplier(file_type);

            for size in [0u64, 1, 4096, 10_485_760, 524_288_000] {
                for _ in 0..50 {
                    let metrics = compute_metrics(file_type, size, &BaseDraws::sample(&mut rng));

                    assert!(metrics.accuracy > 0.0 && metrics.accuracy <= MAX_ACCURACY);
                    assert!(metrics.inference_time > 0.0);
                    assert!(metrics.memory_usage > 0.0);
                    assert!(metrics.parameters >= MIN_PARAMETERS * multiplier - 1e-12);
                    assert!(metrics.flops >= multiplier);
                }
            }
        }
    }

    #[test]
    fn test_sample_ranges() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let draws = BaseDraws::sample(&mut rng);
            assert!(ACCURACY_RANGE.contains(&draws.accuracy));
            assert!(INFERENCE_TIME_RANGE.contains(&draws.inference_time));
            assert!((0.0..MEMORY_PER_MB_MAX).contains(&draws.memory_factor));
            assert!((0.0..PARAMETERS_DRAW_MAX).contains(&draws.parameters));
            assert!((0.0..FLOPS_DRAW_MAX).contains(&draws.flops));
        }
    }

    #[tokio::test]
    async fn test_mock_synthesizer_is_substitutable() {
        let mut mock = MockMetricSynthesizer::new();
        mock.expect_synthesize()
            .returning(|file_type, size| Ok(compute_metrics(file_type, size, &draws())));

        let synthesizer: &dyn MetricSynthesizer = &mock;
        let metrics = synthesizer.synthesize(ModelFormat::Other, 0).await.unwrap();

        assert_close(metrics.inference_time, 20.0);
    }
}
