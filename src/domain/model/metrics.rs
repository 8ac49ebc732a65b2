//! Benchmark metrics value object

use serde::{Deserialize, Serialize};

/// Performance numbers attached to a completed model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Prediction accuracy as a fraction in (0, 1]
    pub accuracy: f64,

    /// Average inference latency in milliseconds
    pub inference_time: f64,

    /// Memory consumption in megabytes
    pub memory_usage: f64,

    /// Parameter count in millions
    pub parameters: f64,

    /// Floating point operations in billions
    pub flops: f64,
}

impl BenchmarkMetrics {
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_percent() {
        let metrics = BenchmarkMetrics {
            accuracy: 0.9125,
            inference_time: 10.0,
            memory_usage: 64.0,
            parameters: 0.5,
            flops: 2.0,
        };

        assert!((metrics.accuracy_percent() - 91.25).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = BenchmarkMetrics {
            accuracy: 0.9,
            inference_time: 12.5,
            memory_usage: 80.0,
            parameters: 1.0,
            flops: 3.0,
        };

        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["inference_time"], 12.5);
        assert_eq!(json["memory_usage"], 80.0);
    }
}
