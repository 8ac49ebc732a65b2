//! Benchmark infrastructure implementations

mod random_synthesizer;

pub use random_synthesizer::{RandomMetricSynthesizer, SynthesizerConfig};
