//! Benchmark service - drives models through the mock upload and benchmark pipeline

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::config::BenchmarkConfig;
use crate::domain::benchmark::MetricSynthesizer;
use crate::domain::registry::ModelStore;
use crate::domain::{DomainError, ModelFormat, ModelId, ModelRecord, ModelStatus};
use crate::infrastructure::observability::{record_benchmark, record_model_registered};

/// Benchmark service configuration
#[derive(Debug, Clone)]
pub struct BenchmarkServiceConfig {
    /// Simulated upload time before benchmarking starts
    pub upload_delay: Duration,
}

impl Default for BenchmarkServiceConfig {
    fn default() -> Self {
        Self {
            upload_delay: Duration::from_millis(2000),
        }
    }
}

impl From<&BenchmarkConfig> for BenchmarkServiceConfig {
    fn from(config: &BenchmarkConfig) -> Self {
        Self {
            upload_delay: config.upload_delay(),
        }
    }
}

/// A submitted model and its background pipeline
#[derive(Debug)]
pub struct BenchmarkJob {
    pub record: ModelRecord,
    pub handle: JoinHandle<()>,
}

impl BenchmarkJob {
    /// Wait for the pipeline to post its final update
    pub async fn wait(self) -> ModelId {
        let id = self.record.id().clone();

        if let Err(e) = self.handle.await {
            error!(model_id = %id, error = %e, "Benchmark task panicked");
        }

        id
    }
}

/// Trait for benchmark service (for dynamic dispatch in AppState)
#[async_trait]
pub trait BenchmarkServiceTrait: Send + Sync + Debug {
    /// Register a model file and start its pipeline in the background
    async fn submit(&self, name: &str, size: u64) -> Result<BenchmarkJob, DomainError>;
}

/// Benchmark service implementation
pub struct BenchmarkService<S: ModelStore> {
    store: Arc<S>,
    synthesizer: Arc<dyn MetricSynthesizer>,
    config: BenchmarkServiceConfig,
}

impl<S: ModelStore + 'static> BenchmarkService<S> {
    pub fn new(store: Arc<S>, synthesizer: Arc<dyn MetricSynthesizer>) -> Self {
        Self::with_config(store, synthesizer, BenchmarkServiceConfig::default())
    }

    pub fn with_config(
        store: Arc<S>,
        synthesizer: Arc<dyn MetricSynthesizer>,
        config: BenchmarkServiceConfig,
    ) -> Self {
        Self {
            store,
            synthesizer,
            config,
        }
    }
}

impl<S: ModelStore> std::fmt::Debug for BenchmarkService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkService")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl<S: ModelStore + 'static> BenchmarkServiceTrait for BenchmarkService<S> {
    #[instrument(skip(self))]
    async fn submit(&self, name: &str, size: u64) -> Result<BenchmarkJob, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("Model file name cannot be empty"));
        }

        let file_type = ModelFormat::from_filename(name);
        let record = self.store.register(name, file_type, size).await;
        record_model_registered(file_type);

        info!(
            model_id = %record.id(),
            file_type = %file_type,
            size,
            "Registered model for benchmarking"
        );

        let handle = tokio::spawn(run_pipeline(
            self.store.clone(),
            self.synthesizer.clone(),
            record.id().clone(),
            file_type,
            size,
            self.config.upload_delay,
        ));

        Ok(BenchmarkJob { record, handle })
    }
}

/// Upload, benchmark and record the outcome for one model
fn run_pipeline<S: ModelStore + 'static>(
    store: Arc<S>,
    synthesizer: Arc<dyn MetricSynthesizer>,
    id: ModelId,
    file_type: ModelFormat,
    size: u64,
    upload_delay: Duration,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        tokio::time::sleep(upload_delay).await;

        if !advance(store.as_ref(), &id, ModelStatus::Uploaded, None).await {
            return;
        }
        if !advance(store.as_ref(), &id, ModelStatus::Benchmarking, None).await {
            return;
        }

        let started = Instant::now();
        let outcome = synthesizer.synthesize(file_type, size).await;
        let elapsed = started.elapsed();

        match outcome {
            Ok(metrics) => {
                record_benchmark(file_type, true, elapsed);

                if store.set_metrics(&id, metrics).await {
                    info!(
                        model_id = %id,
                        accuracy = metrics.accuracy,
                        inference_time_ms = metrics.inference_time,
                        "Benchmark completed"
                    );
                } else {
                    debug!(model_id = %id, "Model removed before metrics were recorded");
                }
            }
            Err(e) => {
                record_benchmark(file_type, false, elapsed);
                warn!(model_id = %id, error = %e, "Benchmark failed");
                advance(store.as_ref(), &id, ModelStatus::Failed, Some(e.to_string())).await;
            }
        }
    })
}

/// Returns false when the pipeline should stop
async fn advance<S: ModelStore>(
    store: &S,
    id: &ModelId,
    status: ModelStatus,
    error: Option<String>,
) -> bool {
    match store.set_status(id, status, error).await {
        Ok(true) => {
            debug!(model_id = %id, status = %status, "Model status updated");
            true
        }
        Ok(false) => {
            debug!(model_id = %id, status = %status, "Model removed, stopping pipeline");
            false
        }
        Err(e) => {
            error!(model_id = %id, error = %e, "Failed to update model status");
            false
        }
    }
}
