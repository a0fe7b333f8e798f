//! Bounded worker pool for CPU-heavy image jobs.

use std::sync::Arc;
use std::time::Duration;

use pixel_adjust::{AdjustmentParameters, Pipeline, PixelBuffer};
use tokio::sync::Semaphore;

use crate::error::ApiError;

/// Runs blocking image work off the async runtime.
///
/// At most `workers` jobs run at once; further requests wait for a permit.
/// Each job, including the wait, is bounded by the request timeout.
#[derive(Clone)]
pub struct ImageProcessor {
    permits: Arc<Semaphore>,
    workers: usize,
    timeout: Duration,
}

impl ImageProcessor {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        let workers = workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
            timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `job` on the blocking pool once a worker slot is free.
    ///
    /// On timeout the caller gets [`ApiError::Timeout`] while the job keeps
    /// its slot until it finishes.
    pub async fn execute<T, F>(&self, job: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        let permits = self.permits.clone();
        let work = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ApiError::Internal(format!("Worker pool closed: {e}")))?;

            // The permit is held until the job returns, even if the request
            // has already timed out.
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job()
            })
            .await
            .map_err(|e| ApiError::Internal(format!("Processing task failed: {e}")))?
        };

        tokio::time::timeout(self.timeout, work)
            .await
            .map_err(|_| ApiError::Timeout(self.timeout.as_secs()))?
    }

    /// Run the adjustment pipeline for `params` on `buffer`.
    pub async fn run(
        &self,
        buffer: PixelBuffer,
        params: AdjustmentParameters,
    ) -> Result<PixelBuffer, ApiError> {
        self.execute(move || {
            let pipeline = Pipeline::from_params(&params)?;
            Ok(pipeline.run(buffer)?)
        })
        .await
    }
}
