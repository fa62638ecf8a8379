//! Chunked, retrying access to the resolution service

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::QuerySettings;
use crate::domain::{DataSource, ResponseRecord};
use crate::infrastructure::traits::{BatchQueryClient, TransportError};

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            wait: Duration::from_secs(600),
        }
    }
}

impl RetryPolicy {
    /// Run `operation` until it succeeds or the attempts are used up.
    ///
    /// Returns `None` once the budget is exhausted.
    pub fn run<T, F>(&self, operation_name: &str, mut operation: F) -> Option<T>
    where
        F: FnMut() -> Result<T, TransportError>,
    {
        let attempts = self.max_attempts.max(1);
        for attempt in 1..=attempts {
            match operation() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = operation_name, attempt, "succeeded after retry");
                    }
                    return Some(value);
                }
                Err(e) if attempt < attempts => {
                    warn!(
                        operation = operation_name,
                        attempt,
                        wait_secs = self.wait.as_secs(),
                        "request failed, retrying: {e}"
                    );
                    if !self.wait.is_zero() {
                        thread::sleep(self.wait);
                    }
                }
                Err(e) => {
                    error!(
                        operation = operation_name,
                        attempt, "giving up after {attempts} attempts: {e}"
                    );
                }
            }
        }
        None
    }
}

/// Sends batches of names to a [`BatchQueryClient`].
pub struct QueryService {
    client: Arc<dyn BatchQueryClient>,
    policy: RetryPolicy,
    chunk_size: usize,
    parallel: bool,
}

impl QueryService {
    pub fn new(client: Arc<dyn BatchQueryClient>, settings: &QuerySettings) -> Self {
        Self {
            client,
            policy: RetryPolicy {
                max_attempts: settings.max_attempts,
                wait: settings.retry_wait(),
            },
            chunk_size: settings.chunk_size.max(1),
            parallel: settings.parallel,
        }
    }

    /// Data sources offered by the service.
    pub fn data_sources(&self) -> ApplicationResult<Vec<DataSource>> {
        self.policy
            .run("data sources", || self.client.data_sources())
            .ok_or_else(|| {
                ApplicationError::DataSourcesUnavailable(format!(
                    "no answer after {} attempts",
                    self.policy.max_attempts
                ))
            })
    }

    /// One chunk, retried; `None` when the service never answered.
    pub fn query_chunk(&self, terms: &[String], data_source_ids: &[u32]) -> Option<Vec<ResponseRecord>> {
        self.policy
            .run("query", || self.client.query(terms, data_source_ids))
    }

    /// Query `terms` chunk by chunk. Chunks that fail contribute no records.
    pub fn query(&self, terms: &[String], data_source_ids: &[u32]) -> Vec<ResponseRecord> {
        let chunks: Vec<&[String]> = terms.chunks(self.chunk_size).collect();
        let total = terms.len();

        let results: Vec<Option<Vec<ResponseRecord>>> = if self.parallel && chunks.len() > 1 {
            chunks
                .par_iter()
                .map(|chunk| self.query_chunk(chunk, data_source_ids))
                .collect()
        } else {
            chunks
                .iter()
                .enumerate()
                .map(|(i, chunk)| {
                    let lower = i * self.chunk_size;
                    info!("Querying [{}] to [{}] of [{}]", lower, lower + chunk.len(), total);
                    self.query_chunk(chunk, data_source_ids)
                })
                .collect()
        };

        results.into_iter().flatten().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            wait: Duration::ZERO,
        }
    }

    #[test]
    fn given_persistent_failure_when_retrying_then_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Option<()> = instant(3).run("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Unavailable("down".into()))
        });
        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn given_transient_failure_when_retrying_then_returns_value() {
        let calls = AtomicU32::new(0);
        let result = instant(6).run("test", || {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(TransportError::Unavailable("busy".into()))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result, Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
