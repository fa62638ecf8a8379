//! Context for failed writes of result files

use std::error::Error;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the attempted action and its target path to a failure.
pub trait OutputContext<T> {
    /// ```ignore
    /// fs.write(&path, &table).output_context("write results", &path)?;
    /// ```
    fn output_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T, E> OutputContext<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn output_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(e),
        })
    }
}
