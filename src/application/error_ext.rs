//! Error conversion helpers for fallible I/O and parsing steps
//!
//! Attach the action and the path being processed to any error.

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `Result<T, E>` to `ApplicationResult` with context.
pub trait ResultPathExt<T> {
    /// Add path context to an error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read toc", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T, E> ResultPathExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
