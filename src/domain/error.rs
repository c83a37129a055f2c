//! Domain-level errors (no external dependencies)

use itertools::Itertools;
use thiserror::Error;

use crate::domain::raw::Violation;

/// Domain errors represent violations of the ToC data model.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid toc structure ({} problem(s)): {}", .0.len(), .0.iter().join("; "))]
    Structure(Vec<Violation>),

    #[error("no page with path: {0}")]
    PathNotFound(String),
}
