//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod format;
pub mod lint;
pub mod render;
pub mod services;
pub mod stats;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::ResultPathExt;
pub use format::Format;
pub use lint::{Finding, LintReport, Linter, Rule, Severity};
pub use render::RenderFormat;
pub use stats::TocStats;
