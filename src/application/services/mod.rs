//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the FileSystem boundary trait but are themselves
//! concrete structs, not traits.

mod links;
mod toc;

pub use links::{BrokenLink, LinkReport, LinkService};
pub use toc::TocService;
