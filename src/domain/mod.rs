//! Domain layer: the ToC data model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod node;
pub mod raw;

pub use arena::{NodeData, TocArena, TreeNode};
pub use error::DomainError;
pub use node::{is_external_path, Location, NodeKind, TocDocument, TocNode};
pub use raw::{RawDocument, RawNode, Violation, ViolationKind};
