//! Infrastructure: filesystem access and service wiring
//!
//! Services never touch `std::fs` directly; they receive a [`FileSystem`]
//! through the [`ServiceContainer`].

pub mod di;
pub mod error;
pub mod traits;

pub use di::ServiceContainer;
pub use error::InfraError;
pub use traits::{FileSystem, RealFileSystem};
