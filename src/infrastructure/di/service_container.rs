//! Service wiring for one command invocation

use std::sync::Arc;

use crate::application::services::{LinkService, TocService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Settings plus the services built on them, sharing one filesystem.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub toc: TocService,
    pub links: LinkService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Wire services onto a given filesystem.
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let toc = TocService::new(Arc::clone(&fs), settings.format);
        let links = LinkService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            toc,
            links,
        }
    }
}
