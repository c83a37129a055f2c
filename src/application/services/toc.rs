//! ToC file service
//!
//! Loads and saves ToC files and answers path lookups.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::format::{self, Format};
use crate::application::{ApplicationError, ApplicationResult, ResultPathExt};
use crate::domain::{DomainError, TocArena, TocDocument};
use crate::infrastructure::traits::FileSystem;

/// Service for reading, writing and querying ToC files.
pub struct TocService {
    fs: Arc<dyn FileSystem>,
    default_format: Option<Format>,
}

impl TocService {
    /// Create a new ToC service.
    ///
    /// `default_format` applies when neither an explicit format nor the file
    /// extension determines one.
    pub fn new(fs: Arc<dyn FileSystem>, default_format: Option<Format>) -> Self {
        Self { fs, default_format }
    }

    /// Explicit format, else file extension, else the configured default.
    pub fn resolve_format(&self, path: &Path, explicit: Option<Format>) -> ApplicationResult<Format> {
        explicit
            .or_else(|| Format::from_path(path))
            .or(self.default_format)
            .ok_or_else(|| ApplicationError::UnknownFormat(path.to_path_buf()))
    }

    /// Read and validate a ToC file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path, explicit: Option<Format>) -> ApplicationResult<TocDocument> {
        let format = self.resolve_format(path, explicit)?;
        debug!("load: {} as {}", path.display(), format);

        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read toc", path)?;
        format::parse(&text, format)
    }

    /// Serialize a document and write it to `path`.
    #[instrument(level = "debug", skip(self, doc))]
    pub fn save(&self, doc: &TocDocument, path: &Path, format: Format) -> ApplicationResult<()> {
        let text = format::serialize(doc, format)?;
        self.fs
            .write(path, &text)
            .with_path_context("write toc", path)
    }

    /// Titles leading from the top level to the page with `path`.
    #[instrument(level = "debug", skip(self, doc))]
    pub fn breadcrumbs(&self, doc: &TocDocument, path: &str) -> ApplicationResult<Vec<String>> {
        let arena = TocArena::from_document(doc);
        let idx = arena
            .find_by_path(path)
            .ok_or_else(|| DomainError::PathNotFound(path.to_string()))?;
        Ok(arena.breadcrumbs(idx))
    }
}
