//! Page reference checking
//!
//! Maps every page path to candidate source files under a docs root and
//! reports pages whose source is missing, plus source files no page links to.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, ResultPathExt};
use crate::config::LinksConfig;
use crate::domain::{is_external_path, Location, TocDocument};
use crate::infrastructure::traits::FileSystem;

/// A page whose path resolves to no existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub location: Location,
    pub title: String,
    pub path: String,
    /// Files that were tried, in order
    pub candidates: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub broken: Vec<BrokenLink>,
    /// Source files not referenced by any page, relative to the docs root
    pub orphans: Vec<PathBuf>,
    /// Pages pointing outside the site (absolute URLs), not checked
    pub external: usize,
    /// Pages resolved to an existing file
    pub resolved: usize,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }
}

pub struct LinkService {
    fs: Arc<dyn FileSystem>,
}

/// `path` minus `prefix`, only when the prefix ends on a segment boundary.
fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some(rest) if prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Candidate source files for a page path, most specific first.
pub fn candidates(docs_root: &Path, page_path: &str, config: &LinksConfig) -> Vec<PathBuf> {
    let without_anchor = page_path
        .split(['#', '?'])
        .next()
        .unwrap_or_default();
    let relative = strip_segment_prefix(without_anchor, &config.strip_prefix).trim_matches('/');

    let mut result = Vec::new();
    if relative.is_empty() {
        for ext in &config.extensions {
            result.push(docs_root.join(format!("{}.{}", config.index_name, ext)));
        }
        return result;
    }

    let base = docs_root.join(relative);
    let already_has_ext = config
        .extensions
        .iter()
        .any(|ext| relative.ends_with(&format!(".{}", ext)));
    if already_has_ext {
        result.push(base.clone());
    }
    for ext in &config.extensions {
        result.push(docs_root.join(format!("{}.{}", relative, ext)));
    }
    for ext in &config.extensions {
        result.push(base.join(format!("{}.{}", config.index_name, ext)));
    }
    result
}

impl LinkService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Check all page paths of `doc` against `config.docs_root`.
    ///
    /// A relative docs root is resolved against `base_dir` (the ToC file's directory).
    #[instrument(level = "debug", skip(self, doc, config))]
    pub fn check(
        &self,
        doc: &TocDocument,
        base_dir: &Path,
        config: &LinksConfig,
    ) -> ApplicationResult<LinkReport> {
        let docs_root = match &config.docs_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base_dir.join(root),
            None => {
                return Err(ApplicationError::Config {
                    message: "links.docs_root is not set (use --root)".to_string(),
                })
            }
        };
        if !self.fs.is_dir(&docs_root) {
            return Err(ApplicationError::Config {
                message: format!("docs root is not a directory: {}", docs_root.display()),
            });
        }
        debug!("docs root: {}", docs_root.display());

        let mut report = LinkReport::default();
        let mut referenced: HashSet<PathBuf> = HashSet::new();

        for (location, node) in doc.pages() {
            let Some(path) = node.path() else { continue };
            if is_external_path(path) {
                report.external += 1;
                continue;
            }

            let tried = candidates(&docs_root, path, config);
            match tried.iter().find(|c| self.fs.is_file(c)) {
                Some(found) => {
                    referenced.insert(found.clone());
                    report.resolved += 1;
                }
                None => report.broken.push(BrokenLink {
                    location,
                    title: node.title.clone(),
                    path: path.to_string(),
                    candidates: tried,
                }),
            }
        }

        let files = self
            .fs
            .list_files(&docs_root)
            .with_path_context("scan docs root", &docs_root)?;
        report.orphans = files
            .into_iter()
            .filter(|f| {
                f.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| config.extensions.iter().any(|x| x == e))
            })
            .filter(|f| !referenced.contains(f))
            .map(|f| pathdiff::diff_paths(&f, &docs_root).unwrap_or(f))
            .collect();

        debug!(
            "links: {} resolved, {} broken, {} orphans",
            report.resolved,
            report.broken.len(),
            report.orphans.len()
        );
        Ok(report)
    }
}
