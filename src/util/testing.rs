//! Helpers shared by unit and integration tests

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Install a test-writer subscriber once per process.
///
/// `RUST_LOG` wins; otherwise this crate logs at debug.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tocnav=debug"));
        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_filter(filter),
            )
            .try_init();
        if installed.is_ok() {
            info!("test logging ready");
        }
    });
}

/// File under `tests/resources`.
pub fn resource_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

/// Write a ToC file into `dir` and return its path.
pub fn write_toc(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(&path, body) {
        panic!("write {}: {}", path.display(), e);
    }
    path
}
