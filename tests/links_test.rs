//! Page path resolution against a docs tree on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use tocnav::application::services::LinkService;
use tocnav::application::ApplicationError;
use tocnav::config::LinksConfig;
use tocnav::domain::{TocDocument, TocNode};
use tocnav::infrastructure::traits::RealFileSystem;
use tocnav::util::testing;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "# page\n").unwrap();
}

#[fixture]
fn docs() -> TempDir {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("docs");
    touch(&root, "tfr/index.md");
    touch(&root, "tfr/data.md");
    touch(&root, "tfr/keras/losses/SoftmaxLoss.md");
    touch(&root, "tfr/keras/unused.md");
    touch(&root, "tfr/keras/losses/notes.txt");
    temp
}

fn doc() -> TocDocument {
    TocDocument::new(vec![TocNode::section(
        "tfr",
        vec![
            TocNode::page("Overview", "/ranking/api_docs/python/tfr"),
            TocNode::page("data", "/ranking/api_docs/python/tfr/data"),
            TocNode::section(
                "losses",
                vec![
                    TocNode::page(
                        "SoftmaxLoss",
                        "/ranking/api_docs/python/tfr/keras/losses/SoftmaxLoss#top",
                    ),
                    TocNode::page("ListMLELoss", "/ranking/api_docs/python/tfr/keras/losses/ListMLELoss"),
                ],
            ),
            TocNode::page("GitHub", "https://github.com/tensorflow/ranking"),
        ],
    )])
}

fn config(root: &str) -> LinksConfig {
    LinksConfig {
        docs_root: Some(PathBuf::from(root)),
        strip_prefix: "/ranking/api_docs/python".into(),
        ..LinksConfig::default()
    }
}

#[rstest]
fn given_docs_tree_when_checking_then_broken_orphans_and_external(docs: TempDir) {
    let service = LinkService::new(Arc::new(RealFileSystem));

    let report = service.check(&doc(), docs.path(), &config("docs")).unwrap();

    assert_eq!(report.resolved, 3);
    assert_eq!(report.external, 1);
    assert_eq!(report.broken.len(), 1);
    let broken = &report.broken[0];
    assert_eq!(broken.title, "ListMLELoss");
    assert_eq!(broken.location.to_string(), "toc[0].section[2].section[1]");
    assert_eq!(
        broken.candidates,
        vec![
            docs.path().join("docs/tfr/keras/losses/ListMLELoss.md"),
            docs.path().join("docs/tfr/keras/losses/ListMLELoss/index.md"),
        ]
    );
    // notes.txt is not a page source
    assert_eq!(report.orphans, vec![PathBuf::from("tfr/keras/unused.md")]);
    assert!(!report.is_clean());
}

#[rstest]
fn given_absolute_root_when_checking_then_base_dir_ignored(docs: TempDir) {
    let service = LinkService::new(Arc::new(RealFileSystem));
    let root = docs.path().join("docs");
    let config = config(root.to_str().unwrap());

    let report = service
        .check(&doc(), Path::new("/nonexistent"), &config)
        .unwrap();

    assert_eq!(report.resolved, 3);
}

#[rstest]
fn given_missing_root_when_checking_then_config_error(docs: TempDir) {
    let service = LinkService::new(Arc::new(RealFileSystem));

    let err = service
        .check(&doc(), docs.path(), &config("site"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[rstest]
fn given_no_root_configured_when_checking_then_config_error(docs: TempDir) {
    let service = LinkService::new(Arc::new(RealFileSystem));

    let err = service
        .check(&doc(), docs.path(), &LinksConfig::default())
        .unwrap_err();

    assert!(err.to_string().contains("docs_root"));
}
