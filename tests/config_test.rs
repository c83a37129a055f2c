//! Layered settings loading from files on disk

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use tocnav::application::{ApplicationError, Format};
use tocnav::config::{EmptySectionPolicy, Settings, LOCAL_CONFIG_NAME};
use tocnav::util::testing;

#[rstest]
fn given_local_config_when_loading_then_overrides_defaults() {
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(LOCAL_CONFIG_NAME),
        r#"
format = "json"

[lint]
empty_sections = "deny"
max_depth = 5

[links]
docs_root = "site/en"
strip_prefix = "/ranking"
extensions = ["ipynb", "!md"]
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path()), None).unwrap();

    assert_eq!(settings.format, Some(Format::Json));
    assert_eq!(settings.lint.empty_sections, EmptySectionPolicy::Deny);
    assert_eq!(settings.lint.max_depth, Some(5));
    assert_eq!(settings.links.docs_root, Some(PathBuf::from("site/en")));
    assert_eq!(settings.links.strip_prefix, "/ranking");
    assert!(settings.links.extensions.contains(&"ipynb".to_string()));
    assert!(!settings.links.extensions.contains(&"md".to_string()));
    assert_eq!(settings.links.index_name, "index");
}

#[rstest]
fn given_explicit_config_when_loading_then_local_file_ignored() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(LOCAL_CONFIG_NAME),
        "[render]\nbase_url = \"https://local.example\"\n",
    )
    .unwrap();
    let explicit = temp.path().join("other.toml");
    fs::write(&explicit, "[render]\nbase_url = \"https://explicit.example\"\n").unwrap();

    let settings = Settings::load(Some(temp.path()), Some(&explicit)).unwrap();

    assert_eq!(settings.render.base_url, "https://explicit.example");
}

#[rstest]
fn given_missing_explicit_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();

    let err = Settings::load(None, Some(&temp.path().join("nope.toml"))).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[rstest]
#[case::bad_syntax("[lint\nempty_sections = \"deny\"\n")]
#[case::bad_policy("[lint]\nempty_sections = \"sometimes\"\n")]
fn given_malformed_local_config_when_loading_then_config_error(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(LOCAL_CONFIG_NAME), content).unwrap();

    let err = Settings::load(Some(temp.path()), None).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[rstest]
fn given_no_config_files_when_loading_then_defaults_apply() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load(Some(temp.path()), None).unwrap();

    assert_eq!(settings.lint.empty_sections, EmptySectionPolicy::Warn);
    assert!(settings.links.docs_root.is_none());
}
