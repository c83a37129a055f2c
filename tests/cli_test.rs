//! Argument parsing and command exit codes

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use tocnav::application::services::TocService;
use tocnav::application::{Format, RenderFormat};
use tocnav::cli::{execute_command, Cli, Commands};
use tocnav::exitcode;
use tocnav::infrastructure::traits::RealFileSystem;
use tocnav::util::testing;

fn resource(name: &str) -> String {
    testing::resource_path(name)
        .to_string_lossy()
        .into_owned()
}

fn run(args: &[&str]) -> Result<(), i32> {
    testing::init_test_setup();
    let cli = Cli::try_parse_from(args).unwrap();
    execute_command(&cli).map_err(|e| e.exit_code())
}

#[test]
fn given_render_args_when_parsing_then_fields_set() {
    let cli = Cli::try_parse_from([
        "tocnav", "-vv", "render", "_toc.yaml", "--to", "html", "--base-url", "/docs",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    match cli.command {
        Some(Commands::Render {
            input, to, base_url, output,
        }) => {
            assert_eq!(input.file, PathBuf::from("_toc.yaml"));
            assert_eq!(to, RenderFormat::Html);
            assert_eq!(base_url.as_deref(), Some("/docs"));
            assert!(output.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_unknown_convert_target_when_parsing_then_rejected() {
    let result = Cli::try_parse_from(["tocnav", "convert", "_toc.yaml", "--to", "xml"]);
    assert!(result.is_err());
}

#[rstest]
#[case::valid(&["tocnav", "check", "{api}"], Ok(()))]
#[case::strict_warning(&["tocnav", "check", "--strict", "{api}"], Err(exitcode::DATAERR))]
#[case::invalid(&["tocnav", "check", "{invalid}"], Err(exitcode::DATAERR))]
#[case::duplicate(&["tocnav", "check", "{duplicate}"], Err(exitcode::DATAERR))]
#[case::missing(&["tocnav", "tree", "{missing}"], Err(exitcode::NOINPUT))]
#[case::find(&["tocnav", "find", "{api}", "/ranking/api_docs/python/tfr/data"], Ok(()))]
#[case::find_unknown(&["tocnav", "find", "{api}", "/nowhere"], Err(exitcode::DATAERR))]
#[case::stats(&["tocnav", "stats", "{api}"], Ok(()))]
#[case::paths(&["tocnav", "paths", "{api}"], Ok(()))]
#[case::no_command(&["tocnav"], Err(exitcode::USAGE))]
fn given_command_when_executing_then_exit_code(
    #[case] args: &[&str],
    #[case] expected: Result<(), i32>,
) {
    let api = resource("_toc.yaml");
    let invalid = resource("invalid_toc.yaml");
    let duplicate = resource("duplicate_toc.yaml");
    let missing = resource("missing_toc.yaml");
    let args: Vec<&str> = args
        .iter()
        .map(|a| match *a {
            "{api}" => api.as_str(),
            "{invalid}" => invalid.as_str(),
            "{duplicate}" => duplicate.as_str(),
            "{missing}" => missing.as_str(),
            other => other,
        })
        .collect();

    assert_eq!(run(&args), expected);
}

#[test]
fn given_unknown_extension_when_loading_then_usage_error() {
    let temp = TempDir::new().unwrap();
    let file = testing::write_toc(temp.path(), "toc.txt", "toc: []\n");
    let file = file.to_string_lossy().into_owned();

    assert_eq!(run(&["tocnav", "stats", &file]), Err(exitcode::USAGE));
    assert_eq!(run(&["tocnav", "stats", "--format", "yaml", &file]), Ok(()));
}

#[rstest]
#[case::json("json", "nested/toc.json", Format::Json)]
#[case::toml("toml", "toc.toml", Format::Toml)]
#[case::yaml("yaml", "copy.yml", Format::Yaml)]
fn given_yaml_when_converting_to_file_then_equivalent(
    #[case] target: &str,
    #[case] file_name: &str,
    #[case] format: Format,
) {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join(file_name);
    let api = resource("_toc.yaml");

    run(&["tocnav", "convert", &api, "--to", target, "-o", &out.to_string_lossy()]).unwrap();

    let service = TocService::new(Arc::new(RealFileSystem), None);
    let original = service.load(&PathBuf::from(&api), None).unwrap();
    let converted = service.load(&out, None).unwrap();
    assert_eq!(service.resolve_format(&out, None).unwrap(), format);
    assert_eq!(converted, original);
}

#[test]
fn given_html_target_when_rendering_then_nav_menu_written() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("nav.html");
    let api = resource("_toc.yaml");

    run(&[
        "tocnav", "render", &api, "--to", "html", "--base-url", "https://www.tensorflow.org/",
        "-o", &out.to_string_lossy(),
    ])
    .unwrap();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<nav class=\"toc\">\n"));
    assert!(html.contains(
        "<a href=\"https://www.tensorflow.org/ranking/api_docs/python/tfr/data\">Overview</a>"
    ));
    assert!(html.contains("<li><span>utils</span></li>"));
    assert!(html.trim_end().ends_with("</nav>"));
}

#[test]
fn given_render_output_when_executing_then_markdown_written() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("nav.md");
    let api = resource("_toc.yaml");

    run(&[
        "tocnav", "render", &api, "--base-url", "https://www.tensorflow.org", "-o",
        &out.to_string_lossy(),
    ])
    .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("- **tfr**\n"));
    assert!(text.contains(
        "[SoftmaxLoss](https://www.tensorflow.org/ranking/api_docs/python/tfr/keras/losses/SoftmaxLoss)"
    ));
}

#[test]
fn given_docs_root_when_checking_links_then_broken_reported() {
    let temp = TempDir::new().unwrap();
    let toc = testing::write_toc(
        temp.path(),
        "_toc.yaml",
        "toc:\n- title: Home\n  path: /\n- title: Guide\n  path: /guide\n",
    );
    std::fs::create_dir_all(temp.path().join("docs")).unwrap();
    std::fs::write(temp.path().join("docs/index.md"), "# home\n").unwrap();
    let root = temp.path().join("docs");
    let toc = toc.to_string_lossy().into_owned();
    let root = root.to_string_lossy().into_owned();

    assert_eq!(
        run(&["tocnav", "links", &toc, "--root", &root]),
        Err(exitcode::DATAERR)
    );

    std::fs::write(temp.path().join("docs/guide.md"), "# guide\n").unwrap();
    assert_eq!(run(&["tocnav", "links", &toc, "--root", &root]), Ok(()));
}

#[rstest]
#[case::with_orphans(false)]
#[case::no_orphans(true)]
fn given_unreferenced_source_when_checking_links_then_orphans_never_fail(#[case] no_orphans: bool) {
    let temp = TempDir::new().unwrap();
    let toc = testing::write_toc(temp.path(), "_toc.yaml", "toc:\n- title: Home\n  path: /\n");
    testing::write_toc(&temp.path().join("docs"), "index.md", "# home\n");
    testing::write_toc(&temp.path().join("docs"), "draft.md", "# draft\n");
    let toc = toc.to_string_lossy().into_owned();
    let root = temp.path().join("docs").to_string_lossy().into_owned();

    let mut args = vec!["tocnav", "links", toc.as_str(), "--root", root.as_str()];
    if no_orphans {
        args.push("--no-orphans");
    }
    let cli = Cli::try_parse_from(&args).unwrap();
    match &cli.command {
        Some(Commands::Links { no_orphans: flag, .. }) => assert_eq!(*flag, no_orphans),
        other => panic!("unexpected command: {:?}", other),
    }

    assert_eq!(run(&args), Ok(()));
}
