//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, info, instrument};

use crate::application::lint::Linter;
use crate::application::{render, ApplicationError, Format, RenderFormat, TocStats};
use crate::cli::args::{Cli, Commands, ConfigCommands, TocInput};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings};
use crate::domain::{DomainError, TocArena, TocDocument};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Check { input, strict }) => cmd_check(cli, input, *strict),
        Some(Commands::Tree { input }) => cmd_tree(cli, input),
        Some(Commands::Render {
            input,
            to,
            base_url,
            output,
        }) => cmd_render(cli, input, *to, base_url.as_deref(), output.as_deref()),
        Some(Commands::Paths { input }) => cmd_paths(cli, input),
        Some(Commands::Find { input, path }) => cmd_find(cli, input, path),
        Some(Commands::Convert { input, to, output }) => {
            cmd_convert(cli, input, *to, output.as_deref())
        }
        Some(Commands::Links {
            input,
            root,
            no_orphans,
        }) => cmd_links(cli, input, root.as_deref(), *no_orphans),
        Some(Commands::Stats { input }) => cmd_stats(cli, input),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given (see tocnav --help)".to_string(),
        )),
    }
}

/// Directory of the ToC file; `""` for bare file names.
fn toc_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(Path::new(""))
}

fn container_for(cli: &Cli, file: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(toc_dir(file)), cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

fn load(container: &ServiceContainer, input: &TocInput) -> CliResult<TocDocument> {
    Ok(container.toc.load(&input.file, input.format)?)
}

fn write_or_print(container: &ServiceContainer, path: Option<&Path>, text: &str) -> CliResult<()> {
    match path {
        Some(path) => {
            container
                .fs
                .write(path, text)
                .map_err(|e| InfraError::io_at("write", path, e))?;
            output::success(&format!("wrote {}", path.display()));
        }
        None => print!("{}", text),
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_check(cli: &Cli, input: &TocInput, strict: bool) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;

    let doc = match load(&container, input) {
        Ok(doc) => doc,
        Err(CliError::Infra(InfraError::Application(ApplicationError::Domain(
            DomainError::Structure(violations),
        )))) => {
            output::header(&input.file.display());
            for violation in &violations {
                output::failure(violation);
            }
            return Err(CliError::Findings(format!(
                "{}: {} structural problem(s)",
                input.file.display(),
                violations.len()
            )));
        }
        Err(e) => return Err(e),
    };

    let linter = Linter::new(&container.settings.lint)?;
    let report = linter.lint(&doc);
    for finding in &report.findings {
        output::finding(finding);
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    info!("check: {} errors, {} warnings", errors, warnings);

    if errors > 0 || (strict && warnings > 0) {
        return Err(CliError::Findings(format!(
            "{}: {} error(s), {} warning(s)",
            input.file.display(),
            errors,
            warnings
        )));
    }

    output::success(&format!(
        "{}: {} entries, {} warning(s)",
        input.file.display(),
        doc.len(),
        warnings
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, input: &TocInput) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    let name = input
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.file.display().to_string());
    output::info(&render::to_tree(&doc, &name));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_render(
    cli: &Cli,
    input: &TocInput,
    to: RenderFormat,
    base_url: Option<&str>,
    out: Option<&Path>,
) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    let base_url = base_url.unwrap_or(container.settings.render.base_url.as_str());
    write_or_print(&container, out, &render::render(&doc, to, base_url))
}

#[instrument(skip(cli))]
fn cmd_paths(cli: &Cli, input: &TocInput) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    for path in TocArena::from_document(&doc).leaf_nodes() {
        output::info(&path);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_find(cli: &Cli, input: &TocInput, path: &str) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    let trail = container.toc.breadcrumbs(&doc, path)?;
    output::info(&trail.join(" > "));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_convert(cli: &Cli, input: &TocInput, to: Format, out: Option<&Path>) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    match out {
        Some(path) => {
            container.toc.save(&doc, path, to)?;
            output::success(&format!("wrote {} ({})", path.display(), to));
            Ok(())
        }
        None => write_or_print(&container, None, &crate::application::format::serialize(&doc, to)?),
    }
}

#[instrument(skip(cli))]
fn cmd_links(cli: &Cli, input: &TocInput, root: Option<&Path>, no_orphans: bool) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;

    let mut links_config = container.settings.links.clone();
    if let Some(root) = root {
        // Command-line roots are relative to cwd, not to the toc file
        let root: PathBuf = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| InfraError::io("current directory", e))?
                .join(root)
        };
        links_config.docs_root = Some(root);
    }

    let report = container
        .links
        .check(&doc, toc_dir(&input.file), &links_config)?;

    for broken in &report.broken {
        output::failure(&format!(
            "{} {} ({})",
            broken.location, broken.path, broken.title
        ));
        for candidate in &broken.candidates {
            output::detail(&format!("tried {}", candidate.display()));
        }
    }
    if !no_orphans && !report.orphans.is_empty() {
        output::header("Unreferenced sources");
        for orphan in &report.orphans {
            output::warning(&orphan.display());
        }
    }

    if !report.is_clean() {
        return Err(CliError::Findings(format!(
            "{} broken page path(s), {} resolved",
            report.broken.len(),
            report.resolved
        )));
    }
    output::success(&format!(
        "{} pages resolved, {} external",
        report.resolved, report.external
    ));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_stats(cli: &Cli, input: &TocInput) -> CliResult<()> {
    let container = container_for(cli, &input.file)?;
    let doc = load(&container, input)?;
    output::info(&TocStats::of(&doc));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { dir } => {
            let dir = dir.clone().unwrap_or_else(|| PathBuf::from("."));
            let settings = Settings::load(Some(&dir), cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("no global config directory on this platform"),
            }
            output::info(&format!("local:  ./{}", config::LOCAL_CONFIG_NAME));
        }
        ConfigCommands::Init => output::info(&Settings::template()),
    }
    Ok(())
}
