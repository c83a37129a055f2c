//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::application::{Format, RenderFormat};

/// Documentation navigation trees: validate, render, look up and convert table-of-contents files
#[derive(Parser, Debug)]
#[command(name = "tocnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (replaces the local .tocnav.toml lookup)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input file plus optional format override, shared by most commands.
#[derive(clap::Args, Debug, Clone)]
pub struct TocInput {
    /// ToC file (yaml, json or toml)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Input format (default: from file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate structure and lint rules
    Check {
        #[command(flatten)]
        input: TocInput,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Show the navigation tree
    Tree {
        #[command(flatten)]
        input: TocInput,
    },

    /// Render a navigation menu
    Render {
        #[command(flatten)]
        input: TocInput,
        /// Output flavour
        #[arg(short, long, value_enum, default_value = "markdown")]
        to: RenderFormat,
        /// Prefix for page links (default: render.base_url)
        #[arg(long)]
        base_url: Option<String>,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List every page path in order
    Paths {
        #[command(flatten)]
        input: TocInput,
    },

    /// Show where a page sits in the tree
    Find {
        #[command(flatten)]
        input: TocInput,
        /// Page path to look up
        path: String,
    },

    /// Convert between yaml, json and toml
    Convert {
        #[command(flatten)]
        input: TocInput,
        /// Target format
        #[arg(short, long, value_enum)]
        to: Format,
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Check page paths against documentation sources
    Links {
        #[command(flatten)]
        input: TocInput,
        /// Docs root directory (default: links.docs_root)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        root: Option<PathBuf>,
        /// Do not report unreferenced source files
        #[arg(long)]
        no_orphans: bool,
    },

    /// Show counts and depth
    Stats {
        #[command(flatten)]
        input: TocInput,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show {
        /// Directory whose .tocnav.toml is merged (default: cwd)
        dir: Option<PathBuf>,
    },

    /// Show config paths
    Path,

    /// Print config template
    Init,
}
