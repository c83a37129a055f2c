//! tocnav: documentation navigation trees
//!
//! A table of contents is a tree of entries, each with a title and either a
//! page `path` or a nested `section`. This crate loads such files (YAML, JSON,
//! TOML), enforces their structure, lints authoring conventions, renders
//! navigation menus, answers path lookups and checks page references against
//! documentation sources.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
