//! Authoring checks for ToC documents
//!
//! Structural validity is guaranteed by the typed tree; the linter covers the
//! conventions a documentation build expects on top of that.

use std::fmt;

use itertools::Itertools;
use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{EmptySectionPolicy, LintConfig};
use crate::domain::{Location, TocDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    DuplicatePath,
    EmptySection,
    BlankTitle,
    BlankPath,
    PathPattern,
    MaxDepth,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::DuplicatePath => "duplicate-path",
            Rule::EmptySection => "empty-section",
            Rule::BlankTitle => "blank-title",
            Rule::BlankPath => "blank-path",
            Rule::PathPattern => "path-pattern",
            Rule::MaxDepth => "max-depth",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub rule: Rule,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity, self.rule, self.location, self.message
        )
    }
}

/// Findings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub findings: Vec<Finding>,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

pub struct Linter {
    empty_sections: EmptySectionPolicy,
    path_pattern: Option<Regex>,
    max_depth: Option<usize>,
}

impl Linter {
    pub fn new(config: &LintConfig) -> ApplicationResult<Self> {
        let path_pattern = config
            .path_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| ApplicationError::Config {
                message: format!("lint.path_pattern: {e}"),
            })?;

        Ok(Self {
            empty_sections: config.empty_sections,
            path_pattern,
            max_depth: config.max_depth,
        })
    }

    #[instrument(level = "debug", skip_all, fields(nodes = doc.len()))]
    pub fn lint(&self, doc: &TocDocument) -> LintReport {
        let mut findings = Vec::new();

        for (location, node) in doc.walk() {
            if node.title.trim().is_empty() {
                findings.push(Finding {
                    severity: Severity::Error,
                    rule: Rule::BlankTitle,
                    location: location.clone(),
                    message: "title is empty".to_string(),
                });
            }

            if let Some(max) = self.max_depth {
                if location.depth() > max {
                    findings.push(Finding {
                        severity: Severity::Warning,
                        rule: Rule::MaxDepth,
                        location: location.clone(),
                        message: format!(
                            "'{}' is nested {} levels deep (max {})",
                            node.title,
                            location.depth(),
                            max
                        ),
                    });
                }
            }

            match node.path() {
                Some(path) => self.check_path(path, &location, &mut findings),
                None => self.check_section(&node.title, node.children().len(), &location, &mut findings),
            }
        }

        findings.extend(duplicate_paths(doc));
        findings.sort_by(|a, b| a.location.cmp(&b.location));
        debug!("lint produced {} findings", findings.len());

        LintReport { findings }
    }

    fn check_path(&self, path: &str, location: &Location, findings: &mut Vec<Finding>) {
        if path.trim().is_empty() {
            findings.push(Finding {
                severity: Severity::Error,
                rule: Rule::BlankPath,
                location: location.clone(),
                message: "path is empty".to_string(),
            });
            return;
        }
        if let Some(pattern) = &self.path_pattern {
            if !pattern.is_match(path) {
                findings.push(Finding {
                    severity: Severity::Error,
                    rule: Rule::PathPattern,
                    location: location.clone(),
                    message: format!("path '{}' does not match '{}'", path, pattern.as_str()),
                });
            }
        }
    }

    fn check_section(
        &self,
        title: &str,
        children: usize,
        location: &Location,
        findings: &mut Vec<Finding>,
    ) {
        if children > 0 {
            return;
        }
        let severity = match self.empty_sections {
            EmptySectionPolicy::Allow => return,
            EmptySectionPolicy::Warn => Severity::Warning,
            EmptySectionPolicy::Deny => Severity::Error,
        };
        findings.push(Finding {
            severity,
            rule: Rule::EmptySection,
            location: location.clone(),
            message: format!("section '{}' has no entries", title),
        });
    }
}

/// One finding per repeated occurrence, pointing back at the first.
fn duplicate_paths(doc: &TocDocument) -> Vec<Finding> {
    doc.pages()
        .filter_map(|(location, node)| node.path().map(|p| (p.to_string(), location)))
        .into_group_map()
        .into_iter()
        .filter(|(_, locations)| locations.len() > 1)
        .flat_map(|(path, mut locations)| {
            locations.sort();
            let first = locations[0].clone();
            locations
                .into_iter()
                .skip(1)
                .map(move |location| Finding {
                    severity: Severity::Error,
                    rule: Rule::DuplicatePath,
                    location,
                    message: format!("duplicate path '{}' (first at {})", path, first),
                })
        })
        .collect()
}
