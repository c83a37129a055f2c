//! Serialized form of a ToC file and its conversion to the typed tree
//!
//! The raw model mirrors the on-disk keys (`title`, `path`, `section`) and
//! accepts structurally invalid nodes, so that every violation in a file can
//! be reported at once instead of failing on the first one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::node::{Location, NodeKind, TocDocument, TocNode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Vec<RawNode>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDocument {
    pub toc: Vec<RawNode>,
}

/// Structural rule broken by a raw node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    MissingTitle,
    BothPathAndSection,
    NeitherPathNorSection,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ViolationKind::MissingTitle => "node has no title",
            ViolationKind::BothPathAndSection => "node has both path and section",
            ViolationKind::NeitherPathNorSection => "node has neither path nor section",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub location: Location,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

impl TryFrom<RawDocument> for TocDocument {
    type Error = DomainError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let mut violations = Vec::new();
        let root = Location::root();
        let toc = convert_list(raw.toc, &root, &mut violations);

        if violations.is_empty() {
            Ok(TocDocument::new(toc))
        } else {
            Err(DomainError::Structure(violations))
        }
    }
}

fn convert_list(
    nodes: Vec<RawNode>,
    parent: &Location,
    violations: &mut Vec<Violation>,
) -> Vec<TocNode> {
    nodes
        .into_iter()
        .enumerate()
        .filter_map(|(i, node)| convert_node(node, parent.child(i), violations))
        .collect()
}

fn convert_node(
    raw: RawNode,
    location: Location,
    violations: &mut Vec<Violation>,
) -> Option<TocNode> {
    let title = match raw.title {
        Some(title) => Some(title),
        None => {
            violations.push(Violation {
                location: location.clone(),
                kind: ViolationKind::MissingTitle,
            });
            None
        }
    };

    let kind = match (raw.path, raw.section) {
        (Some(path), None) => Some(NodeKind::Page { path }),
        (None, Some(section)) => Some(NodeKind::Section {
            children: convert_list(section, &location, violations),
        }),
        (Some(_), Some(section)) => {
            violations.push(Violation {
                location: location.clone(),
                kind: ViolationKind::BothPathAndSection,
            });
            // Still descend so nested problems surface in the same pass
            convert_list(section, &location, violations);
            None
        }
        (None, None) => {
            violations.push(Violation {
                location,
                kind: ViolationKind::NeitherPathNorSection,
            });
            None
        }
    };

    Some(TocNode {
        title: title?,
        kind: kind?,
    })
}

impl From<&TocNode> for RawNode {
    fn from(node: &TocNode) -> Self {
        match &node.kind {
            NodeKind::Page { path } => RawNode {
                title: Some(node.title.clone()),
                path: Some(path.clone()),
                section: None,
            },
            NodeKind::Section { children } => RawNode {
                title: Some(node.title.clone()),
                path: None,
                section: Some(children.iter().map(RawNode::from).collect()),
            },
        }
    }
}

impl From<&TocDocument> for RawDocument {
    fn from(doc: &TocDocument) -> Self {
        RawDocument {
            toc: doc.toc.iter().map(RawNode::from).collect(),
        }
    }
}
