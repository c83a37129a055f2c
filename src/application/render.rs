//! Navigation renderers
//!
//! All renderers walk depth-first in authoring order.

use std::fmt::Write;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{is_external_path, NodeKind, TocDocument, TocNode};

/// Output flavours for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    Markdown,
    Html,
}

/// Terminal tree, labelled with the given document name.
#[instrument(level = "debug", skip(doc))]
pub fn to_tree(doc: &TocDocument, name: &str) -> Tree<String> {
    Tree::new(name.to_string()).with_leaves(doc.toc.iter().map(node_tree))
}

fn node_tree(node: &TocNode) -> Tree<String> {
    match &node.kind {
        NodeKind::Page { path } => Tree::new(format!("{} ({})", node.title, path)),
        NodeKind::Section { children } => {
            Tree::new(node.title.clone()).with_leaves(children.iter().map(node_tree))
        }
    }
}

/// Page URL: off-site paths as they are, others under `base_url`.
fn link(base_url: &str, path: &str) -> String {
    if is_external_path(path) || base_url.is_empty() {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode characters that end or break a Markdown link destination.
fn markdown_target(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '(' => encoded.push_str("%28"),
            ')' => encoded.push_str("%29"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            c => encoded.push(c),
        }
    }
    encoded
}

/// Nested bullet list; pages as links, sections as bold labels.
#[instrument(level = "debug", skip(doc))]
pub fn to_markdown(doc: &TocDocument, base_url: &str) -> String {
    let mut out = String::new();
    for node in &doc.toc {
        markdown_node(&mut out, node, 0, base_url);
    }
    out
}

fn markdown_node(out: &mut String, node: &TocNode, level: usize, base_url: &str) {
    let indent = "  ".repeat(level);
    match &node.kind {
        NodeKind::Page { path } => {
            let _ = writeln!(
                out,
                "{}- [{}]({})",
                indent,
                escape_markdown(&node.title),
                markdown_target(&link(base_url, path))
            );
        }
        NodeKind::Section { children } => {
            let _ = writeln!(out, "{}- **{}**", indent, escape_markdown(&node.title));
            for child in children {
                markdown_node(out, child, level + 1, base_url);
            }
        }
    }
}

fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '*' | '_' | '`' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Nested `<ul>` navigation menu.
#[instrument(level = "debug", skip(doc))]
pub fn to_html(doc: &TocDocument, base_url: &str) -> String {
    let mut out = String::from("<nav class=\"toc\">\n");
    html_list(&mut out, &doc.toc, 1, base_url);
    out.push_str("</nav>\n");
    out
}

fn html_list(out: &mut String, nodes: &[TocNode], level: usize, base_url: &str) {
    let indent = "  ".repeat(level);
    let _ = writeln!(out, "{}<ul>", indent);
    for node in nodes {
        match &node.kind {
            NodeKind::Page { path } => {
                let _ = writeln!(
                    out,
                    "{}  <li><a href=\"{}\">{}</a></li>",
                    indent,
                    escape_html(&link(base_url, path)),
                    escape_html(&node.title)
                );
            }
            NodeKind::Section { children } if children.is_empty() => {
                let _ = writeln!(
                    out,
                    "{}  <li><span>{}</span></li>",
                    indent,
                    escape_html(&node.title)
                );
            }
            NodeKind::Section { children } => {
                let _ = writeln!(out, "{}  <li><span>{}</span>", indent, escape_html(&node.title));
                html_list(out, children, level + 2, base_url);
                let _ = writeln!(out, "{}  </li>", indent);
            }
        }
    }
    let _ = writeln!(out, "{}</ul>", indent);
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render with the chosen flavour.
pub fn render(doc: &TocDocument, format: RenderFormat, base_url: &str) -> String {
    match format {
        RenderFormat::Markdown => to_markdown(doc, base_url),
        RenderFormat::Html => to_html(doc, base_url),
    }
}
