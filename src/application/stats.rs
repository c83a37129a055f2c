use std::fmt;

use crate::domain::{TocArena, TocDocument};

/// Shape summary of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TocStats {
    pub top_level: usize,
    pub pages: usize,
    pub sections: usize,
    pub empty_sections: usize,
    pub max_depth: usize,
}

impl TocStats {
    pub fn of(doc: &TocDocument) -> Self {
        let arena = TocArena::from_document(doc);
        let mut stats = TocStats {
            top_level: doc.toc.len(),
            max_depth: arena.depth(),
            ..TocStats::default()
        };
        for (_, node) in arena.iter() {
            if node.is_page() {
                stats.pages += 1;
            } else {
                stats.sections += 1;
                if node.children.is_empty() {
                    stats.empty_sections += 1;
                }
            }
        }
        stats
    }
}

impl fmt::Display for TocStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "top-level entries: {}", self.top_level)?;
        writeln!(f, "pages:             {}", self.pages)?;
        writeln!(f, "sections:          {}", self.sections)?;
        writeln!(f, "empty sections:    {}", self.empty_sections)?;
        write!(f, "max depth:         {}", self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TocNode;

    #[test]
    fn given_document_when_computing_stats_then_counts_match() {
        let doc = TocDocument::new(vec![
            TocNode::section(
                "tfr",
                vec![
                    TocNode::page("Overview", "/tfr"),
                    TocNode::section("keras", vec![TocNode::section("empty", vec![])]),
                ],
            ),
            TocNode::page("extension", "/ext"),
        ]);

        let stats = TocStats::of(&doc);

        assert_eq!(
            stats,
            TocStats {
                top_level: 2,
                pages: 2,
                sections: 3,
                empty_sections: 1,
                max_depth: 3,
            }
        );
    }
}
