//! Document highlights: every occurrence of the symbol under the cursor.

use crate::base::{LineIndex, TextRange};
use crate::hir::{Element, TranslationUnit};

use super::config::AnalysisConfig;
use super::occurrences::{OccurrenceKind, OccurrenceResolver, OccurrenceSink, Resolution};

/// Highlight kind, mirroring the LSP `DocumentHighlightKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Text,
    Read,
    Write,
}

impl HighlightKind {
    /// Convert to the LSP `DocumentHighlightKind` value.
    pub fn to_lsp(self) -> u32 {
        match self {
            HighlightKind::Text => 1,
            HighlightKind::Read => 2,
            HighlightKind::Write => 3,
        }
    }
}

impl From<OccurrenceKind> for HighlightKind {
    fn from(kind: OccurrenceKind) -> Self {
        match kind {
            OccurrenceKind::Write => HighlightKind::Write,
            OccurrenceKind::Read => HighlightKind::Read,
            OccurrenceKind::Text => HighlightKind::Text,
        }
    }
}

/// A highlighted range with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub range: TextRange,
    /// Start line (0-indexed)
    pub start_line: u32,
    /// Start column (0-indexed)
    pub start_col: u32,
    /// End line (0-indexed)
    pub end_line: u32,
    /// End column (0-indexed)
    pub end_col: u32,
    pub kind: HighlightKind,
}

struct HighlightSink<'a> {
    line_index: &'a LineIndex,
    highlights: Vec<Highlight>,
}

impl OccurrenceSink for HighlightSink<'_> {
    fn occurrence(&mut self, range: TextRange, kind: OccurrenceKind) {
        let lines = self.line_index.range(range);
        self.highlights.push(Highlight {
            range,
            start_line: lines.start.line,
            start_col: lines.start.col,
            end_line: lines.end.line,
            end_col: lines.end.col,
            kind: kind.into(),
        });
    }
}

/// Get the highlights related to `element`.
///
/// Returns `None` when the element is a placeholder such as a `void` return
/// type; an empty list means the symbol simply has no reportable sites.
pub fn document_highlights(
    unit: &TranslationUnit,
    element: Element,
    config: &AnalysisConfig,
) -> Option<Vec<Highlight>> {
    let mut sink = HighlightSink {
        line_index: unit.line_index(),
        highlights: Vec::new(),
    };
    match OccurrenceResolver::new(unit, &config.void_type_name).resolve(element, &mut sink) {
        Resolution::Resolved => Some(sink.highlights),
        Resolution::Placeholder => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{BuiltinTable, VariableDeclaration};
    use crate::syntax::Ident;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_highlight_kind_to_lsp() {
        assert_eq!(HighlightKind::Text.to_lsp(), 1);
        assert_eq!(HighlightKind::Read.to_lsp(), 2);
        assert_eq!(HighlightKind::Write.to_lsp(), 3);
    }

    #[test]
    fn test_highlights_carry_line_columns() {
        let text = "float x;\nx = x;";
        let mut unit = TranslationUnit::new(FileId::new(0), text, &BuiltinTable::glsl());
        let root = unit.root_scope();
        let x = unit.add_variable_declaration(VariableDeclaration {
            name: Some("x".into()),
            name_range: Some(range(6, 7)),
            scope: Some(root),
            builtin: false,
            declaration_range: Some(range(0, 7)),
            type_usage: None,
            is_parameter: false,
            usages: Vec::new(),
        });
        unit.add_variable_usage(&Ident::new("x", range(9, 10)), root, Some(x));
        unit.add_variable_usage(&Ident::new("x", range(13, 14)), root, Some(x));

        let highlights =
            document_highlights(&unit, Element::VariableDeclaration(x), &AnalysisConfig::default()).unwrap();

        let positions: Vec<_> = highlights
            .iter()
            .map(|h| (h.start_line, h.start_col, h.end_col, h.kind))
            .collect();
        assert_eq!(
            positions,
            vec![
                (0, 6, 7, HighlightKind::Read),
                (1, 0, 1, HighlightKind::Text),
                (1, 4, 5, HighlightKind::Text),
            ]
        );
    }
}
