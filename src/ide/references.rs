//! Find references: every site of the symbol under the cursor, as locations.

use crate::base::{FileId, LineIndex, TextRange};
use crate::hir::{Element, TranslationUnit};

use super::config::AnalysisConfig;
use super::occurrences::{OccurrenceKind, OccurrenceResolver, OccurrenceSink};

/// A reference location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub file: FileId,
    pub range: TextRange,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

struct ReferenceSink<'a> {
    file: FileId,
    line_index: &'a LineIndex,
    include_declaration: bool,
    references: Vec<Reference>,
}

impl OccurrenceSink for ReferenceSink<'_> {
    fn occurrence(&mut self, range: TextRange, kind: OccurrenceKind) {
        if kind.is_declaration() && !self.include_declaration {
            return;
        }
        let lines = self.line_index.range(range);
        self.references.push(Reference {
            file: self.file,
            range,
            start_line: lines.start.line,
            start_col: lines.start.col,
            end_line: lines.end.line,
            end_col: lines.end.col,
        });
    }
}

/// Find all references to the symbol of `element`.
///
/// Placeholders such as `void` have no references; the result is then empty.
pub fn find_references(unit: &TranslationUnit, element: Element, config: &AnalysisConfig) -> Vec<Reference> {
    let mut sink = ReferenceSink {
        file: unit.file(),
        line_index: unit.line_index(),
        include_declaration: config.include_declaration,
        references: Vec::new(),
    };
    // A placeholder leaves the sink empty, which is the answer here.
    let _ = OccurrenceResolver::new(unit, &config.void_type_name).resolve(element, &mut sink);
    sink.references
}
