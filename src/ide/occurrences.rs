//! Related occurrences: every source site belonging to one symbol.
//!
//! Highlighting and find-references share the traversal in
//! [`OccurrenceResolver`]; each feature supplies its own [`OccurrenceSink`]
//! to shape the sites it is handed.
//!
//! ## Ordering
//!
//! Sites are emitted declaration/write sites first, then definition/read
//! sites, then textual references. Within each group the order is the order
//! in which binding discovered them.

use tracing::debug;

use crate::base::TextRange;
use crate::hir::{
    Element, LogicalFunctionId, TranslationUnit, TypeDeclId, TypeUsage, VarDeclId, VariableUsage,
};

/// How a site participates in its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceKind {
    /// A function prototype.
    Write,
    /// A function definition or the declaring name of a variable or type.
    Read,
    /// A usage or call.
    Text,
}

impl OccurrenceKind {
    /// Check if the site declares or defines the symbol.
    pub fn is_declaration(self) -> bool {
        matches!(self, OccurrenceKind::Write | OccurrenceKind::Read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub range: TextRange,
    pub kind: OccurrenceKind,
}

/// Receives sites in emission order.
pub trait OccurrenceSink {
    fn occurrence(&mut self, range: TextRange, kind: OccurrenceKind);
}

impl OccurrenceSink for Vec<Occurrence> {
    fn occurrence(&mut self, range: TextRange, kind: OccurrenceKind) {
        self.push(Occurrence { range, kind });
    }
}

/// Outcome of a traversal.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The sink holds every site (possibly none).
    Resolved,
    /// The element is an unbound placeholder type such as `void`; there is
    /// nothing meaningful to report.
    Placeholder,
}

/// Walks the bound graph of one unit from any element to all related sites.
#[derive(Clone, Copy, Debug)]
pub struct OccurrenceResolver<'a> {
    unit: &'a TranslationUnit,
    void_type_name: &'a str,
}

impl<'a> OccurrenceResolver<'a> {
    pub fn new(unit: &'a TranslationUnit, void_type_name: &'a str) -> Self {
        Self {
            unit,
            void_type_name,
        }
    }

    /// Feed every site related to `element` into `sink`.
    pub fn resolve(&self, element: Element, sink: &mut impl OccurrenceSink) -> Resolution {
        debug!("resolving occurrences of {:?} in {}", element, self.unit.file());
        match element {
            Element::FunctionPrototype(fd) | Element::FunctionDefinition(fd) => {
                self.function(self.unit.function_declaration(fd).logical_function, sink);
                Resolution::Resolved
            }
            Element::FunctionCall(call) => {
                if let Some(lf) = self.unit.function_call(call).logical_function {
                    self.function(lf, sink);
                }
                Resolution::Resolved
            }
            Element::VariableDeclaration(vd) => {
                self.variable_declaration(vd, sink);
                Resolution::Resolved
            }
            Element::TypeDeclaration(td) => {
                self.type_declaration(td, sink);
                Resolution::Resolved
            }
            Element::VariableUsage(usage) => {
                let VariableUsage {
                    name,
                    name_range,
                    declaration,
                    ..
                } = self.unit.variable_usage(usage);
                match declaration {
                    Some(vd) => {
                        self.variable_declaration(*vd, sink);
                        Resolution::Resolved
                    }
                    None => self.unbound(name, Some(*name_range), sink),
                }
            }
            Element::TypeUsage(usage) => {
                let TypeUsage {
                    name,
                    name_range,
                    declaration,
                    ..
                } = self.unit.type_usage(usage);
                match declaration {
                    Some(td) => {
                        self.type_declaration(*td, sink);
                        Resolution::Resolved
                    }
                    None => self.unbound(name, *name_range, sink),
                }
            }
        }
    }

    fn unbound(&self, name: &str, name_range: Option<TextRange>, sink: &mut impl OccurrenceSink) -> Resolution {
        if name == self.void_type_name {
            return Resolution::Placeholder;
        }
        if let Some(range) = name_range {
            sink.occurrence(range, OccurrenceKind::Text);
        }
        Resolution::Resolved
    }

    fn function(&self, lf: LogicalFunctionId, sink: &mut impl OccurrenceSink) {
        let logical = self.unit.logical_function(lf);
        let Some(declaration) = logical.declaration() else {
            return;
        };
        let declaration = self.unit.function_declaration(declaration);

        if declaration.ctor {
            let constructed = self.unit.type_usage(declaration.return_type);
            let Some(ty) = constructed.declaration else {
                return;
            };
            let type_declaration = self.unit.type_declaration(ty);
            if type_declaration.builtin && !constructed.array.is_array() {
                // Built-in constructors group by overload, not by type.
                for &call in &type_declaration.ctor_calls {
                    let call = self.unit.function_call(call);
                    if call.logical_function == Some(lf) {
                        sink.occurrence(call.name_range, OccurrenceKind::Text);
                    }
                }
            } else {
                self.type_declaration(ty, sink);
            }
            return;
        }

        if !declaration.builtin {
            for &fd in &logical.prototypes {
                self.name_site(self.unit.function_declaration(fd).name_range, OccurrenceKind::Write, sink);
            }
            for &fd in &logical.definitions {
                self.name_site(self.unit.function_declaration(fd).name_range, OccurrenceKind::Read, sink);
            }
        }
        for &call in &logical.calls {
            sink.occurrence(self.unit.function_call(call).name_range, OccurrenceKind::Text);
        }
    }

    fn variable_declaration(&self, vd: VarDeclId, sink: &mut impl OccurrenceSink) {
        let declaration = self.unit.variable_declaration(vd);
        if declaration.builtin {
            return;
        }
        self.name_site(declaration.name_range, OccurrenceKind::Read, sink);
        for &usage in &declaration.usages {
            sink.occurrence(self.unit.variable_usage(usage).name_range, OccurrenceKind::Text);
        }
    }

    fn type_declaration(&self, td: TypeDeclId, sink: &mut impl OccurrenceSink) {
        let declaration = self.unit.type_declaration(td);
        if declaration.builtin {
            return;
        }
        self.name_site(declaration.name_range, OccurrenceKind::Read, sink);
        for &usage in &declaration.usages {
            self.name_site(self.unit.type_usage(usage).name_range, OccurrenceKind::Text, sink);
        }
        for &call in &declaration.ctor_calls {
            sink.occurrence(self.unit.function_call(call).name_range, OccurrenceKind::Text);
        }
    }

    fn name_site(&self, range: Option<TextRange>, kind: OccurrenceKind, sink: &mut impl OccurrenceSink) {
        if let Some(range) = range {
            sink.occurrence(range, kind);
        }
    }
}

/// Collect the related sites of `element`; `None` for a placeholder.
pub fn related_occurrences(
    unit: &TranslationUnit,
    element: Element,
    void_type_name: &str,
) -> Option<Vec<Occurrence>> {
    let mut occurrences = Vec::new();
    match OccurrenceResolver::new(unit, void_type_name).resolve(element, &mut occurrences) {
        Resolution::Resolved => Some(occurrences),
        Resolution::Placeholder => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{ArrayUsage, BuiltinTable, VOID};
    use crate::syntax::Ident;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    fn unit() -> TranslationUnit {
        TranslationUnit::new(FileId::new(0), "", &BuiltinTable::glsl())
    }

    #[test]
    fn test_void_is_a_placeholder() {
        let mut unit = unit();
        let root = unit.root_scope();
        let void = unit.add_type_usage(TypeUsage {
            name: VOID.into(),
            name_range: Some(range(0, 4)),
            scope: Some(root),
            declaration: None,
            array: ArrayUsage::scalar(),
        });

        assert_eq!(related_occurrences(&unit, Element::TypeUsage(void), VOID), None);
    }

    #[test]
    fn test_unbound_usage_reports_itself() {
        let mut unit = unit();
        let root = unit.root_scope();
        let usage = unit.add_variable_usage(&Ident::new("ghost", range(3, 8)), root, None);

        assert_eq!(
            related_occurrences(&unit, Element::VariableUsage(usage), VOID),
            Some(vec![Occurrence {
                range: range(3, 8),
                kind: OccurrenceKind::Text
            }])
        );
    }

    #[test]
    fn test_builtin_function_reports_calls_only() {
        let mut unit = unit();
        let root = unit.root_scope();
        let sin = unit.builtin_functions("sin")[0];
        let first = unit.add_function_call(&Ident::new("sin", range(0, 3)), root, Some(sin));
        unit.add_function_call(&Ident::new("sin", range(10, 13)), root, Some(sin));

        let occurrences = related_occurrences(&unit, Element::FunctionCall(first), VOID).unwrap();
        let ranges: Vec<_> = occurrences.iter().map(|o| o.range).collect();
        assert_eq!(ranges, vec![range(0, 3), range(10, 13)]);
        assert!(occurrences.iter().all(|o| o.kind == OccurrenceKind::Text));
    }

    #[test]
    fn test_unbound_call_is_empty() {
        let mut unit = unit();
        let root = unit.root_scope();
        let call = unit.add_function_call(&Ident::new("nope", range(0, 4)), root, None);

        assert_eq!(related_occurrences(&unit, Element::FunctionCall(call), VOID), Some(Vec::new()));
    }

    #[test]
    fn test_builtin_declaration_is_empty() {
        let unit = unit();
        let position = unit.builtin_variable("gl_Position").unwrap();
        let vec3 = unit.builtin_type("vec3").unwrap();

        assert_eq!(related_occurrences(&unit, Element::VariableDeclaration(position), VOID), Some(Vec::new()));
        assert_eq!(related_occurrences(&unit, Element::TypeDeclaration(vec3), VOID), Some(Vec::new()));
    }

    #[test]
    fn test_occurrence_kind_is_declaration() {
        assert!(OccurrenceKind::Write.is_declaration());
        assert!(OccurrenceKind::Read.is_declaration());
        assert!(!OccurrenceKind::Text.is_declaration());
    }
}
