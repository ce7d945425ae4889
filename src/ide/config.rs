//! Analysis configuration.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::hir::{BuiltinTable, VOID};

/// Settings shared by every query of an [`AnalysisHost`](super::AnalysisHost).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Keyword naming "no type"; unbound usages of it have no occurrences.
    pub void_type_name: SmolStr,
    /// Whether find-references reports declaring sites.
    pub include_declaration: bool,
    /// Built-in environment instantiated into every new unit.
    pub builtins: Arc<BuiltinTable>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            void_type_name: SmolStr::new_static(VOID),
            include_declaration: true,
            builtins: BuiltinTable::glsl(),
        }
    }
}

impl AnalysisConfig {
    /// Set the keyword treated as the `void` placeholder.
    pub fn with_void_type_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.void_type_name = name.into();
        self
    }

    /// Set whether find-references reports declaration sites.
    pub fn with_include_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }

    /// Set the built-in environment for new units.
    pub fn with_builtins(mut self, builtins: Arc<BuiltinTable>) -> Self {
        self.builtins = builtins;
        self
    }
}
