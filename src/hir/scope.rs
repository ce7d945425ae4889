//! Lexical scopes.

use super::ids::{FuncDeclId, ScopeId, TypeDeclId, VarDeclId};

/// A lexical binding region: the translation unit root, a function body, a
/// block, or a struct body.
///
/// The four declaration lists are append-only and kept in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    pub(crate) variable_declarations: Vec<VarDeclId>,
    pub(crate) type_declarations: Vec<TypeDeclId>,
    pub(crate) function_prototypes: Vec<FuncDeclId>,
    pub(crate) function_definitions: Vec<FuncDeclId>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    /// The enclosing scope; `None` for the translation unit root.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Variables, parameters and struct members, in declaration order.
    pub fn variable_declarations(&self) -> &[VarDeclId] {
        &self.variable_declarations
    }

    /// Struct types declared here.
    pub fn type_declarations(&self) -> &[TypeDeclId] {
        &self.type_declarations
    }

    /// Function prototypes (declarations without a body).
    pub fn function_prototypes(&self) -> &[FuncDeclId] {
        &self.function_prototypes
    }

    /// Function definitions.
    pub fn function_definitions(&self) -> &[FuncDeclId] {
        &self.function_definitions
    }

    /// Check if nothing has been declared here yet.
    pub fn is_empty(&self) -> bool {
        self.variable_declarations.is_empty()
            && self.type_declarations.is_empty()
            && self.function_prototypes.is_empty()
            && self.function_definitions.is_empty()
    }
}
