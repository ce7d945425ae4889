//! Semantic entities produced by binding one translation unit.
//!
//! Entities are plain records stored in the arenas of a
//! [`TranslationUnit`](super::TranslationUnit). Cross references between them
//! are arena ids, so the declaration ↔ usage and logical function ↔ call
//! links are non-owning in both directions.

use smol_str::SmolStr;

use crate::base::TextRange;

use super::ids::{
    FuncCallId, FuncDeclId, LogicalFunctionId, ScopeId, TypeDeclId, TypeUsageId, VarDeclId,
    VarUsageId,
};

// ============================================================================
// ARRAY SHAPE
// ============================================================================

/// One array dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayDim {
    /// `[N]` with a known extent.
    Sized(u32),
    /// `[]`, or an extent that is not a literal.
    Unsized,
}

/// The array shape of a declared entity. No dimensions means "not an array".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArrayUsage {
    dims: Vec<ArrayDim>,
}

impl ArrayUsage {
    /// The shape of a non-array entity.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Create a shape from its dimensions, outermost first.
    pub fn with_dims(dims: Vec<ArrayDim>) -> Self {
        Self { dims }
    }

    /// Check if the entity has at least one dimension.
    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }

    /// Get the dimensions, outermost first.
    pub fn dims(&self) -> &[ArrayDim] {
        &self.dims
    }
}

// ============================================================================
// VARIABLES
// ============================================================================

/// A variable, function parameter, or struct member.
#[derive(Clone, Debug)]
pub struct VariableDeclaration {
    /// `None` for anonymous struct members and unnamed parameters.
    pub name: Option<SmolStr>,
    pub name_range: Option<TextRange>,
    /// `None` for built-ins, which live outside any source scope.
    pub scope: Option<ScopeId>,
    pub builtin: bool,
    pub declaration_range: Option<TextRange>,
    pub type_usage: Option<TypeUsageId>,
    pub is_parameter: bool,
    /// Every usage bound to this declaration, in discovery order.
    pub usages: Vec<VarUsageId>,
}

#[derive(Clone, Debug)]
pub struct VariableUsage {
    pub name: SmolStr,
    pub name_range: TextRange,
    pub scope: ScopeId,
    /// `None` when name resolution found nothing; that is a valid final state.
    pub declaration: Option<VarDeclId>,
}

// ============================================================================
// TYPES
// ============================================================================

/// A struct declaration or a built-in type.
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub name: SmolStr,
    pub name_range: Option<TextRange>,
    pub declaration_range: Option<TextRange>,
    pub scope: Option<ScopeId>,
    pub builtin: bool,
    /// Scope holding the struct's members.
    pub members: Option<ScopeId>,
    /// Constructor overloads; one logical function each.
    pub constructors: Vec<LogicalFunctionId>,
    /// Every type usage bound to this declaration, in discovery order.
    pub usages: Vec<TypeUsageId>,
    /// Every call constructing this type, in discovery order.
    pub ctor_calls: Vec<FuncCallId>,
}

/// A reference to a type by name, together with the array shape it was used with.
#[derive(Clone, Debug)]
pub struct TypeUsage {
    pub name: SmolStr,
    /// `None` for synthetic usages (built-in signatures, repeated declarators).
    pub name_range: Option<TextRange>,
    pub scope: Option<ScopeId>,
    /// `None` when unresolved, e.g. the `void` keyword.
    pub declaration: Option<TypeDeclId>,
    pub array: ArrayUsage,
}

// ============================================================================
// FUNCTIONS
// ============================================================================

#[derive(Clone, Debug)]
pub struct FunctionDeclaration {
    pub name: SmolStr,
    pub name_range: Option<TextRange>,
    pub declaration_range: Option<TextRange>,
    pub scope: Option<ScopeId>,
    pub return_type: TypeUsageId,
    pub parameters: Vec<VarDeclId>,
    pub parameter_types: Vec<TypeUsageId>,
    /// The body scope of a definition (also holds the parameters).
    pub body: Option<ScopeId>,
    pub is_definition: bool,
    /// True when this is a type's implicit constructor; `return_type` then
    /// points at the constructed type.
    pub ctor: bool,
    pub builtin: bool,
    pub logical_function: LogicalFunctionId,
}

#[derive(Clone, Debug)]
pub struct FunctionCall {
    pub name: SmolStr,
    pub name_range: TextRange,
    pub scope: ScopeId,
    pub logical_function: Option<LogicalFunctionId>,
}

/// All overload-compatible prototypes and definitions of one conceptual
/// function, plus every call bound to it.
#[derive(Clone, Debug, Default)]
pub struct LogicalFunction {
    pub prototypes: Vec<FuncDeclId>,
    pub definitions: Vec<FuncDeclId>,
    pub calls: Vec<FuncCallId>,
}

impl LogicalFunction {
    /// The canonical declaration: the first definition, else the first prototype.
    pub fn declaration(&self) -> Option<FuncDeclId> {
        self.definitions
            .first()
            .or_else(|| self.prototypes.first())
            .copied()
    }
}

// ============================================================================
// ELEMENT
// ============================================================================

/// A bound syntax element an editor query can start from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    FunctionPrototype(FuncDeclId),
    FunctionDefinition(FuncDeclId),
    FunctionCall(FuncCallId),
    VariableDeclaration(VarDeclId),
    VariableUsage(VarUsageId),
    TypeDeclaration(TypeDeclId),
    TypeUsage(TypeUsageId),
}
