//! HIR: the bound semantic model of one shader document.
//!
//! This module owns everything between syntax nodes and IDE queries:
//!
//! 1. **Registration**: [`DeclarationRegistrar`] turns declaration nodes into
//!    [`VariableDeclaration`]s in their [`Scope`]
//! 2. **Resolution**: [`Resolver`] finds the declaration a name refers to
//! 3. **Binding**: [`TranslationUnit`] stores the entities in arenas and
//!    keeps the declaration ↔ usage links
//!
//! ## Usage
//!
//! ```ignore
//! use glsl::hir::{BuiltinTable, DeclarationRegistrar, TranslationUnit};
//!
//! let mut unit = TranslationUnit::new(file, text, &BuiltinTable::glsl());
//! let mut registrar = DeclarationRegistrar::new();
//! let ids = registrar.declarations(&mut unit, &node, unit.root_scope());
//! ```

mod builtins;
mod collab;
mod declarations;
mod ids;
mod resolve;
mod scope;
mod symbols;
mod unit;

pub use builtins::{
    BuiltinError, BuiltinFunction, BuiltinTable, BuiltinTableBuilder, BuiltinType,
    BuiltinVariable, VOID,
};
pub use collab::{
    ArrayShapeExtractor, DefaultArrayShapeExtractor, DefaultExpressionEvaluator,
    DefaultTypeEvaluator, ExpressionEvaluator, TypeEvaluator, array_dims,
};
pub use declarations::DeclarationRegistrar;
pub use ids::{
    FuncCallId, FuncDeclId, LogicalFunctionId, ScopeId, TypeDeclId, TypeUsageId, VarDeclId,
    VarUsageId,
};
pub use resolve::Resolver;
pub use scope::Scope;
pub use symbols::{
    ArrayDim, ArrayUsage, Element, FunctionCall, FunctionDeclaration, LogicalFunction,
    TypeDeclaration, TypeUsage, VariableDeclaration, VariableUsage,
};
pub use unit::{FunctionSpec, TranslationUnit};
