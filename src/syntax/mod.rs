//! Syntax nodes consumed by the semantic layer.
//!
//! Parsing is done elsewhere; these are the shapes a parser hands over for
//! declarations and expressions. Every node carries its source interval.

mod nodes;

pub use nodes::{
    ArraySubscript, Declarator, Expr, Ident, IdentifierOptArray, ParameterNode, TypeSyntax,
    VariableDeclarationNode,
};
