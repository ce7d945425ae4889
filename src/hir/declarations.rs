//! Declaration registration.
//!
//! Turns parameter and variable declaration nodes into
//! [`VariableDeclaration`]s appended to their enclosing scope. A combined
//! declaration (`int a, b[3], c = 1;`) yields one declaration per declarator,
//! and a bare type with no declarators (an anonymous struct member) still
//! yields exactly one, unnamed, declaration.

use tracing::debug;

use crate::base::TextRange;
use crate::syntax::{Declarator, ParameterNode, VariableDeclarationNode};

use super::collab::{
    ArrayShapeExtractor, DefaultArrayShapeExtractor, DefaultExpressionEvaluator,
    DefaultTypeEvaluator, ExpressionEvaluator, TypeEvaluator,
};
use super::ids::{ScopeId, VarDeclId};
use super::symbols::{ArrayUsage, VariableDeclaration};
use super::unit::TranslationUnit;

/// Materializes variable declarations, delegating types, initializers and
/// array shapes to its collaborators.
#[derive(Clone, Debug, Default)]
pub struct DeclarationRegistrar<
    T = DefaultTypeEvaluator,
    E = DefaultExpressionEvaluator,
    A = DefaultArrayShapeExtractor,
> {
    types: T,
    expressions: E,
    arrays: A,
}

impl DeclarationRegistrar {
    /// Create a registrar with the default collaborators.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, E, A> DeclarationRegistrar<T, E, A>
where
    T: TypeEvaluator,
    E: ExpressionEvaluator,
    A: ArrayShapeExtractor,
{
    /// Create a registrar with custom collaborators.
    pub fn with_collaborators(types: T, expressions: E, arrays: A) -> Self {
        Self {
            types,
            expressions,
            arrays,
        }
    }

    pub fn type_evaluator(&self) -> &T {
        &self.types
    }

    pub fn expression_evaluator(&self) -> &E {
        &self.expressions
    }

    pub fn array_shape_extractor(&self) -> &A {
        &self.arrays
    }

    /// Register a function parameter. Unnamed parameters get no name and no
    /// name range.
    pub fn parameter_declaration(
        &mut self,
        unit: &mut TranslationUnit,
        param: &ParameterNode,
        scope: ScopeId,
    ) -> VarDeclId {
        let name = param.declarator.as_ref().map(|d| &d.name);
        let array = self.arrays.array_usage(unit, name, scope);
        let type_usage = self.types.parameter_type(unit, &param.ty, &array, scope);

        let id = unit.add_variable_declaration(VariableDeclaration {
            name: name.map(|n| n.identifier.text.clone()),
            name_range: name.map(|n| n.identifier.range),
            scope: Some(scope),
            builtin: false,
            declaration_range: Some(param.range),
            type_usage: Some(type_usage),
            is_parameter: true,
            usages: Vec::new(),
        });
        debug!("registered parameter {:?} as {:?} in {:?}", name.map(|n| &n.identifier.text), id, scope);
        id
    }

    /// Register every declarator of `node` in syntax order.
    pub fn declarations(
        &mut self,
        unit: &mut TranslationUnit,
        node: &VariableDeclarationNode,
        scope: ScopeId,
    ) -> Vec<VarDeclId> {
        if node.declarators.is_empty() {
            let type_usage = self.types.member_type(unit, &node.ty, &ArrayUsage::scalar(), scope, 0);
            let id = unit.add_variable_declaration(VariableDeclaration {
                name: None,
                name_range: None,
                scope: Some(scope),
                builtin: false,
                declaration_range: Some(node.range),
                type_usage: Some(type_usage),
                is_parameter: false,
                usages: Vec::new(),
            });
            debug!("registered anonymous member {:?} in {:?}", id, scope);
            return vec![id];
        }

        let ids: Vec<VarDeclId> = node
            .declarators
            .iter()
            .enumerate()
            .map(|(index, declarator)| self.declarator(unit, node, declarator, index, scope))
            .collect();
        debug!("registered {} declarations in {:?}", ids.len(), scope);
        ids
    }

    fn declarator(
        &mut self,
        unit: &mut TranslationUnit,
        node: &VariableDeclarationNode,
        declarator: &Declarator,
        index: usize,
        scope: ScopeId,
    ) -> VarDeclId {
        let array = self.arrays.array_usage(unit, Some(&declarator.name), scope);
        self.expressions
            .process_expression(unit, declarator.initializer.as_ref(), scope);
        let type_usage = self.types.member_type(unit, &node.ty, &array, scope, index);

        let identifier = &declarator.name.identifier;
        unit.add_variable_declaration(VariableDeclaration {
            name: Some(identifier.text.clone()),
            name_range: Some(identifier.range),
            scope: Some(scope),
            builtin: false,
            declaration_range: Some(TextRange::new(node.range.start(), declarator.range.end())),
            type_usage: Some(type_usage),
            is_parameter: false,
            usages: Vec::new(),
        })
    }
}
