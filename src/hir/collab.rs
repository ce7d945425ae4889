//! Collaborators the declaration registrar delegates to.
//!
//! The registrar only decides *which* declarations exist and where they go.
//! Type evaluation, expression analysis and array shape extraction are
//! pluggable so hosts with a richer type checker can supply their own.

use crate::syntax::{ArraySubscript, Expr, IdentifierOptArray, TypeSyntax};

use super::ids::{ScopeId, TypeUsageId};
use super::resolve::Resolver;
use super::symbols::{ArrayDim, ArrayUsage, TypeUsage};
use super::unit::TranslationUnit;

/// Computes the type of a declared entity and registers the type usage it
/// discovers.
pub trait TypeEvaluator {
    fn parameter_type(
        &mut self,
        unit: &mut TranslationUnit,
        ty: &TypeSyntax,
        array: &ArrayUsage,
        scope: ScopeId,
    ) -> TypeUsageId;

    /// Type of the declarator at `declarator_index` in a combined declaration.
    fn member_type(
        &mut self,
        unit: &mut TranslationUnit,
        ty: &TypeSyntax,
        array: &ArrayUsage,
        scope: ScopeId,
        declarator_index: usize,
    ) -> TypeUsageId;
}

/// Analyzes an expression for its side effects: usages and calls it binds.
pub trait ExpressionEvaluator {
    fn process_expression(&mut self, unit: &mut TranslationUnit, expr: Option<&Expr>, scope: ScopeId);
}

/// Reads the array suffixes of a declared name.
pub trait ArrayShapeExtractor {
    fn array_usage(
        &mut self,
        unit: &TranslationUnit,
        name: Option<&IdentifierOptArray>,
        scope: ScopeId,
    ) -> ArrayUsage;
}

/// Dimensions of `[..]` suffixes. Only integer literals count as sizes.
pub fn array_dims(subscripts: &[ArraySubscript]) -> Vec<ArrayDim> {
    subscripts
        .iter()
        .map(|subscript| match subscript.size {
            Some(Expr::IntLiteral { value, .. }) => {
                u32::try_from(value).map_or(ArrayDim::Unsized, ArrayDim::Sized)
            }
            _ => ArrayDim::Unsized,
        })
        .collect()
}

// ============================================================================
// DEFAULTS
// ============================================================================

/// Resolves the type name through [`Resolver::search_type_declaration`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTypeEvaluator;

impl DefaultTypeEvaluator {
    fn type_usage(
        unit: &mut TranslationUnit,
        ty: &TypeSyntax,
        array: &ArrayUsage,
        scope: ScopeId,
        located: bool,
    ) -> TypeUsageId {
        let declaration = Resolver::new(unit).search_type_declaration(&ty.name.text, ty.name.range, scope);
        // `float a[2]` and `float[2] a` combine; the declarator's suffix is outermost.
        let mut dims = array.dims().to_vec();
        dims.extend(array_dims(&ty.subscripts));
        unit.add_type_usage(TypeUsage {
            name: ty.name.text.clone(),
            name_range: located.then_some(ty.name.range),
            scope: Some(scope),
            declaration,
            array: ArrayUsage::with_dims(dims),
        })
    }
}

impl TypeEvaluator for DefaultTypeEvaluator {
    fn parameter_type(
        &mut self,
        unit: &mut TranslationUnit,
        ty: &TypeSyntax,
        array: &ArrayUsage,
        scope: ScopeId,
    ) -> TypeUsageId {
        Self::type_usage(unit, ty, array, scope, true)
    }

    /// Declarators after the first share the type name token, so only the
    /// first one records a located usage.
    fn member_type(
        &mut self,
        unit: &mut TranslationUnit,
        ty: &TypeSyntax,
        array: &ArrayUsage,
        scope: ScopeId,
        declarator_index: usize,
    ) -> TypeUsageId {
        Self::type_usage(unit, ty, array, scope, declarator_index == 0)
    }
}

/// Binds names and calls inside an expression tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultExpressionEvaluator;

impl ExpressionEvaluator for DefaultExpressionEvaluator {
    fn process_expression(&mut self, unit: &mut TranslationUnit, expr: Option<&Expr>, scope: ScopeId) {
        let Some(expr) = expr else {
            return;
        };
        match expr {
            Expr::IntLiteral { .. } | Expr::FloatLiteral { .. } | Expr::BoolLiteral { .. } => {}
            Expr::Name(ident) => {
                let declaration = Resolver::new(unit).search_variable_declaration(&ident.text, ident.range, scope);
                unit.add_variable_usage(ident, scope, declaration);
            }
            Expr::Call { callee, args, .. } => {
                let resolver = Resolver::new(unit);
                let arg_types = resolver.argument_types(args, scope);
                let logical_function = match resolver.search_type_declaration(&callee.text, callee.range, scope) {
                    Some(ty) => resolver.constructor(ty, &arg_types),
                    None => resolver.search_logical_function(&callee.text, callee.range, scope, &arg_types),
                };
                unit.add_function_call(callee, scope, logical_function);
                for arg in args {
                    self.process_expression(unit, Some(arg), scope);
                }
            }
            Expr::ArrayConstructor { ty, args, .. } => {
                let constructed = Resolver::new(unit).search_type_declaration(&ty.name.text, ty.name.range, scope);
                let logical_function = constructed.map(|td| {
                    unit.declare_array_constructor(td, ArrayUsage::with_dims(array_dims(&ty.subscripts)))
                });
                unit.add_function_call(&ty.name, scope, logical_function);
                for arg in args {
                    self.process_expression(unit, Some(arg), scope);
                }
            }
            // Member names need the base's type; only the base is bound here.
            Expr::Field { base, .. } => self.process_expression(unit, Some(base), scope),
            Expr::Index { base, index, .. } => {
                self.process_expression(unit, Some(base), scope);
                self.process_expression(unit, Some(index), scope);
            }
            Expr::Unary { operand, .. } => self.process_expression(unit, Some(operand), scope),
            Expr::Binary { lhs, rhs, .. } => {
                self.process_expression(unit, Some(lhs), scope);
                self.process_expression(unit, Some(rhs), scope);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultArrayShapeExtractor;

impl ArrayShapeExtractor for DefaultArrayShapeExtractor {
    fn array_usage(
        &mut self,
        _unit: &TranslationUnit,
        name: Option<&IdentifierOptArray>,
        _scope: ScopeId,
    ) -> ArrayUsage {
        name.map_or_else(ArrayUsage::scalar, |name| {
            ArrayUsage::with_dims(array_dims(&name.subscripts))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, TextRange};
    use crate::hir::builtins::BuiltinTable;
    use crate::hir::symbols::{Element, VariableDeclaration};
    use crate::syntax::Ident;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    fn unit() -> TranslationUnit {
        TranslationUnit::new(FileId::new(0), "", &BuiltinTable::glsl())
    }

    fn subscript(size: Option<u64>) -> ArraySubscript {
        ArraySubscript {
            size: size.map(|value| Expr::IntLiteral { value, range: range(0, 1) }),
            range: range(0, 3),
        }
    }

    #[test]
    fn test_array_dims() {
        let dims = array_dims(&[
            subscript(Some(3)),
            subscript(None),
            ArraySubscript {
                size: Some(Expr::Name(Ident::new("N", range(0, 1)))),
                range: range(0, 3),
            },
        ]);
        assert_eq!(dims, vec![ArrayDim::Sized(3), ArrayDim::Unsized, ArrayDim::Unsized]);
    }

    #[test]
    fn test_type_usage_combines_dims_and_resolves() {
        let mut unit = unit();
        let root = unit.root_scope();
        let ty = TypeSyntax {
            name: Ident::new("float", range(0, 5)),
            subscripts: vec![subscript(Some(2))],
            range: range(0, 8),
        };
        let declarator_dims = ArrayUsage::with_dims(vec![ArrayDim::Sized(4)]);

        let first = DefaultTypeEvaluator.member_type(&mut unit, &ty, &declarator_dims, root, 0);
        let second = DefaultTypeEvaluator.member_type(&mut unit, &ty, &ArrayUsage::scalar(), root, 1);

        let first = unit.type_usage(first);
        assert_eq!(first.declaration, unit.builtin_type("float"));
        assert_eq!(first.name_range, Some(range(0, 5)));
        assert_eq!(first.array.dims(), &[ArrayDim::Sized(4), ArrayDim::Sized(2)]);
        assert_eq!(unit.type_usage(second).name_range, None);

        let float = unit.builtin_type("float").unwrap();
        assert_eq!(unit.type_declaration(float).usages.len(), 1);
    }

    #[test]
    fn test_expression_binds_names_and_calls() {
        let mut unit = unit();
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

        // vec3(x, x, 1.0) * gl_FragCoord.x
        let expr = Expr::Binary {
            lhs: Box::new(Expr::Call {
                callee: Ident::new("vec3", range(10, 14)),
                args: vec![
                    Expr::Name(Ident::new("x", range(15, 16))),
                    Expr::Name(Ident::new("x", range(18, 19))),
                    Expr::FloatLiteral { range: range(21, 24) },
                ],
                range: range(10, 25),
            }),
            rhs: Box::new(Expr::Field {
                base: Box::new(Expr::Name(Ident::new("gl_FragCoord", range(28, 40)))),
                field: Ident::new("x", range(41, 42)),
                range: range(28, 42),
            }),
            range: range(10, 42),
        };
        DefaultExpressionEvaluator.process_expression(&mut unit, Some(&expr), root);

        assert_eq!(unit.variable_declaration(x).usages.len(), 2);
        let frag_coord = unit.builtin_variable("gl_FragCoord").unwrap();
        assert_eq!(unit.variable_declaration(frag_coord).usages.len(), 1);

        let vec3 = unit.builtin_type("vec3").unwrap();
        let call = unit.type_declaration(vec3).ctor_calls[0];
        let lf = unit.function_call(call).logical_function.unwrap();
        assert_eq!(unit.arity(lf), Some(3));
    }

    #[test]
    fn test_unknown_call_stays_unbound() {
        let mut unit = unit();
        let root = unit.root_scope();
        let expr = Expr::Call {
            callee: Ident::new("missing", range(0, 7)),
            args: Vec::new(),
            range: range(0, 9),
        };
        DefaultExpressionEvaluator.process_expression(&mut unit, Some(&expr), root);
        DefaultExpressionEvaluator.process_expression(&mut unit, None, root);

        let Some(Element::FunctionCall(call)) = unit.element_at(3.into()) else {
            panic!("expected a call at offset 3");
        };
        assert_eq!(unit.function_call(call).logical_function, None);
    }

    #[test]
    fn test_array_shape_extractor() {
        let unit = unit();
        let name = IdentifierOptArray {
            identifier: Ident::new("b", range(0, 1)),
            subscripts: vec![subscript(Some(3))],
        };
        let mut extractor = DefaultArrayShapeExtractor;

        assert_eq!(
            extractor.array_usage(&unit, Some(&name), unit.root_scope()).dims(),
            &[ArrayDim::Sized(3)]
        );
        assert!(!extractor.array_usage(&unit, None, unit.root_scope()).is_array());
    }
}
