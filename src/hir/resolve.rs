//! Name resolution: finding the declaration a name refers to.
//!
//! Resolution walks the scope chain from the innermost scope outwards and
//! falls back to the unit's built-in tables.
//!
//! # Visibility rules
//!
//! A declaration is visible to a usage only if it starts strictly before the
//! usage (no forward references). At each scope level, a same-named type or
//! function declared before the usage hides every variable of that name from
//! outer levels: one name has one binding space per scope level.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::{TextRange, is_before};
use crate::syntax::Expr;

use super::ids::{LogicalFunctionId, ScopeId, TypeDeclId, VarDeclId};
use super::scope::Scope;
use super::unit::TranslationUnit;

/// Query-time resolver over one translation unit.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    unit: &'a TranslationUnit,
}

impl<'a> Resolver<'a> {
    pub fn new(unit: &'a TranslationUnit) -> Self {
        Self { unit }
    }

    /// Find the variable `name` used at `name_range`, starting in `scope`.
    ///
    /// Among same-named variables of one scope level, the first one in
    /// declaration order wins. Returns `None` when the name is hidden by a
    /// type or function, or simply unknown.
    pub fn search_variable_declaration(
        &self,
        name: &str,
        name_range: TextRange,
        scope: ScopeId,
    ) -> Option<VarDeclId> {
        for (id, level) in self.unit.scope_chain(scope) {
            let found = level.variable_declarations().iter().copied().find(|&vd| {
                let vd = self.unit.variable_declaration(vd);
                vd.name.as_deref() == Some(name)
                    && vd.name_range.is_some_and(|r| is_before(r, name_range))
            });
            if let Some(vd) = found {
                trace!("variable `{}` found in {:?} as {:?}", name, id, vd);
                return Some(vd);
            }
            if self.any_type_or_function(name, name_range, level) {
                trace!("variable `{}` hidden by a type or function in {:?}", name, id);
                return None;
            }
        }
        let builtin = self.unit.builtin_variable(name);
        trace!("variable `{}` not declared in source, built-in: {:?}", name, builtin);
        builtin
    }

    fn any_type_or_function(&self, name: &str, name_range: TextRange, level: &Scope) -> bool {
        let declared_before = |range: Option<TextRange>| range.is_some_and(|r| is_before(r, name_range));

        level.type_declarations().iter().any(|&td| {
            let td = self.unit.type_declaration(td);
            td.name == name && declared_before(td.declaration_range)
        }) || level
            .function_prototypes()
            .iter()
            .chain(level.function_definitions())
            .any(|&fd| {
                let fd = self.unit.function_declaration(fd);
                fd.name == name && declared_before(fd.declaration_range)
            })
    }

    /// Find the type `name` used at `name_range`, starting in `scope`.
    pub fn search_type_declaration(
        &self,
        name: &str,
        name_range: TextRange,
        scope: ScopeId,
    ) -> Option<TypeDeclId> {
        for (_, level) in self.unit.scope_chain(scope) {
            let found = level.type_declarations().iter().copied().find(|&td| {
                let td = self.unit.type_declaration(td);
                td.name == name && td.name_range.is_some_and(|r| is_before(r, name_range))
            });
            if found.is_some() {
                return found;
            }
        }
        self.unit.builtin_type(name)
    }

    /// Find the function called `name` at `name_range` for a call whose
    /// arguments have the types `args` (`None` where a type is unknown).
    ///
    /// The innermost scope level declaring the name wins; within it the
    /// overload is picked by [`pick_overload`](Self::pick_overload).
    pub fn search_logical_function(
        &self,
        name: &str,
        name_range: TextRange,
        scope: ScopeId,
        args: &[Option<SmolStr>],
    ) -> Option<LogicalFunctionId> {
        for (id, level) in self.unit.scope_chain(scope) {
            let mut candidates: Vec<LogicalFunctionId> = Vec::new();
            for &fd in level.function_prototypes().iter().chain(level.function_definitions()) {
                let fd = self.unit.function_declaration(fd);
                if fd.name == name
                    && fd.name_range.is_some_and(|r| is_before(r, name_range))
                    && !candidates.contains(&fd.logical_function)
                {
                    candidates.push(fd.logical_function);
                }
            }
            if !candidates.is_empty() {
                trace!("function `{}` has {} candidates in {:?}", name, candidates.len(), id);
                return self.pick_overload(&candidates, args);
            }
        }
        self.pick_overload(self.unit.builtin_functions(name), args)
    }

    /// The constructor overload of `ty` for a call with arguments typed `args`.
    pub fn constructor(&self, ty: TypeDeclId, args: &[Option<SmolStr>]) -> Option<LogicalFunctionId> {
        self.pick_overload(&self.unit.type_declaration(ty).constructors, args)
    }

    /// Pick among overloads: first one whose parameter types agree with every
    /// known argument type, then the first with a matching parameter count,
    /// then simply the first.
    pub fn pick_overload(
        &self,
        candidates: &[LogicalFunctionId],
        args: &[Option<SmolStr>],
    ) -> Option<LogicalFunctionId> {
        let same_arity = |lf: LogicalFunctionId| self.unit.arity(lf) == Some(args.len());
        candidates
            .iter()
            .copied()
            .find(|&lf| same_arity(lf) && self.parameters_accept(lf, args))
            .or_else(|| candidates.iter().copied().find(|&lf| same_arity(lf)))
            .or_else(|| candidates.first().copied())
    }

    fn parameters_accept(&self, lf: LogicalFunctionId, args: &[Option<SmolStr>]) -> bool {
        let Some(fd) = self.unit.logical_function(lf).declaration() else {
            return false;
        };
        self.unit
            .function_declaration(fd)
            .parameter_types
            .iter()
            .zip(args)
            .all(|(&parameter, arg)| {
                let parameter = self.unit.type_usage(parameter);
                arg.as_ref()
                    .is_none_or(|arg| !parameter.array.is_array() && parameter.name == *arg)
            })
    }

    /// Types of call arguments, as far as they can be told without a type checker.
    pub fn argument_types(&self, args: &[Expr], scope: ScopeId) -> Vec<Option<SmolStr>> {
        args.iter().map(|arg| self.expression_type(arg, scope)).collect()
    }

    /// The non-array type name of `expr`, if it follows from literals, named
    /// variables, or calls alone.
    pub fn expression_type(&self, expr: &Expr, scope: ScopeId) -> Option<SmolStr> {
        match expr {
            Expr::IntLiteral { .. } => Some("int".into()),
            Expr::FloatLiteral { .. } => Some("float".into()),
            Expr::BoolLiteral { .. } => Some("bool".into()),
            Expr::Name(ident) => {
                let vd = self.search_variable_declaration(&ident.text, ident.range, scope)?;
                let usage = self.unit.type_usage(self.unit.variable_declaration(vd).type_usage?);
                (!usage.array.is_array()).then(|| usage.name.clone())
            }
            Expr::Call { callee, args, .. } => {
                if self.search_type_declaration(&callee.text, callee.range, scope).is_some() {
                    return Some(callee.text.clone());
                }
                let args = self.argument_types(args, scope);
                let lf = self.search_logical_function(&callee.text, callee.range, scope, &args)?;
                let fd = self.unit.logical_function(lf).declaration()?;
                let returned = self.unit.type_usage(self.unit.function_declaration(fd).return_type);
                (!returned.array.is_array()).then(|| returned.name.clone())
            }
            Expr::ArrayConstructor { .. }
            | Expr::Field { .. }
            | Expr::Index { .. }
            | Expr::Unary { .. }
            | Expr::Binary { .. } => None,
        }
    }
}
