//! The translation unit: owner of every scope and entity of one document.
//!
//! A unit is built by a single forward pass. The binder methods here only
//! ever append: declarations to scopes, usages to their declaration,
//! calls to their logical function and, for constructors, to the
//! constructed type. Re-analysis builds a fresh unit.

use std::iter;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{FileId, LineIndex, TextRange, TextSize};
use crate::syntax::Ident;

use super::builtins::BuiltinTable;
use super::ids::{
    FuncCallId, FuncDeclId, LogicalFunctionId, ScopeId, TypeDeclId, TypeUsageId, VarDeclId,
    VarUsageId,
};
use super::scope::Scope;
use super::symbols::{
    ArrayUsage, Element, FunctionCall, FunctionDeclaration, LogicalFunction, TypeDeclaration,
    TypeUsage, VariableDeclaration, VariableUsage,
};

/// Built-in entities instantiated into this unit, keyed by name.
#[derive(Clone, Debug, Default)]
struct BuiltinSymbols {
    variables: FxHashMap<SmolStr, VarDeclId>,
    types: FxHashMap<SmolStr, TypeDeclId>,
    functions: FxHashMap<SmolStr, Vec<LogicalFunctionId>>,
}

/// Input to [`TranslationUnit::declare_function`].
#[derive(Clone, Debug)]
pub struct FunctionSpec {
    pub name: Ident,
    pub declaration_range: TextRange,
    pub scope: ScopeId,
    pub return_type: TypeUsageId,
    /// Parameters, usually registered into `body` beforehand.
    pub parameters: Vec<VarDeclId>,
    pub body: Option<ScopeId>,
    pub is_definition: bool,
}

#[derive(Clone, Debug)]
pub struct TranslationUnit {
    file: FileId,
    line_index: LineIndex,
    scopes: Vec<Scope>,
    variable_declarations: Vec<VariableDeclaration>,
    variable_usages: Vec<VariableUsage>,
    type_declarations: Vec<TypeDeclaration>,
    type_usages: Vec<TypeUsage>,
    function_declarations: Vec<FunctionDeclaration>,
    function_calls: Vec<FunctionCall>,
    logical_functions: Vec<LogicalFunction>,
    builtin: BuiltinSymbols,
    /// User logical functions by name, for overload grouping.
    user_functions: FxHashMap<SmolStr, Vec<LogicalFunctionId>>,
}

impl TranslationUnit {
    /// Create an empty unit for `text` with the given built-in environment.
    pub fn new(file: FileId, text: &str, builtins: &BuiltinTable) -> Self {
        let mut unit = Self {
            file,
            line_index: LineIndex::new(text),
            scopes: vec![Scope::new(None)],
            variable_declarations: Vec::new(),
            variable_usages: Vec::new(),
            type_declarations: Vec::new(),
            type_usages: Vec::new(),
            function_declarations: Vec::new(),
            function_calls: Vec::new(),
            logical_functions: Vec::new(),
            builtin: BuiltinSymbols::default(),
            user_functions: FxHashMap::default(),
        };
        unit.instantiate_builtins(builtins);
        debug!(
            "unit {} created with {} built-in types, {} built-in variables",
            file,
            unit.builtin.types.len(),
            unit.builtin.variables.len()
        );
        unit
    }

    fn instantiate_builtins(&mut self, table: &BuiltinTable) {
        for ty in table.types() {
            let id = self.push_type_declaration(TypeDeclaration {
                name: ty.name.clone(),
                name_range: None,
                declaration_range: None,
                scope: None,
                builtin: true,
                members: None,
                constructors: Vec::new(),
                usages: Vec::new(),
                ctor_calls: Vec::new(),
            });
            self.builtin.types.insert(ty.name.clone(), id);
        }

        for ty in table.types() {
            let Some(&td) = self.builtin.types.get(&ty.name) else {
                continue;
            };
            for parameters in &ty.constructors {
                let parameter_types = parameters
                    .iter()
                    .map(|p| self.builtin_type_usage(p))
                    .collect();
                self.new_constructor(td, ArrayUsage::scalar(), parameter_types);
            }
        }

        for function in table.functions() {
            let return_type = self.builtin_type_usage(&function.return_type);
            let parameter_types = function
                .parameters
                .iter()
                .map(|p| self.builtin_type_usage(p))
                .collect();
            let lf = self.new_logical_function();
            let fd = self.push_function_declaration(FunctionDeclaration {
                name: function.name.clone(),
                name_range: None,
                declaration_range: None,
                scope: None,
                return_type,
                parameters: Vec::new(),
                parameter_types,
                body: None,
                is_definition: false,
                ctor: false,
                builtin: true,
                logical_function: lf,
            });
            self.logical_functions[lf.index()].prototypes.push(fd);
            self.builtin
                .functions
                .entry(function.name.clone())
                .or_default()
                .push(lf);
        }

        for variable in table.variables() {
            let type_usage = self.builtin_type_usage(&variable.ty);
            let id = self.push_variable_declaration(VariableDeclaration {
                name: Some(variable.name.clone()),
                name_range: None,
                scope: None,
                builtin: true,
                declaration_range: None,
                type_usage: Some(type_usage),
                is_parameter: false,
                usages: Vec::new(),
            });
            self.builtin.variables.insert(variable.name.clone(), id);
        }
    }

    fn builtin_type_usage(&mut self, name: &SmolStr) -> TypeUsageId {
        let declaration = self.builtin.types.get(name).copied();
        self.add_type_usage(TypeUsage {
            name: name.clone(),
            name_range: None,
            scope: None,
            declaration,
            array: ArrayUsage::scalar(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Get the document this unit was built from.
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Get the line index of the document text.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// The translation unit's outermost scope.
    pub fn root_scope(&self) -> ScopeId {
        ScopeId::from_index(0)
    }

    /// Get a scope by id.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// `scope` followed by its ancestors, innermost first.
    pub fn scope_chain(&self, scope: ScopeId) -> impl Iterator<Item = (ScopeId, &Scope)> + '_ {
        iter::successors(Some(scope), move |&id| self.scope(id).parent())
            .map(move |id| (id, self.scope(id)))
    }

    /// Get a variable declaration by id.
    pub fn variable_declaration(&self, id: VarDeclId) -> &VariableDeclaration {
        &self.variable_declarations[id.index()]
    }

    /// Get a variable usage by id.
    pub fn variable_usage(&self, id: VarUsageId) -> &VariableUsage {
        &self.variable_usages[id.index()]
    }

    /// Get a type declaration by id.
    pub fn type_declaration(&self, id: TypeDeclId) -> &TypeDeclaration {
        &self.type_declarations[id.index()]
    }

    /// Get a type usage by id.
    pub fn type_usage(&self, id: TypeUsageId) -> &TypeUsage {
        &self.type_usages[id.index()]
    }

    /// Get a function declaration by id.
    pub fn function_declaration(&self, id: FuncDeclId) -> &FunctionDeclaration {
        &self.function_declarations[id.index()]
    }

    /// Get a function call by id.
    pub fn function_call(&self, id: FuncCallId) -> &FunctionCall {
        &self.function_calls[id.index()]
    }

    /// Get a logical function by id.
    pub fn logical_function(&self, id: LogicalFunctionId) -> &LogicalFunction {
        &self.logical_functions[id.index()]
    }

    /// Look up a built-in variable by name.
    pub fn builtin_variable(&self, name: &str) -> Option<VarDeclId> {
        self.builtin.variables.get(name).copied()
    }

    /// Look up a built-in type by name.
    pub fn builtin_type(&self, name: &str) -> Option<TypeDeclId> {
        self.builtin.types.get(name).copied()
    }

    /// Built-in overloads of `name`, in table order.
    pub fn builtin_functions(&self, name: &str) -> &[LogicalFunctionId] {
        self.builtin
            .functions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parameter count of a logical function's canonical declaration.
    pub fn arity(&self, lf: LogicalFunctionId) -> Option<usize> {
        self.logical_function(lf)
            .declaration()
            .map(|fd| self.function_declaration(fd).parameter_types.len())
    }

    // ========================================================================
    // BINDING
    // ========================================================================

    /// Open a block, function body, or struct body scope.
    pub fn add_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent)));
        id
    }

    /// Store a variable declaration and append it to its scope.
    pub fn add_variable_declaration(&mut self, declaration: VariableDeclaration) -> VarDeclId {
        let scope = declaration.scope;
        let id = self.push_variable_declaration(declaration);
        if let Some(scope) = scope {
            self.scopes[scope.index()].variable_declarations.push(id);
        }
        id
    }

    /// Record a variable usage and link it to its declaration.
    pub fn add_variable_usage(
        &mut self,
        name: &Ident,
        scope: ScopeId,
        declaration: Option<VarDeclId>,
    ) -> VarUsageId {
        let id = VarUsageId::from_index(self.variable_usages.len());
        self.variable_usages.push(VariableUsage {
            name: name.text.clone(),
            name_range: name.range,
            scope,
            declaration,
        });
        if let Some(declaration) = declaration {
            self.variable_declarations[declaration.index()].usages.push(id);
        }
        id
    }

    /// Record a type usage. Usages with a source position are linked to
    /// their declaration; synthetic ones are not.
    pub fn add_type_usage(&mut self, usage: TypeUsage) -> TypeUsageId {
        let id = TypeUsageId::from_index(self.type_usages.len());
        if let (Some(declaration), Some(_)) = (usage.declaration, usage.name_range) {
            self.type_declarations[declaration.index()].usages.push(id);
        }
        self.type_usages.push(usage);
        id
    }

    /// Declare a struct type in `scope` and open its member scope.
    ///
    /// Call [`complete_struct`](Self::complete_struct) once the members are
    /// registered to create the implicit constructor.
    pub fn declare_struct(
        &mut self,
        name: &Ident,
        declaration_range: TextRange,
        scope: ScopeId,
    ) -> TypeDeclId {
        let members = self.add_scope(scope);
        let id = self.push_type_declaration(TypeDeclaration {
            name: name.text.clone(),
            name_range: Some(name.range),
            declaration_range: Some(declaration_range),
            scope: Some(scope),
            builtin: false,
            members: Some(members),
            constructors: Vec::new(),
            usages: Vec::new(),
            ctor_calls: Vec::new(),
        });
        self.scopes[scope.index()].type_declarations.push(id);
        debug!("declared struct `{}` as {:?}", name.text, id);
        id
    }

    /// Create the implicit constructor of a struct from its member types.
    ///
    /// Returns `None` for built-in types and for structs already completed.
    pub fn complete_struct(&mut self, ty: TypeDeclId) -> Option<LogicalFunctionId> {
        let declaration = self.type_declaration(ty);
        if declaration.builtin || !declaration.constructors.is_empty() {
            return None;
        }
        let members = declaration.members?;
        let member_types: Vec<TypeUsage> = self
            .scope(members)
            .variable_declarations
            .iter()
            .filter_map(|&vd| self.variable_declaration(vd).type_usage)
            .map(|tu| {
                let usage = self.type_usage(tu);
                TypeUsage {
                    name_range: None,
                    ..usage.clone()
                }
            })
            .collect();
        let parameter_types = member_types
            .into_iter()
            .map(|usage| self.add_type_usage(usage))
            .collect();
        Some(self.new_constructor(ty, ArrayUsage::scalar(), parameter_types))
    }

    /// Create a constructor identity for `ty[...](...)`.
    pub fn declare_array_constructor(
        &mut self,
        ty: TypeDeclId,
        array: ArrayUsage,
    ) -> LogicalFunctionId {
        self.new_constructor(ty, array, Vec::new())
    }

    /// Declare a function prototype or definition, grouping it with every
    /// earlier declaration of the same name and parameter signature.
    pub fn declare_function(&mut self, function: FunctionSpec) -> FuncDeclId {
        let parameter_types: Vec<TypeUsageId> = function
            .parameters
            .iter()
            .filter_map(|&vd| self.variable_declaration(vd).type_usage)
            .collect();

        let existing = self.user_functions.get(&function.name.text).and_then(|lfs| {
            lfs.iter().copied().find(|&lf| {
                self.logical_function(lf).declaration().is_some_and(|fd| {
                    self.same_signature(&self.function_declaration(fd).parameter_types, &parameter_types)
                })
            })
        });
        let lf = match existing {
            Some(lf) => lf,
            None => {
                let lf = self.new_logical_function();
                self.user_functions
                    .entry(function.name.text.clone())
                    .or_default()
                    .push(lf);
                lf
            }
        };

        let id = self.push_function_declaration(FunctionDeclaration {
            name: function.name.text.clone(),
            name_range: Some(function.name.range),
            declaration_range: Some(function.declaration_range),
            scope: Some(function.scope),
            return_type: function.return_type,
            parameters: function.parameters,
            parameter_types,
            body: function.body,
            is_definition: function.is_definition,
            ctor: false,
            builtin: false,
            logical_function: lf,
        });

        let logical = &mut self.logical_functions[lf.index()];
        let scope = &mut self.scopes[function.scope.index()];
        if function.is_definition {
            logical.definitions.push(id);
            scope.function_definitions.push(id);
        } else {
            logical.prototypes.push(id);
            scope.function_prototypes.push(id);
        }
        debug!(
            "declared function `{}` as {:?} in {:?} (existing group: {})",
            function.name.text,
            id,
            lf,
            existing.is_some()
        );
        id
    }

    /// Record a call and link it to its logical function; constructor calls
    /// are also appended to the constructed type.
    pub fn add_function_call(
        &mut self,
        name: &Ident,
        scope: ScopeId,
        logical_function: Option<LogicalFunctionId>,
    ) -> FuncCallId {
        let id = FuncCallId::from_index(self.function_calls.len());
        self.function_calls.push(FunctionCall {
            name: name.text.clone(),
            name_range: name.range,
            scope,
            logical_function,
        });

        let Some(lf) = logical_function else {
            return id;
        };
        self.logical_functions[lf.index()].calls.push(id);

        let constructed = self
            .logical_function(lf)
            .declaration()
            .map(|fd| self.function_declaration(fd))
            .filter(|fd| fd.ctor)
            .and_then(|fd| self.type_usage(fd.return_type).declaration);
        if let Some(ty) = constructed {
            self.type_declarations[ty.index()].ctor_calls.push(id);
        }
        id
    }

    // ========================================================================
    // ELEMENT LOOKUP
    // ========================================================================

    /// The most specific element whose name covers `offset`.
    ///
    /// An offset at the end of a name still selects it, so a cursor placed
    /// right after an identifier finds that identifier.
    pub fn element_at(&self, offset: TextSize) -> Option<Element> {
        let mut best: Option<(TextRange, Element)> = None;
        let mut consider = |range: Option<TextRange>, element: Element| {
            let Some(range) = range else { return };
            if !range.contains_inclusive(offset) {
                return;
            }
            if best.is_none_or(|(current, _)| range.len() < current.len()) {
                best = Some((range, element));
            }
        };

        for (index, fd) in self.function_declarations.iter().enumerate() {
            let id = FuncDeclId::from_index(index);
            let element = if fd.is_definition {
                Element::FunctionDefinition(id)
            } else {
                Element::FunctionPrototype(id)
            };
            consider(fd.name_range, element);
        }
        for (index, call) in self.function_calls.iter().enumerate() {
            consider(
                Some(call.name_range),
                Element::FunctionCall(FuncCallId::from_index(index)),
            );
        }
        for (index, vd) in self.variable_declarations.iter().enumerate() {
            consider(
                vd.name_range,
                Element::VariableDeclaration(VarDeclId::from_index(index)),
            );
        }
        for (index, usage) in self.variable_usages.iter().enumerate() {
            consider(
                Some(usage.name_range),
                Element::VariableUsage(VarUsageId::from_index(index)),
            );
        }
        for (index, td) in self.type_declarations.iter().enumerate() {
            consider(
                td.name_range,
                Element::TypeDeclaration(TypeDeclId::from_index(index)),
            );
        }
        for (index, usage) in self.type_usages.iter().enumerate() {
            consider(
                usage.name_range,
                Element::TypeUsage(TypeUsageId::from_index(index)),
            );
        }

        best.map(|(_, element)| element)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn push_variable_declaration(&mut self, declaration: VariableDeclaration) -> VarDeclId {
        let id = VarDeclId::from_index(self.variable_declarations.len());
        self.variable_declarations.push(declaration);
        id
    }

    fn push_type_declaration(&mut self, declaration: TypeDeclaration) -> TypeDeclId {
        let id = TypeDeclId::from_index(self.type_declarations.len());
        self.type_declarations.push(declaration);
        id
    }

    fn push_function_declaration(&mut self, declaration: FunctionDeclaration) -> FuncDeclId {
        let id = FuncDeclId::from_index(self.function_declarations.len());
        self.function_declarations.push(declaration);
        id
    }

    fn new_logical_function(&mut self) -> LogicalFunctionId {
        let id = LogicalFunctionId::from_index(self.logical_functions.len());
        self.logical_functions.push(LogicalFunction::default());
        id
    }

    /// A synthetic constructor prototype returning `ty` with the given shape.
    ///
    /// Only non-array constructors are registered as overloads of the type.
    fn new_constructor(
        &mut self,
        ty: TypeDeclId,
        array: ArrayUsage,
        parameter_types: Vec<TypeUsageId>,
    ) -> LogicalFunctionId {
        let declaration = self.type_declaration(ty);
        let (name, scope, builtin) = (declaration.name.clone(), declaration.scope, declaration.builtin);
        let is_array = array.is_array();

        let return_type = self.add_type_usage(TypeUsage {
            name: name.clone(),
            name_range: None,
            scope,
            declaration: Some(ty),
            array,
        });
        let lf = self.new_logical_function();
        let fd = self.push_function_declaration(FunctionDeclaration {
            name,
            name_range: None,
            declaration_range: None,
            scope,
            return_type,
            parameters: Vec::new(),
            parameter_types,
            body: None,
            is_definition: false,
            ctor: true,
            builtin,
            logical_function: lf,
        });
        self.logical_functions[lf.index()].prototypes.push(fd);
        if !is_array {
            self.type_declarations[ty.index()].constructors.push(lf);
        }
        lf
    }

    fn same_signature(&self, a: &[TypeUsageId], b: &[TypeUsageId]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(&a, &b)| {
                let (a, b) = (self.type_usage(a), self.type_usage(b));
                a.name == b.name && a.array == b.array
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::ArrayDim;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    fn unit() -> TranslationUnit {
        TranslationUnit::new(FileId::new(0), "", &BuiltinTable::glsl())
    }

    fn float_usage(unit: &mut TranslationUnit, at: u32) -> TypeUsageId {
        let declaration = unit.builtin_type("float");
        unit.add_type_usage(TypeUsage {
            name: "float".into(),
            name_range: Some(range(at, at + 5)),
            scope: Some(unit.root_scope()),
            declaration,
            array: ArrayUsage::scalar(),
        })
    }

    fn unnamed_float(unit: &mut TranslationUnit, scope: ScopeId, at: u32) -> VarDeclId {
        let type_usage = float_usage(unit, at);
        unit.add_variable_declaration(VariableDeclaration {
            name: None,
            name_range: None,
            scope: Some(scope),
            builtin: false,
            declaration_range: Some(range(at, at + 5)),
            type_usage: Some(type_usage),
            is_parameter: true,
            usages: Vec::new(),
        })
    }

    fn function_input(unit: &mut TranslationUnit, at: u32, body: ScopeId, is_definition: bool) -> FunctionSpec {
        let return_type = float_usage(unit, at);
        let parameters = vec![unnamed_float(unit, body, at + 10)];
        FunctionSpec {
            name: Ident::new("f", range(at + 6, at + 7)),
            declaration_range: range(at, at + 20),
            scope: unit.root_scope(),
            return_type,
            parameters,
            body: Some(body),
            is_definition,
        }
    }

    #[test]
    fn test_builtins_are_instantiated_per_unit() {
        let unit = unit();
        let vec3 = unit.builtin_type("vec3").unwrap();
        assert!(unit.type_declaration(vec3).builtin);
        assert_eq!(unit.type_declaration(vec3).constructors.len(), 4);
        assert!(unit.builtin_variable("gl_Position").is_some());
        assert_eq!(unit.builtin_functions("texture").len(), 3);
        assert!(unit.builtin_functions("nope").is_empty());
        assert!(unit.scope(unit.root_scope()).is_empty());
    }

    #[test]
    fn test_scope_chain_innermost_first() {
        let mut unit = unit();
        let root = unit.root_scope();
        let body = unit.add_scope(root);
        let block = unit.add_scope(body);

        let chain: Vec<_> = unit.scope_chain(block).map(|(id, _)| id).collect();
        assert_eq!(chain, vec![block, body, root]);
    }

    #[test]
    fn test_prototype_and_definition_share_logical_function() {
        let mut unit = unit();
        let root = unit.root_scope();
        let proto_scope = unit.add_scope(root);
        let proto = function_input(&mut unit, 0, proto_scope, false);
        let proto = unit.declare_function(proto);
        let body = unit.add_scope(root);
        let def = function_input(&mut unit, 30, body, true);
        let def = unit.declare_function(def);

        let lf = unit.function_declaration(proto).logical_function;
        assert_eq!(unit.function_declaration(def).logical_function, lf);
        assert_eq!(unit.logical_function(lf).declaration(), Some(def));
        assert_eq!(unit.scope(root).function_prototypes(), &[proto]);
        assert_eq!(unit.scope(root).function_definitions(), &[def]);
    }

    #[test]
    fn test_different_signature_is_a_new_logical_function() {
        let mut unit = unit();
        let root = unit.root_scope();
        let body = unit.add_scope(root);
        let first = function_input(&mut unit, 0, body, true);
        let first = unit.declare_function(first);

        let other_body = unit.add_scope(root);
        let return_type = float_usage(&mut unit, 40);
        let second = unit.declare_function(FunctionSpec {
            name: Ident::new("f", range(46, 47)),
            declaration_range: range(40, 50),
            scope: root,
            return_type,
            parameters: Vec::new(),
            body: Some(other_body),
            is_definition: true,
        });

        assert_ne!(
            unit.function_declaration(first).logical_function,
            unit.function_declaration(second).logical_function
        );
    }

    #[test]
    fn test_constructor_call_is_linked_to_type() {
        let mut unit = unit();
        let root = unit.root_scope();
        let vec3 = unit.builtin_type("vec3").unwrap();
        let ctor = unit.type_declaration(vec3).constructors[1];

        let call = unit.add_function_call(&Ident::new("vec3", range(0, 4)), root, Some(ctor));
        assert_eq!(unit.logical_function(ctor).calls, vec![call]);
        assert_eq!(unit.type_declaration(vec3).ctor_calls, vec![call]);
    }

    #[test]
    fn test_struct_constructor_from_members() {
        let mut unit = unit();
        let root = unit.root_scope();
        let light = unit.declare_struct(&Ident::new("Light", range(7, 12)), range(0, 40), root);
        let members = unit.type_declaration(light).members.unwrap();
        unnamed_float(&mut unit, members, 15);
        unnamed_float(&mut unit, members, 25);

        let ctor = unit.complete_struct(light).unwrap();
        assert_eq!(unit.arity(ctor), Some(2));
        assert_eq!(unit.type_declaration(light).constructors, vec![ctor]);
        assert_eq!(unit.complete_struct(light), None);
        // Member types stay linked once; the constructor's copies are synthetic.
        let float = unit.builtin_type("float").unwrap();
        assert_eq!(unit.type_declaration(float).usages.len(), 2);
    }

    #[test]
    fn test_array_constructor_is_not_an_overload() {
        let mut unit = unit();
        let float = unit.builtin_type("float").unwrap();
        let before = unit.type_declaration(float).constructors.len();
        let lf = unit.declare_array_constructor(
            float,
            ArrayUsage::with_dims(vec![ArrayDim::Sized(3)]),
        );
        assert_eq!(unit.type_declaration(float).constructors.len(), before);
        assert_eq!(unit.arity(lf), Some(0));
    }

    #[test]
    fn test_element_at_prefers_narrowest_name() {
        let mut unit = unit();
        let root = unit.root_scope();
        let usage = float_usage(&mut unit, 0);
        let vd = unit.add_variable_declaration(VariableDeclaration {
            name: Some("a".into()),
            name_range: Some(range(6, 7)),
            scope: Some(root),
            builtin: false,
            declaration_range: Some(range(0, 7)),
            type_usage: Some(usage),
            is_parameter: false,
            usages: Vec::new(),
        });

        assert_eq!(unit.element_at(2.into()), Some(Element::TypeUsage(usage)));
        assert_eq!(unit.element_at(7.into()), Some(Element::VariableDeclaration(vd)));
        assert_eq!(unit.element_at(20.into()), None);
    }
}
