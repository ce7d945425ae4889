//! Built-in environment: the types, constructors, functions and variables a
//! shader can use without declaring them.
//!
//! A [`BuiltinTable`] is a read-only description shared by every document.
//! Each [`TranslationUnit`](super::TranslationUnit) instantiates the table
//! into its own arenas, so per-document lists such as a built-in type's
//! constructor calls never leak between documents.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;

/// The keyword used where a function returns nothing.
pub const VOID: &str = "void";

/// Errors found while validating a user-supplied built-in table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuiltinError {
    #[error("duplicate built-in name `{0}`")]
    DuplicateName(SmolStr),
    #[error("invalid built-in identifier {0:?}")]
    InvalidIdentifier(SmolStr),
    #[error("built-in `{owner}` refers to unknown type `{ty}`")]
    UnknownType { owner: SmolStr, ty: SmolStr },
}

/// A built-in type with its constructor overloads (empty for opaque types).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinType {
    pub name: SmolStr,
    pub constructors: Vec<Vec<SmolStr>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinFunction {
    pub name: SmolStr,
    pub return_type: SmolStr,
    pub parameters: Vec<SmolStr>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinVariable {
    pub name: SmolStr,
    pub ty: SmolStr,
}

/// Read-only description of the predefined environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltinTable {
    types: Vec<BuiltinType>,
    functions: Vec<BuiltinFunction>,
    variables: Vec<BuiltinVariable>,
}

static GLSL: Lazy<Arc<BuiltinTable>> = Lazy::new(|| Arc::new(glsl_table()));

impl BuiltinTable {
    /// The process-wide GLSL environment.
    pub fn glsl() -> Arc<BuiltinTable> {
        Arc::clone(&GLSL)
    }

    /// Create a builder for an empty table.
    pub fn builder() -> BuiltinTableBuilder {
        BuiltinTableBuilder::default()
    }

    /// Get the built-in types.
    pub fn types(&self) -> &[BuiltinType] {
        &self.types
    }

    /// Get the built-in functions, overloads listed separately.
    pub fn functions(&self) -> &[BuiltinFunction] {
        &self.functions
    }

    /// Get the built-in variables.
    pub fn variables(&self) -> &[BuiltinVariable] {
        &self.variables
    }

    /// Check identifiers, name uniqueness, and that every referenced type exists.
    pub fn validate(&self) -> Result<(), BuiltinError> {
        let mut type_names = FxHashSet::default();
        for ty in &self.types {
            check_identifier(&ty.name)?;
            if !type_names.insert(ty.name.clone()) {
                return Err(BuiltinError::DuplicateName(ty.name.clone()));
            }
        }

        let known = |owner: &SmolStr, ty: &SmolStr| {
            if type_names.contains(ty) {
                Ok(())
            } else {
                Err(BuiltinError::UnknownType {
                    owner: owner.clone(),
                    ty: ty.clone(),
                })
            }
        };

        for ty in &self.types {
            for parameter in ty.constructors.iter().flatten() {
                known(&ty.name, parameter)?;
            }
        }

        let mut function_names = FxHashSet::default();
        for function in &self.functions {
            check_identifier(&function.name)?;
            if type_names.contains(&function.name) {
                return Err(BuiltinError::DuplicateName(function.name.clone()));
            }
            if function.return_type != VOID {
                known(&function.name, &function.return_type)?;
            }
            for parameter in &function.parameters {
                known(&function.name, parameter)?;
            }
            function_names.insert(function.name.clone());
        }

        let mut variable_names = FxHashSet::default();
        for variable in &self.variables {
            check_identifier(&variable.name)?;
            if type_names.contains(&variable.name)
                || function_names.contains(&variable.name)
                || !variable_names.insert(variable.name.clone())
            {
                return Err(BuiltinError::DuplicateName(variable.name.clone()));
            }
            known(&variable.name, &variable.ty)?;
        }

        Ok(())
    }
}

fn check_identifier(name: &SmolStr) -> Result<(), BuiltinError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first == '_' || unicode_ident::is_xid_start(first))
                && chars.all(unicode_ident::is_xid_continue)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(BuiltinError::InvalidIdentifier(name.clone()))
    }
}

/// Builder for custom built-in environments (e.g. engine-specific uniforms).
#[derive(Debug, Default)]
pub struct BuiltinTableBuilder {
    table: BuiltinTable,
}

impl BuiltinTableBuilder {
    /// Start from an existing table, e.g. [`BuiltinTable::glsl`], and extend it.
    pub fn extend(table: &BuiltinTable) -> Self {
        Self {
            table: table.clone(),
        }
    }

    /// A type that cannot be constructed (samplers, images).
    pub fn opaque_type(mut self, name: &str) -> Self {
        self.table.types.push(BuiltinType {
            name: name.into(),
            constructors: Vec::new(),
        });
        self
    }

    /// A type with the given constructor signatures.
    pub fn constructible_type(mut self, name: &str, constructors: &[&[&str]]) -> Self {
        self.table.types.push(BuiltinType {
            name: name.into(),
            constructors: sigs(constructors),
        });
        self
    }

    /// Add one function overload.
    pub fn function(mut self, name: &str, return_type: &str, parameters: &[&str]) -> Self {
        self.table.functions.push(BuiltinFunction {
            name: name.into(),
            return_type: return_type.into(),
            parameters: parameters.iter().map(|&p| SmolStr::new(p)).collect(),
        });
        self
    }

    /// Add a predefined variable.
    pub fn variable(mut self, name: &str, ty: &str) -> Self {
        self.table.variables.push(BuiltinVariable {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Validate and finish the table.
    pub fn build(self) -> Result<BuiltinTable, BuiltinError> {
        self.table.validate()?;
        Ok(self.table)
    }
}

// ============================================================================
// GLSL ENVIRONMENT
// ============================================================================

const SCALARS: [&str; 4] = ["float", "int", "uint", "bool"];
const GEN_TYPES: [&str; 4] = ["float", "vec2", "vec3", "vec4"];

fn sigs(params: &[&[&str]]) -> Vec<Vec<SmolStr>> {
    params
        .iter()
        .map(|list| list.iter().map(|&p| SmolStr::new(p)).collect())
        .collect()
}

fn vector_constructors(component: &str, prefix: &str, size: usize) -> Vec<Vec<SmolStr>> {
    let v2 = format!("{prefix}vec2");
    let v3 = format!("{prefix}vec3");
    let (v2, v3) = (v2.as_str(), v3.as_str());
    let c = component;
    let mut ctors = sigs(&[&[c]]);
    ctors.push(vec![SmolStr::new(c); size]);
    match size {
        3 => ctors.extend(sigs(&[&[v2, c], &[c, v2]])),
        4 => ctors.extend(sigs(&[&[v3, c], &[v2, v2], &[c, v3]])),
        _ => {}
    }
    ctors
}

fn glsl_table() -> BuiltinTable {
    let mut types: Vec<BuiltinType> = SCALARS
        .iter()
        .map(|&name| BuiltinType {
            name: name.into(),
            constructors: SCALARS.iter().map(|&s| vec![SmolStr::new(s)]).collect(),
        })
        .collect();

    for (component, prefix) in [("float", ""), ("int", "i"), ("uint", "u"), ("bool", "b")] {
        for size in 2..=4 {
            types.push(BuiltinType {
                name: format!("{prefix}vec{size}").into(),
                constructors: vector_constructors(component, prefix, size),
            });
        }
    }

    for size in 2..=4usize {
        let column = format!("vec{size}");
        types.push(BuiltinType {
            name: format!("mat{size}").into(),
            constructors: vec![
                vec![SmolStr::new("float")],
                vec![SmolStr::new("float"); size * size],
                vec![SmolStr::new(&column); size],
            ],
        });
    }

    for sampler in ["sampler2D", "sampler3D", "samplerCube"] {
        types.push(BuiltinType {
            name: sampler.into(),
            constructors: Vec::new(),
        });
    }

    let mut functions = Vec::new();
    let mut function = |name: &str, return_type: &str, parameters: &[&str]| {
        functions.push(BuiltinFunction {
            name: name.into(),
            return_type: return_type.into(),
            parameters: parameters.iter().map(|&p| SmolStr::new(p)).collect(),
        });
    };

    for g in GEN_TYPES {
        for name in [
            "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "exp", "log", "exp2",
            "log2", "sqrt", "inversesqrt", "abs", "sign", "floor", "ceil", "fract", "normalize",
        ] {
            function(name, g, &[g]);
        }
        for name in ["pow", "mod", "min", "max", "step", "reflect"] {
            function(name, g, &[g, g]);
        }
        for name in ["clamp", "mix", "smoothstep"] {
            function(name, g, &[g, g, g]);
        }
        function("length", "float", &[g]);
        function("distance", "float", &[g, g]);
        function("dot", "float", &[g, g]);
    }
    function("cross", "vec3", &["vec3", "vec3"]);
    function("texture", "vec4", &["sampler2D", "vec2"]);
    function("texture", "vec4", &["sampler3D", "vec3"]);
    function("texture", "vec4", &["samplerCube", "vec3"]);

    let variables = [
        ("gl_Position", "vec4"),
        ("gl_PointSize", "float"),
        ("gl_VertexID", "int"),
        ("gl_InstanceID", "int"),
        ("gl_FragCoord", "vec4"),
        ("gl_FrontFacing", "bool"),
        ("gl_PointCoord", "vec2"),
        ("gl_FragDepth", "float"),
    ]
    .into_iter()
    .map(|(name, ty)| BuiltinVariable {
        name: name.into(),
        ty: ty.into(),
    })
    .collect();

    BuiltinTable {
        types,
        functions,
        variables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glsl_table_is_valid() {
        let table = BuiltinTable::glsl();
        assert_eq!(table.validate(), Ok(()));
        assert!(table.types().iter().any(|t| t.name == "vec3"));
        assert!(table.variables().iter().any(|v| v.name == "gl_Position"));
    }

    #[test]
    fn test_glsl_table_is_shared() {
        assert!(Arc::ptr_eq(&BuiltinTable::glsl(), &BuiltinTable::glsl()));
    }

    #[test]
    fn test_vec3_constructor_overloads() {
        let table = BuiltinTable::glsl();
        let vec3 = table.types().iter().find(|t| t.name == "vec3").unwrap();
        let arities: Vec<_> = vec3.constructors.iter().map(Vec::len).collect();
        assert_eq!(arities, vec![1, 3, 2, 2]);
    }

    #[test]
    fn test_builder_rejects_duplicate_type() {
        let result = BuiltinTable::builder()
            .opaque_type("image2D")
            .opaque_type("image2D")
            .build();
        assert_eq!(result, Err(BuiltinError::DuplicateName("image2D".into())));
    }

    #[test]
    fn test_builder_rejects_variable_shadowing_function() {
        let result = BuiltinTable::builder()
            .opaque_type("float")
            .function("noise", "float", &["float"])
            .variable("noise", "float")
            .build();
        assert_eq!(result, Err(BuiltinError::DuplicateName("noise".into())));
    }

    #[test]
    fn test_builder_rejects_invalid_identifier() {
        let result = BuiltinTable::builder().opaque_type("2D").build();
        assert_eq!(result, Err(BuiltinError::InvalidIdentifier("2D".into())));

        let result = BuiltinTable::builder().opaque_type("").build();
        assert!(matches!(result, Err(BuiltinError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_builder_rejects_unknown_type() {
        let result = BuiltinTable::builder()
            .variable("u_time", "float")
            .build();
        assert_eq!(
            result,
            Err(BuiltinError::UnknownType {
                owner: "u_time".into(),
                ty: "float".into(),
            })
        );
    }

    #[test]
    fn test_builder_extends_glsl() {
        let table = BuiltinTableBuilder::extend(&BuiltinTable::glsl())
            .variable("u_time", "float")
            .function("noise", VOID, &["vec2"])
            .build()
            .unwrap();
        assert!(table.variables().iter().any(|v| v.name == "u_time"));
    }
}
