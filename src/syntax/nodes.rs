use smol_str::SmolStr;

use crate::base::TextRange;

/// An identifier token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub text: SmolStr,
    pub range: TextRange,
}

impl Ident {
    /// Create an identifier token.
    pub fn new(text: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }
}

/// One `[size]` suffix; `size` is `None` for `[]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySubscript {
    pub size: Option<Expr>,
    pub range: TextRange,
}

/// `identifier_optarray`: a name with zero or more array suffixes, e.g. `b[3]`.
#[derive(Clone, Debug, PartialEq)]
pub struct IdentifierOptArray {
    pub identifier: Ident,
    pub subscripts: Vec<ArraySubscript>,
}

/// One declarator of a declaration: `b[3]` or `c = 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub name: IdentifierOptArray,
    pub initializer: Option<Expr>,
    pub range: TextRange,
}

/// The type part of a declaration, e.g. `float` or `float[2]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSyntax {
    pub name: Ident,
    pub subscripts: Vec<ArraySubscript>,
    pub range: TextRange,
}

/// A function parameter. Prototypes may leave the parameter unnamed.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterNode {
    pub ty: TypeSyntax,
    pub declarator: Option<Declarator>,
    pub range: TextRange,
}

/// A variable declaration or struct member: `Type a[2] = expr, b, c;`.
///
/// A bare type with no declarators is legal for struct members.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarationNode {
    pub ty: TypeSyntax,
    pub declarators: Vec<Declarator>,
    pub range: TextRange,
}

/// Expressions, reduced to what binding needs to see.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    IntLiteral { value: u64, range: TextRange },
    FloatLiteral { range: TextRange },
    BoolLiteral { range: TextRange },
    Name(Ident),
    /// A function call or a constructor call through a type name: `f(x)`, `vec3(1.0)`.
    Call {
        callee: Ident,
        args: Vec<Expr>,
        range: TextRange,
    },
    /// An array constructor: `float[3](1.0, 2.0, 3.0)`.
    ArrayConstructor {
        ty: TypeSyntax,
        args: Vec<Expr>,
        range: TextRange,
    },
    Field {
        base: Box<Expr>,
        field: Ident,
        range: TextRange,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
        range: TextRange,
    },
    Unary {
        operand: Box<Expr>,
        range: TextRange,
    },
    Binary {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        range: TextRange,
    },
}

impl Expr {
    /// Get the source range of the whole expression.
    pub fn range(&self) -> TextRange {
        match self {
            Expr::IntLiteral { range, .. }
            | Expr::FloatLiteral { range }
            | Expr::BoolLiteral { range }
            | Expr::Call { range, .. }
            | Expr::ArrayConstructor { range, .. }
            | Expr::Field { range, .. }
            | Expr::Index { range, .. }
            | Expr::Unary { range, .. }
            | Expr::Binary { range, .. } => *range,
            Expr::Name(ident) => ident.range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_expr_range() {
        let name = Expr::Name(Ident::new("x", range(4, 5)));
        assert_eq!(name.range(), range(4, 5));

        let binary = Expr::Binary {
            lhs: Box::new(name),
            rhs: Box::new(Expr::IntLiteral { value: 1, range: range(8, 9) }),
            range: range(4, 9),
        };
        assert_eq!(binary.range(), range(4, 9));
    }
}
