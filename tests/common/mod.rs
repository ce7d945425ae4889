//! Shared fixtures: locate identifiers in a source string and build the
//! syntax nodes a parser would hand over.

#![allow(dead_code)]

use glsl::TextRange;
use glsl::syntax::{
    ArraySubscript, Declarator, Expr, Ident, IdentifierOptArray, TypeSyntax,
    VariableDeclarationNode,
};

pub struct Source {
    pub text: &'static str,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Source {
    pub fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Range of the `nth` whole-word occurrence of `word`.
    pub fn range(&self, word: &str, nth: usize) -> TextRange {
        let bytes = self.text.as_bytes();
        let (start, _) = self
            .text
            .match_indices(word)
            .filter(|&(start, _)| {
                let end = start + word.len();
                (start == 0 || !is_ident_byte(bytes[start - 1]))
                    && (end == bytes.len() || !is_ident_byte(bytes[end]))
            })
            .nth(nth)
            .unwrap_or_else(|| panic!("`{word}` #{nth} not in source"));
        TextRange::at((start as u32).into(), (word.len() as u32).into())
    }

    pub fn ident(&self, word: &str, nth: usize) -> Ident {
        Ident::new(word, self.range(word, nth))
    }

    pub fn name(&self, word: &str, nth: usize) -> Expr {
        Expr::Name(self.ident(word, nth))
    }

    pub fn ty(&self, word: &str, nth: usize) -> TypeSyntax {
        let name = self.ident(word, nth);
        TypeSyntax {
            range: name.range,
            name,
            subscripts: Vec::new(),
        }
    }

    /// `word[size]` as a type.
    pub fn array_ty(&self, word: &str, nth: usize, size: u64) -> TypeSyntax {
        let mut ty = self.ty(word, nth);
        ty.subscripts.push(subscript(size, ty.range.end()));
        ty.range = TextRange::new(ty.range.start(), ty.subscripts[0].range.end());
        ty
    }

    pub fn call(&self, word: &str, nth: usize, args: Vec<Expr>) -> Expr {
        let callee = self.ident(word, nth);
        let end = args
            .last()
            .map_or(callee.range.end(), |a| a.range().end())
            .max(callee.range.end());
        Expr::Call {
            range: TextRange::new(callee.range.start(), end),
            callee,
            args,
        }
    }

    pub fn declarator(&self, word: &str, nth: usize, initializer: Option<Expr>) -> Declarator {
        let identifier = self.ident(word, nth);
        let end = initializer
            .as_ref()
            .map_or(identifier.range.end(), |e| e.range().end())
            .max(identifier.range.end());
        Declarator {
            range: TextRange::new(identifier.range.start(), end),
            name: IdentifierOptArray {
                identifier,
                subscripts: Vec::new(),
            },
            initializer,
        }
    }
}

/// A float literal; its position does not matter to binding, so enclosing
/// node ranges are clamped to cover their own names instead.
pub fn float() -> Expr {
    Expr::FloatLiteral {
        range: TextRange::empty(0.into()),
    }
}

pub fn subscript(size: u64, at: glsl::TextSize) -> ArraySubscript {
    ArraySubscript {
        size: Some(Expr::IntLiteral {
            value: size,
            range: TextRange::at(at, 1.into()),
        }),
        range: TextRange::at(at, 3.into()),
    }
}

pub fn var_decl(ty: TypeSyntax, declarators: Vec<Declarator>) -> VariableDeclarationNode {
    let end = declarators
        .last()
        .map_or(ty.range.end(), |d| d.range.end())
        .max(ty.range.end());
    VariableDeclarationNode {
        range: TextRange::new(ty.range.start(), end),
        ty,
        declarators,
    }
}
