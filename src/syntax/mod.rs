//! Typed view of a Python module, reduced to what the tag checks look at.
//!
//! Decorators are turned into [`Marker`] records once, while the tree-sitter
//! tree is walked. Nothing downstream inspects raw tree shapes.
mod parser;
mod python;

pub use parser::parse_python;
pub use python::build_module;

use serde::Serialize;

/// 1-based position of a definition's `class`/`def` keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A decorator of the shape `namespace.method` or `namespace.method(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub namespace: String,
    pub method: String,
    pub is_call: bool,
}

impl Marker {
    pub fn call(namespace: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            method: method.into(),
            is_call: true,
        }
    }

    pub fn reference(namespace: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            method: method.into(),
            is_call: false,
        }
    }
}

/// Anything that carries decorators.
pub trait Decorated {
    fn markers(&self) -> &[Marker];
}

/// A direct member of a class body that is checked like a method: a
/// `def`, an `async def` or a nested `class`. Nested classes contribute only
/// their own name and decorators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    pub name: Option<String>,
    pub location: Location,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: Option<String>,
    pub location: Location,
    pub markers: Vec<Marker>,
    /// Named members of the class body, in source order.
    pub members: Vec<MemberDef>,
}

impl Decorated for MemberDef {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl Decorated for ClassDef {
    fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Class definitions in visitation order.
    pub classes: Vec<ClassDef>,
    /// Position of the first syntax error tree-sitter recovered from.
    pub syntax_error: Option<Location>,
}
