//! Unresolved type descriptions.
//!
//! This module contains the declarations read from a type-description
//! document. Type references are still plain names here; they are resolved
//! into [`crate::TypeId`]s by [`crate::TypeCatalog::from_description`].

/// A parsed type-description document.
#[derive(Debug, Clone, Default)]
pub struct Description {
    /// Package prefix applied to every declared type.
    pub package: Option<String>,
    /// Declarations in document order.
    pub decls: Vec<TypeDecl>,
}

impl Description {
    /// Creates an empty description.
    #[must_use]
    pub fn new(package: Option<String>) -> Self {
        Self {
            package,
            decls: Vec::new(),
        }
    }

    /// Adds a declaration.
    pub fn add_decl(&mut self, decl: TypeDecl) {
        self.decls.push(decl);
    }

    /// Returns the qualified name for a declared simple name.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        match self.package.as_deref() {
            Some(package) if !package.is_empty() => format!("{package}.{name}"),
            _ => name.to_string(),
        }
    }

    /// Iterates over message declarations.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            TypeDecl::Message(message) => Some(message),
            _ => None,
        })
    }
}

/// Top-level declaration variants.
#[derive(Debug, Clone)]
pub enum TypeDecl {
    /// Composite type.
    Message(MessageDecl),
    /// Enumeration.
    Enum(EnumDecl),
    /// Additional container type.
    Container(ContainerDecl),
}

impl TypeDecl {
    /// Returns the declared simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Message(m) => &m.name,
            Self::Enum(e) => &e.name,
            Self::Container(c) => &c.name,
        }
    }
}

/// Message declaration.
#[derive(Debug, Clone)]
pub struct MessageDecl {
    /// Message name.
    pub name: String,
    /// Declared fields in order.
    pub fields: Vec<FieldDecl>,
    /// Declared operations in order.
    pub operations: Vec<OperationDecl>,
}

impl MessageDecl {
    /// Creates an empty message declaration.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: FieldDecl) {
        self.fields.push(field);
    }

    /// Adds an operation.
    pub fn add_operation(&mut self, operation: OperationDecl) {
        self.operations.push(operation);
    }
}

/// Field declaration.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Declared type name, `T[]` for arrays.
    pub type_name: String,
    /// Generic argument type names.
    pub args: Vec<String>,
    /// Abstract modifier.
    pub is_abstract: bool,
    /// Transient modifier.
    pub is_transient: bool,
}

impl FieldDecl {
    /// Creates a field declaration.
    #[must_use]
    pub fn new(name: String, type_name: String) -> Self {
        Self {
            name,
            type_name,
            args: Vec::new(),
            is_abstract: false,
            is_transient: false,
        }
    }
}

/// Operation declaration.
#[derive(Debug, Clone)]
pub struct OperationDecl {
    /// Operation name.
    pub name: String,
    /// Parameters in order.
    pub params: Vec<ParamDecl>,
}

impl OperationDecl {
    /// Creates an operation declaration.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }
}

/// Operation parameter declaration.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Parameter type name.
    pub type_name: String,
}

/// Enum declaration.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    /// Enum name.
    pub name: String,
    /// Constants in declaration order.
    pub constants: Vec<String>,
}

impl EnumDecl {
    /// Creates an enum declaration without constants.
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            constants: Vec::new(),
        }
    }
}

/// Declaration of an additional container type.
#[derive(Debug, Clone)]
pub struct ContainerDecl {
    /// Container name.
    pub name: String,
    /// Container flavour.
    pub kind: ContainerKind,
}

/// Container flavours a description can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Single-argument sequence.
    List,
    /// Key/value map.
    Map,
    /// Any other single-argument container.
    Collection,
}

impl ContainerKind {
    /// Parses a container kind from its attribute value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "list" => Some(Self::List),
            "map" => Some(Self::Map),
            "collection" | "set" => Some(Self::Collection),
            _ => None,
        }
    }
}
