//! Type model definitions.
//!
//! This module contains the data structures describing a type graph:
//! type identities, type kinds, fields with their generic arguments,
//! operations and enum constants.

use std::fmt;

/// Opaque handle identifying one type within a [`crate::TypeCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Returns the raw index of this identity.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Well-known scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    /// Boolean flag.
    Boolean,
    /// Single byte.
    Byte,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Text string.
    String,
}

impl PrimitiveType {
    /// All primitive types in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Boolean,
        Self::Byte,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::String,
    ];

    /// Returns the unboxed type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Returns the boxed type name, if the primitive has a boxed form.
    #[must_use]
    pub const fn boxed_name(&self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("Boolean"),
            Self::Byte => Some("Byte"),
            Self::Int => Some("Integer"),
            Self::Long => Some("Long"),
            Self::Float => Some("Float"),
            Self::Double => Some("Double"),
            Self::String => None,
        }
    }

    /// Parses a primitive type from its unboxed or boxed name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boolean" | "Boolean" => Some(Self::Boolean),
            "byte" | "Byte" => Some(Self::Byte),
            "int" | "Integer" => Some(Self::Int),
            "long" | "Long" => Some(Self::Long),
            "float" | "Float" => Some(Self::Float),
            "double" | "Double" => Some(Self::Double),
            "string" | "String" => Some(Self::String),
            _ => None,
        }
    }
}

/// Classification of a type as seen by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Scalar type, boxed or not.
    Primitive(PrimitiveType),
    /// User-defined composite type.
    Message,
    /// Enumeration with ordered constants.
    Enum,
    /// Single-dimension array of the component type.
    Array(TypeId),
    /// The parameterized single-argument sequence type.
    List,
    /// Key/value container taking two generic arguments.
    Map,
    /// Any other single-argument container.
    Collection,
}

impl TypeKind {
    /// Returns true if this kind takes generic arguments.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Collection)
    }

    /// Number of generic arguments the kind expects.
    #[must_use]
    pub const fn generic_arity(&self) -> usize {
        match self {
            Self::Map => 2,
            Self::List | Self::Collection => 1,
            _ => 0,
        }
    }
}

/// Field modifier flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Field is declared abstract.
    pub is_abstract: bool,
    /// Field is excluded from serialization.
    pub is_transient: bool,
}

impl Modifiers {
    /// Modifiers for a transient field.
    #[must_use]
    pub const fn transient() -> Self {
        Self {
            is_abstract: false,
            is_transient: true,
        }
    }

    /// Modifiers for an abstract field.
    #[must_use]
    pub const fn abstract_field() -> Self {
        Self {
            is_abstract: true,
            is_transient: false,
        }
    }

    /// Returns true if a field carrying these modifiers emits nothing.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.is_abstract || self.is_transient
    }
}

/// A declared field of a message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub type_id: TypeId,
    /// Generic type arguments, in declaration order.
    pub generic_args: Vec<TypeId>,
    /// Modifier flags.
    pub modifiers: Modifiers,
}

impl FieldDef {
    /// Creates a field with no generic arguments and no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            generic_args: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    /// Sets the generic type arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = TypeId>) -> Self {
        self.generic_args = args.into_iter().collect();
        self
    }

    /// Sets the modifier flags.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A parameter of a declared operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub type_id: TypeId,
}

impl ParamDef {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
        }
    }
}

/// A callable member declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDef {
    /// Operation name.
    pub name: String,
    /// Ordered parameters.
    pub params: Vec<ParamDef>,
}

impl OperationDef {
    /// Creates an operation without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.params.push(ParamDef::new(name, type_id));
        self
    }
}

/// Full description of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Simple (unqualified) name.
    pub name: String,
    /// Fully qualified name.
    pub qualified_name: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Declared fields (messages only).
    pub fields: Vec<FieldDef>,
    /// Declared operations.
    pub operations: Vec<OperationDef>,
    /// Enum constants in declaration order (enums only).
    pub constants: Vec<String>,
}

impl TypeDef {
    /// Creates a type definition of the given kind.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            name: simple_name(&qualified_name).to_string(),
            qualified_name,
            kind,
            fields: Vec::new(),
            operations: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Creates an empty message definition.
    #[must_use]
    pub fn message(qualified_name: impl Into<String>) -> Self {
        Self::new(qualified_name, TypeKind::Message)
    }

    /// Creates an enum definition with the given constants.
    #[must_use]
    pub fn enumeration<I, S>(qualified_name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut def = Self::new(qualified_name, TypeKind::Enum);
        def.constants = constants.into_iter().map(Into::into).collect();
        def
    }

    /// Overrides the simple name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns true if this is an enum type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum)
    }

    /// Returns true if this is a message type.
    #[must_use]
    pub const fn is_message(&self) -> bool {
        matches!(self.kind, TypeKind::Message)
    }

    /// Returns the array component type, if this is an array.
    #[must_use]
    pub const fn component(&self) -> Option<TypeId> {
        match self.kind {
            TypeKind::Array(component) => Some(component),
            _ => None,
        }
    }
}

/// Returns the segment after the last `.` or `::` of a qualified name.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    let tail = qualified.rsplit("::").next().unwrap_or(qualified);
    tail.rsplit('.').next().unwrap_or(tail)
}
