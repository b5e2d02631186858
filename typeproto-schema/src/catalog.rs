//! In-memory type catalog.
//!
//! This module provides the resolved, identity-addressed representation of a
//! type graph that the generator walks. A catalog always contains the
//! built-in primitives (unboxed and boxed) and the built-in containers.

use crate::description::{ContainerKind, Description, TypeDecl};
use crate::error::SchemaError;
use crate::info::TypeInfo;
use crate::types::{
    FieldDef, Modifiers, OperationDef, PrimitiveType, TypeDef, TypeId, TypeKind, simple_name,
};
use crate::validation::validate_description;
use std::collections::HashMap;

/// Built-in container names and their kinds, in registration order.
pub(crate) const BUILTIN_CONTAINERS: [(&str, TypeKind); 5] = [
    ("List", TypeKind::List),
    ("Map", TypeKind::Map),
    ("Set", TypeKind::Collection),
    ("Collection", TypeKind::Collection),
    ("Queue", TypeKind::Collection),
];

const BOXED_BASE: u32 = PrimitiveType::ALL.len() as u32;
const CONTAINER_BASE: u32 = BOXED_BASE + PrimitiveType::ALL.len() as u32 - 1;

/// Identity-addressed collection of type definitions.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: Vec<TypeDef>,
    by_name: HashMap<String, TypeId>,
    arrays: HashMap<TypeId, TypeId>,
    native: HashMap<std::any::TypeId, TypeId>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    /// Creates a catalog holding only the built-in types.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
            arrays: HashMap::new(),
            native: HashMap::new(),
        };

        for primitive in PrimitiveType::ALL {
            catalog.add(TypeDef::new(
                primitive.name(),
                TypeKind::Primitive(primitive),
            ));
        }
        for primitive in PrimitiveType::ALL {
            if let Some(boxed) = primitive.boxed_name() {
                catalog.add(TypeDef::new(boxed, TypeKind::Primitive(primitive)));
            }
        }
        for (name, kind) in BUILTIN_CONTAINERS {
            catalog.add(TypeDef::new(name, kind));
        }

        catalog
    }

    /// Builds a catalog from a parsed description, validating it first.
    ///
    /// # Errors
    /// Returns `SchemaError` if the description is invalid or references
    /// unknown types.
    pub fn from_description(description: &Description) -> Result<Self, SchemaError> {
        validate_description(description)?;

        let mut catalog = Self::new();

        // Declare every type before resolving references so that forward and
        // cyclic references resolve.
        for decl in &description.decls {
            let qualified = description.qualify(decl.name());
            let def = match decl {
                TypeDecl::Message(_) => TypeDef::message(qualified),
                TypeDecl::Enum(e) => TypeDef::enumeration(qualified, e.constants.iter().cloned()),
                TypeDecl::Container(c) => {
                    let kind = match c.kind {
                        ContainerKind::List => TypeKind::List,
                        ContainerKind::Map => TypeKind::Map,
                        ContainerKind::Collection => TypeKind::Collection,
                    };
                    TypeDef::new(qualified, kind)
                }
            };
            catalog.add(def);
        }

        for message in description.messages() {
            let qualified = description.qualify(&message.name);
            let owner = catalog
                .find(&qualified)
                .ok_or_else(|| SchemaError::not_found(&qualified))?;

            for field in &message.fields {
                let type_id = catalog.resolve(description, &field.type_name)?;
                let args = field
                    .args
                    .iter()
                    .map(|arg| catalog.resolve(description, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                let modifiers = Modifiers {
                    is_abstract: field.is_abstract,
                    is_transient: field.is_transient,
                };
                let def = FieldDef::new(&field.name, type_id)
                    .with_args(args)
                    .with_modifiers(modifiers);
                catalog.add_field(owner, def)?;
            }

            for operation in &message.operations {
                let mut def = OperationDef::new(&operation.name);
                for param in &operation.params {
                    let type_id = catalog.resolve(description, &param.type_name)?;
                    def = def.param(&param.name, type_id);
                }
                catalog.add_operation(owner, def)?;
            }
        }

        Ok(catalog)
    }

    /// Resolves a type reference from a description, interning arrays.
    fn resolve(&mut self, description: &Description, name: &str) -> Result<TypeId, SchemaError> {
        if let Some(component) = name.strip_suffix("[]") {
            let component = self.resolve(description, component)?;
            return Ok(self.array_of(component));
        }

        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(&description.qualify(name)))
            .copied()
            .ok_or_else(|| SchemaError::not_found(name))
    }

    /// Adds a type definition and returns its identity.
    pub fn add(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        if !matches!(def.kind, TypeKind::Array(_)) {
            self.by_name.insert(def.qualified_name.clone(), id);
        }
        self.types.push(def);
        id
    }

    /// Adds an empty message type.
    pub fn add_message(&mut self, qualified_name: impl Into<String>) -> TypeId {
        self.add(TypeDef::message(qualified_name))
    }

    /// Adds an enum type with ordered constants.
    pub fn add_enum<I, S>(&mut self, qualified_name: impl Into<String>, constants: I) -> TypeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add(TypeDef::enumeration(qualified_name, constants))
    }

    /// Appends a field to a type.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if `owner` is not in the catalog.
    pub fn add_field(&mut self, owner: TypeId, field: FieldDef) -> Result<(), SchemaError> {
        let def = self
            .types
            .get_mut(owner.index())
            .ok_or_else(|| SchemaError::not_found(owner.to_string()))?;
        def.fields.push(field);
        Ok(())
    }

    /// Appends an operation to a type.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if `owner` is not in the catalog.
    pub fn add_operation(
        &mut self,
        owner: TypeId,
        operation: OperationDef,
    ) -> Result<(), SchemaError> {
        let def = self
            .types
            .get_mut(owner.index())
            .ok_or_else(|| SchemaError::not_found(owner.to_string()))?;
        def.operations.push(operation);
        Ok(())
    }

    /// Returns the array type of `component`, creating it on first use.
    pub fn array_of(&mut self, component: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&component) {
            return id;
        }

        let (name, qualified) = match self.types.get(component.index()) {
            Some(def) => (format!("{}[]", def.name), format!("{}[]", def.qualified_name)),
            None => (format!("{component}[]"), format!("{component}[]")),
        };
        let id = self.add(TypeDef::new(qualified, TypeKind::Array(component)).named(name));
        self.arrays.insert(component, id);
        id
    }

    /// Returns the identity of an unboxed primitive.
    #[must_use]
    pub const fn primitive(&self, primitive: PrimitiveType) -> TypeId {
        TypeId(primitive as u32)
    }

    /// Returns the identity of a boxed primitive, if it has a boxed form.
    #[must_use]
    pub const fn boxed(&self, primitive: PrimitiveType) -> Option<TypeId> {
        match primitive {
            PrimitiveType::String => None,
            other => Some(TypeId(BOXED_BASE + other as u32)),
        }
    }

    /// Returns the identity of the built-in `List` container.
    #[must_use]
    pub const fn list(&self) -> TypeId {
        TypeId(CONTAINER_BASE)
    }

    /// Returns the identity of the built-in `Map` container.
    #[must_use]
    pub const fn map(&self) -> TypeId {
        TypeId(CONTAINER_BASE + 1)
    }

    /// Returns the identity of the built-in `Set` container.
    #[must_use]
    pub const fn set(&self) -> TypeId {
        TypeId(CONTAINER_BASE + 2)
    }

    /// Returns the identity of the built-in `Collection` container.
    #[must_use]
    pub const fn collection(&self) -> TypeId {
        TypeId(CONTAINER_BASE + 3)
    }

    /// Returns the identity of the built-in `Queue` container.
    #[must_use]
    pub const fn queue(&self) -> TypeId {
        TypeId(CONTAINER_BASE + 4)
    }

    /// Gets a type definition.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    /// Gets a mutable type definition.
    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeDef> {
        self.types.get_mut(id.index())
    }

    /// Returns the catalog identity bound to a Rust type, if any.
    #[must_use]
    pub fn native(&self, native: std::any::TypeId) -> Option<TypeId> {
        self.native.get(&native).copied()
    }

    /// Binds a Rust type to a catalog identity.
    pub fn bind_native(&mut self, native: std::any::TypeId, id: TypeId) {
        self.native.insert(native, id);
    }

    /// Iterates over all types with their identities.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, def)| (TypeId(idx as u32), def))
    }

    /// Returns the number of types, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the catalog holds no types at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeInfo for TypeCatalog {
    fn type_def(&self, id: TypeId) -> Option<&TypeDef> {
        self.get(id)
    }

    fn type_ids(&self) -> Vec<TypeId> {
        (0..self.types.len() as u32).map(TypeId).collect()
    }

    fn find(&self, name: &str) -> Option<TypeId> {
        if let Some(component) = name.strip_suffix("[]") {
            let component = self.find(component)?;
            return self.arrays.get(&component).copied();
        }
        if let Some(&id) = self.by_name.get(name) {
            return Some(id);
        }
        let wanted = simple_name(name);
        self.iter()
            .find(|(_, def)| def.name == wanted && !matches!(def.kind, TypeKind::Array(_)))
            .map(|(id, _)| id)
    }
}
