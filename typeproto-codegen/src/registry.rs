//! Type registry: reserved emission names per type identity.

use crate::error::CodegenError;
use crate::primitives::PrimitiveMap;
use std::collections::{HashMap, HashSet};
use typeproto_schema::{TypeId, TypeInfo, TypeKind};

/// Names assigned to types during one generation session.
///
/// A type is present once it has a canonical name, which happens before its
/// block is emitted. Primitives are seeded with their scalar keywords and are
/// never emitted as blocks.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    names: HashMap<TypeId, String>,
    emitted: HashSet<TypeId>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the scalar keyword of every primitive type
    /// the type information describes.
    ///
    /// # Errors
    /// Returns `CodegenError::UnmappedPrimitive` if the map lacks a keyword
    /// for one of them.
    pub fn seeded<I>(info: &I, primitives: &PrimitiveMap) -> Result<Self, CodegenError>
    where
        I: TypeInfo + ?Sized,
    {
        let mut registry = Self::new();
        for id in info.type_ids() {
            if let Some(TypeKind::Primitive(primitive)) = info.kind(id) {
                let keyword = primitives
                    .get(primitive)
                    .ok_or(CodegenError::UnmappedPrimitive { primitive })?;
                registry.reserve(id, keyword);
            }
        }
        Ok(registry)
    }

    /// Returns the reserved name of a type.
    #[must_use]
    pub fn lookup(&self, id: TypeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Returns true if the type has a reserved name.
    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.names.contains_key(&id)
    }

    /// Reserves (or overwrites) the name of a type.
    pub fn reserve(&mut self, id: TypeId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// Replaces a reservation with a more specific path, returning the old one.
    pub fn correct(&mut self, id: TypeId, path: impl Into<String>) -> Option<String> {
        let previous = self.names.remove(&id);
        self.reserve(id, path);
        previous
    }

    /// Records that the block of a type has been written.
    pub fn mark_emitted(&mut self, id: TypeId) {
        self.emitted.insert(id);
    }

    /// Returns true if the block of a type has been written.
    #[must_use]
    pub fn is_emitted(&self, id: TypeId) -> bool {
        self.emitted.contains(&id)
    }

    /// Number of reserved names, primitives included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no name is reserved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeproto_schema::{PrimitiveType, TypeCatalog};

    #[test]
    fn test_seeded_with_primitives() {
        let catalog = TypeCatalog::new();
        let registry =
            TypeRegistry::seeded(&catalog, &PrimitiveMap::proto3()).expect("Failed to seed");

        assert_eq!(
            registry.lookup(catalog.primitive(PrimitiveType::Int)),
            Some("sint32")
        );
        assert_eq!(
            registry.lookup(catalog.boxed(PrimitiveType::Int).expect("Integer")),
            Some("sint32")
        );
        assert_eq!(
            registry.lookup(catalog.primitive(PrimitiveType::String)),
            Some("string")
        );
        assert!(!registry.contains(catalog.list()));
        assert_eq!(registry.len(), 13);
    }

    #[test]
    fn test_seeded_unmapped_primitive() {
        let catalog = TypeCatalog::new();
        let primitives = PrimitiveMap::empty().with(PrimitiveType::Int, "sint32");
        let err = TypeRegistry::seeded(&catalog, &primitives).expect_err("unmapped");
        assert!(matches!(err, CodegenError::UnmappedPrimitive { .. }));
    }

    #[test]
    fn test_reserve_and_correct() {
        let mut catalog = TypeCatalog::new();
        let address = catalog.add_message("com.example.Address");
        let mut registry = TypeRegistry::new();

        assert_eq!(registry.lookup(address), None);
        registry.reserve(address, "Address");
        assert_eq!(registry.lookup(address), Some("Address"));

        let previous = registry.correct(address, "Person.Map_homes.Address");
        assert_eq!(previous.as_deref(), Some("Address"));
        assert_eq!(registry.lookup(address), Some("Person.Map_homes.Address"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_emitted_tracking() {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("Person");
        let mut registry = TypeRegistry::new();

        registry.reserve(person, "Person");
        assert!(!registry.is_emitted(person));
        registry.mark_emitted(person);
        assert!(registry.is_emitted(person));
    }
}
