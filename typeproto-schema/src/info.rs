//! The type-introspection capability consumed by the generator.

use crate::types::{FieldDef, OperationDef, TypeDef, TypeId, TypeKind};

/// Read access to a finite graph of type descriptions.
///
/// Anything able to describe types implements this trait: the in-memory
/// [`crate::TypeCatalog`] (filled from a description document or through
/// [`crate::Reflect`]) or an adapter over another metadata source.
pub trait TypeInfo {
    /// Returns the description of a type.
    fn type_def(&self, id: TypeId) -> Option<&TypeDef>;

    /// Returns every known type identity.
    fn type_ids(&self) -> Vec<TypeId>;

    /// Looks a type up by qualified name, falling back to its simple name.
    fn find(&self, name: &str) -> Option<TypeId>;

    /// Returns the kind of a type.
    fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.type_def(id).map(|def| def.kind)
    }

    /// Returns the simple name of a type.
    fn simple_name(&self, id: TypeId) -> Option<&str> {
        self.type_def(id).map(|def| def.name.as_str())
    }

    /// Returns the fully qualified name of a type.
    fn qualified_name(&self, id: TypeId) -> Option<&str> {
        self.type_def(id).map(|def| def.qualified_name.as_str())
    }

    /// Returns the declared fields of a type, empty when unknown.
    fn fields(&self, id: TypeId) -> &[FieldDef] {
        self.type_def(id).map_or(&[], |def| def.fields.as_slice())
    }

    /// Returns the declared operations of a type, empty when unknown.
    fn operations(&self, id: TypeId) -> &[OperationDef] {
        self.type_def(id)
            .map_or(&[], |def| def.operations.as_slice())
    }
}
