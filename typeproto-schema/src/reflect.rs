//! Registration of Rust types into a [`TypeCatalog`].
//!
//! [`Reflect`] is implemented for the standard scalars and collections here,
//! and for user structs and enums through `#[derive(Reflect)]`.

use crate::catalog::TypeCatalog;
use crate::types::{FieldDef, Modifiers, PrimitiveType, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// A resolved type reference: the type plus its generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Referenced type.
    pub id: TypeId,
    /// Generic arguments, empty unless `id` is a container.
    pub args: Vec<TypeId>,
}

impl TypeRef {
    /// Creates a reference without generic arguments.
    #[must_use]
    pub fn plain(id: TypeId) -> Self {
        Self {
            id,
            args: Vec::new(),
        }
    }

    /// Creates a reference to a parameterized container.
    #[must_use]
    pub fn generic(id: TypeId, args: Vec<TypeId>) -> Self {
        Self { id, args }
    }

    /// Turns the reference into a named field.
    #[must_use]
    pub fn into_field(self, name: impl Into<String>, modifiers: Modifiers) -> FieldDef {
        FieldDef::new(name, self.id)
            .with_args(self.args)
            .with_modifiers(modifiers)
    }
}

/// A Rust type that can describe itself to a [`TypeCatalog`].
///
/// Implementations register the type on first use and return the same
/// identity afterwards, which lets self-referencing types terminate.
pub trait Reflect: 'static {
    /// Registers `Self` (and everything it references) and returns its reference.
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef;
}

impl TypeCatalog {
    /// Builds a catalog rooted at `T` and returns it with the root identity.
    #[must_use]
    pub fn reflect<T: Reflect>() -> (Self, TypeId) {
        let mut catalog = Self::new();
        let root = T::type_ref(&mut catalog).id;
        (catalog, root)
    }

    /// Registers `T` into this catalog and returns its identity.
    pub fn register<T: Reflect>(&mut self) -> TypeId {
        T::type_ref(self).id
    }
}

macro_rules! reflect_primitive {
    ($($ty:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
                    TypeRef::plain(catalog.primitive(PrimitiveType::$primitive))
                }
            }
        )*
    };
}

reflect_primitive! {
    bool => Boolean,
    i8 => Byte,
    u8 => Byte,
    i16 => Int,
    u16 => Int,
    i32 => Int,
    u32 => Long,
    i64 => Long,
    u64 => Long,
    isize => Long,
    usize => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    char => String,
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        T::type_ref(catalog)
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        T::type_ref(catalog)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let element = T::type_ref(catalog).id;
        TypeRef::generic(catalog.list(), vec![element])
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let element = T::type_ref(catalog).id;
        TypeRef::generic(catalog.queue(), vec![element])
    }
}

impl<T: Reflect> Reflect for HashSet<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let element = T::type_ref(catalog).id;
        TypeRef::generic(catalog.set(), vec![element])
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let element = T::type_ref(catalog).id;
        TypeRef::generic(catalog.set(), vec![element])
    }
}

impl<K: Reflect, V: Reflect> Reflect for HashMap<K, V> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let key = K::type_ref(catalog).id;
        let value = V::type_ref(catalog).id;
        TypeRef::generic(catalog.map(), vec![key, value])
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let key = K::type_ref(catalog).id;
        let value = V::type_ref(catalog).id;
        TypeRef::generic(catalog.map(), vec![key, value])
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let component = T::type_ref(catalog).id;
        TypeRef::plain(catalog.array_of(component))
    }
}

impl<T: Reflect> Reflect for Box<[T]> {
    fn type_ref(catalog: &mut TypeCatalog) -> TypeRef {
        let component = T::type_ref(catalog).id;
        TypeRef::plain(catalog.array_of(component))
    }
}
