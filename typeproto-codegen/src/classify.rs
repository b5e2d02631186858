//! Field classification.
//!
//! Decides, for one declared field, which emission strategy applies. The
//! checks run in a fixed priority order and the first match wins:
//! skipped, already named, enum, map, array, list, other collection, nested
//! message.

use crate::error::CodegenError;
use crate::registry::TypeRegistry;
use typeproto_schema::{FieldDef, TypeId, TypeInfo, TypeKind};

/// Emission strategy for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldClass {
    /// Abstract or transient field; emits nothing but consumes its index.
    Skip,
    /// Type with a reserved name, emitted as `<name> <field> = <i>;`.
    Known(String),
    /// Enum not yet emitted; its definition is written inline first.
    Enum(TypeId),
    /// Key/value container with its two arguments.
    Map {
        /// Key type.
        key: TypeId,
        /// Value type.
        value: TypeId,
    },
    /// Single-dimension array of the component type.
    Array(TypeId),
    /// The single-argument sequence type.
    List(TypeId),
    /// Any other single-argument container.
    Collection {
        /// The container type itself.
        container: TypeId,
        /// Element type.
        element: TypeId,
    },
    /// User-defined composite not yet named.
    Nested(TypeId),
}

/// Classifies a field.
///
/// # Arguments
/// * `info` - Type information the field belongs to
/// * `registry` - Names reserved so far in this session
/// * `field` - The field to classify
///
/// # Errors
/// Returns `CodegenError` if the field references an unknown type, lacks the
/// generic arguments its container needs, nests containers, or declares a
/// multi-dimensional array.
pub fn classify<I>(
    info: &I,
    registry: &TypeRegistry,
    field: &FieldDef,
) -> Result<FieldClass, CodegenError>
where
    I: TypeInfo + ?Sized,
{
    if field.modifiers.is_skipped() {
        return Ok(FieldClass::Skip);
    }

    if let Some(name) = registry.lookup(field.type_id) {
        return Ok(FieldClass::Known(name.to_string()));
    }

    let kind = kind_of(info, field.type_id, &field.name)?;
    let class = match kind {
        TypeKind::Enum => FieldClass::Enum(field.type_id),
        TypeKind::Map => {
            let [key, value] = generic_args::<_, 2>(info, field)?;
            FieldClass::Map { key, value }
        }
        TypeKind::Array(component) => {
            match kind_of(info, component, &field.name)? {
                TypeKind::Array(_) => {
                    return Err(CodegenError::MultiDimensionalArray {
                        field: field.name.clone(),
                        type_name: type_name(info, field.type_id),
                    });
                }
                nested if nested.is_container() => {
                    return Err(CodegenError::NestedContainer {
                        field: field.name.clone(),
                        type_name: type_name(info, component),
                    });
                }
                _ => {}
            }
            FieldClass::Array(component)
        }
        TypeKind::List => {
            let [element] = generic_args::<_, 1>(info, field)?;
            FieldClass::List(element)
        }
        TypeKind::Collection => {
            let [element] = generic_args::<_, 1>(info, field)?;
            FieldClass::Collection {
                container: field.type_id,
                element,
            }
        }
        TypeKind::Message => FieldClass::Nested(field.type_id),
        // Primitives are always seeded into the registry.
        TypeKind::Primitive(primitive) => {
            return Err(CodegenError::UnmappedPrimitive { primitive });
        }
    };

    Ok(class)
}

/// Returns the kind of a type, failing for identities the info does not know.
fn kind_of<I>(info: &I, id: TypeId, field: &str) -> Result<TypeKind, CodegenError>
where
    I: TypeInfo + ?Sized,
{
    info.kind(id)
        .ok_or_else(|| CodegenError::unknown_type(id.to_string(), field))
}

/// Extracts exactly `N` plain (non-container, non-array) generic arguments.
fn generic_args<I, const N: usize>(
    info: &I,
    field: &FieldDef,
) -> Result<[TypeId; N], CodegenError>
where
    I: TypeInfo + ?Sized,
{
    let args: [TypeId; N] =
        field
            .generic_args
            .as_slice()
            .try_into()
            .map_err(|_| CodegenError::MalformedGeneric {
                field: field.name.clone(),
                type_name: type_name(info, field.type_id),
                expected: N,
                found: field.generic_args.len(),
            })?;

    for arg in args {
        let kind = kind_of(info, arg, &field.name)?;
        if kind.is_container() || matches!(kind, TypeKind::Array(_)) {
            return Err(CodegenError::NestedContainer {
                field: field.name.clone(),
                type_name: type_name(info, arg),
            });
        }
    }

    Ok(args)
}

fn type_name<I>(info: &I, id: TypeId) -> String
where
    I: TypeInfo + ?Sized,
{
    info.simple_name(id)
        .map_or_else(|| id.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PrimitiveMap;
    use typeproto_schema::{Modifiers, PrimitiveType, TypeCatalog};

    fn setup() -> (TypeCatalog, TypeId, TypeId) {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("com.example.Person");
        let color = catalog.add_enum("com.example.Color", ["RED"]);
        (catalog, person, color)
    }

    fn classify_in(catalog: &TypeCatalog, field: FieldDef) -> Result<FieldClass, CodegenError> {
        let registry =
            TypeRegistry::seeded(catalog, &PrimitiveMap::proto3()).expect("Failed to seed");
        classify(catalog, &registry, &field)
    }

    #[test]
    fn test_skip_has_priority() {
        let (catalog, _, _) = setup();
        let int = catalog.primitive(PrimitiveType::Int);
        let field = FieldDef::new("cache", int).with_modifiers(Modifiers::transient());
        assert_eq!(classify_in(&catalog, field).expect("classify"), FieldClass::Skip);

        let field = FieldDef::new("shape", int).with_modifiers(Modifiers::abstract_field());
        assert_eq!(classify_in(&catalog, field).expect("classify"), FieldClass::Skip);
    }

    #[test]
    fn test_known_scalar() {
        let (catalog, _, _) = setup();
        let long = catalog.boxed(PrimitiveType::Long).expect("Long");
        let class = classify_in(&catalog, FieldDef::new("id", long)).expect("classify");
        assert_eq!(class, FieldClass::Known("sint64".to_string()));
    }

    #[test]
    fn test_registered_type_is_known() {
        let (catalog, person, _) = setup();
        let mut registry =
            TypeRegistry::seeded(&catalog, &PrimitiveMap::proto3()).expect("Failed to seed");
        registry.reserve(person, "Person");

        let class =
            classify(&catalog, &registry, &FieldDef::new("parent", person)).expect("classify");
        assert_eq!(class, FieldClass::Known("Person".to_string()));
    }

    #[test]
    fn test_enum_and_nested() {
        let (catalog, person, color) = setup();
        assert_eq!(
            classify_in(&catalog, FieldDef::new("color", color)).expect("classify"),
            FieldClass::Enum(color)
        );
        assert_eq!(
            classify_in(&catalog, FieldDef::new("parent", person)).expect("classify"),
            FieldClass::Nested(person)
        );
    }

    #[test]
    fn test_containers() {
        let (catalog, person, _) = setup();
        let string = catalog.primitive(PrimitiveType::String);

        let field = FieldDef::new("scores", catalog.map()).with_args([string, person]);
        assert_eq!(
            classify_in(&catalog, field).expect("classify"),
            FieldClass::Map {
                key: string,
                value: person
            }
        );

        let field = FieldDef::new("tags", catalog.list()).with_args([string]);
        assert_eq!(
            classify_in(&catalog, field).expect("classify"),
            FieldClass::List(string)
        );

        let field = FieldDef::new("friends", catalog.set()).with_args([person]);
        assert_eq!(
            classify_in(&catalog, field).expect("classify"),
            FieldClass::Collection {
                container: catalog.set(),
                element: person
            }
        );
    }

    #[test]
    fn test_array() {
        let (mut catalog, person, _) = setup();
        let people = catalog.array_of(person);
        assert_eq!(
            classify_in(&catalog, FieldDef::new("people", people)).expect("classify"),
            FieldClass::Array(person)
        );
    }

    #[test]
    fn test_missing_generic_arguments() {
        let (catalog, _, _) = setup();
        let err = classify_in(&catalog, FieldDef::new("raw", catalog.list())).expect_err("raw list");
        assert!(matches!(
            err,
            CodegenError::MalformedGeneric {
                expected: 1,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_container_rejected() {
        let (catalog, _, _) = setup();
        let string = catalog.primitive(PrimitiveType::String);
        let field = FieldDef::new("matrix", catalog.map()).with_args([string, catalog.list()]);
        let err = classify_in(&catalog, field).expect_err("nested");
        assert!(matches!(err, CodegenError::NestedContainer { .. }));
    }

    #[test]
    fn test_multi_dimensional_array_rejected() {
        let (mut catalog, _, _) = setup();
        let int = catalog.primitive(PrimitiveType::Int);
        let row = catalog.array_of(int);
        let grid = catalog.array_of(row);
        let err = classify_in(&catalog, FieldDef::new("grid", grid)).expect_err("2d");
        assert!(matches!(err, CodegenError::MultiDimensionalArray { .. }));
    }

    #[test]
    fn test_unknown_type() {
        let (catalog, person, _) = setup();
        let mut other = TypeCatalog::new();
        for _ in 0..5 {
            other.add_message("Filler");
        }
        let dangling = other.add_message("Dangling");
        assert!(catalog.type_def(dangling).is_none());
        assert_ne!(dangling, person);

        let err = classify_in(&catalog, FieldDef::new("x", dangling)).expect_err("unknown");
        assert!(matches!(err, CodegenError::UnknownType { .. }));
    }
}
