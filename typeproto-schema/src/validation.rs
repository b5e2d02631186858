//! Type-description validation utilities.
//!
//! This module checks a parsed [`Description`] for problems the generator
//! cannot express: duplicate names, dangling type references, container
//! fields with the wrong number of generic arguments, nested parameterized
//! types and multi-dimensional arrays.

use crate::catalog::BUILTIN_CONTAINERS;
use crate::description::{ContainerKind, Description, FieldDecl, MessageDecl, TypeDecl};
use crate::error::SchemaError;
use crate::types::{PrimitiveType, TypeKind};
use std::collections::{HashMap, HashSet};

/// Validates a parsed description for correctness.
///
/// # Arguments
/// * `description` - The description to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_description(description: &Description) -> Result<(), SchemaError> {
    let kinds = declared_kinds(description)?;

    for decl in &description.decls {
        match decl {
            TypeDecl::Message(message) => validate_message(&kinds, message)?,
            TypeDecl::Enum(enum_decl) => {
                let mut seen = HashSet::new();
                for constant in &enum_decl.constants {
                    if !seen.insert(constant) {
                        return Err(SchemaError::duplicate(
                            "enum constant",
                            format!("{}.{}", enum_decl.name, constant),
                        ));
                    }
                }
            }
            TypeDecl::Container(_) => {}
        }
    }

    Ok(())
}

/// Kind of every name a description may reference, keyed by both the simple
/// and the qualified name.
fn declared_kinds(description: &Description) -> Result<HashMap<String, TypeKind>, SchemaError> {
    let mut kinds = HashMap::new();

    for primitive in PrimitiveType::ALL {
        kinds.insert(primitive.name().to_string(), TypeKind::Primitive(primitive));
        if let Some(boxed) = primitive.boxed_name() {
            kinds.insert(boxed.to_string(), TypeKind::Primitive(primitive));
        }
    }
    for (name, kind) in BUILTIN_CONTAINERS {
        kinds.insert(name.to_string(), kind);
    }

    let mut declared = HashSet::new();
    for decl in &description.decls {
        let shadows_builtin = PrimitiveType::from_name(decl.name()).is_some()
            || BUILTIN_CONTAINERS
                .iter()
                .any(|(name, _)| *name == decl.name());
        if !declared.insert(decl.name()) || shadows_builtin {
            return Err(SchemaError::duplicate("type", decl.name()));
        }
        let kind = match decl {
            TypeDecl::Message(_) => TypeKind::Message,
            TypeDecl::Enum(_) => TypeKind::Enum,
            TypeDecl::Container(c) => match c.kind {
                ContainerKind::List => TypeKind::List,
                ContainerKind::Map => TypeKind::Map,
                ContainerKind::Collection => TypeKind::Collection,
            },
        };
        kinds.insert(decl.name().to_string(), kind);
        kinds.insert(description.qualify(decl.name()), kind);
    }

    Ok(kinds)
}

/// Validates one message declaration.
fn validate_message(
    kinds: &HashMap<String, TypeKind>,
    message: &MessageDecl,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in &message.fields {
        if !seen.insert(&field.name) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", message.name, field.name),
            ));
        }
        validate_field(kinds, &message.name, field)?;
    }

    for operation in &message.operations {
        for param in &operation.params {
            let context = format!("{}.{}", message.name, operation.name);
            lookup_kind(kinds, &param.type_name, &context)?;
        }
    }

    Ok(())
}

/// Validates a field's type reference and generic arguments.
fn validate_field(
    kinds: &HashMap<String, TypeKind>,
    message: &str,
    field: &FieldDecl,
) -> Result<(), SchemaError> {
    let context = format!("{}.{}", message, field.name);
    let expected = match lookup_kind(kinds, &field.type_name, &context)? {
        TypeRefKind::Array => 0,
        TypeRefKind::Plain(kind) => kind.generic_arity(),
    };
    if field.args.len() != expected {
        return Err(SchemaError::GenericArity {
            field: context,
            type_name: field.type_name.clone(),
            expected,
            found: field.args.len(),
        });
    }

    for arg in &field.args {
        let nested = match lookup_kind(kinds, arg, &context)? {
            TypeRefKind::Array => true,
            TypeRefKind::Plain(kind) => kind.is_container(),
        };
        if nested {
            return Err(SchemaError::NestedGeneric {
                field: context,
                type_name: arg.clone(),
            });
        }
    }

    Ok(())
}

/// What a type reference resolves to.
enum TypeRefKind {
    Array,
    Plain(TypeKind),
}

/// Resolves the kind of a type reference, accepting one array dimension.
fn lookup_kind(
    kinds: &HashMap<String, TypeKind>,
    type_name: &str,
    context: &str,
) -> Result<TypeRefKind, SchemaError> {
    if let Some(component) = type_name.strip_suffix("[]") {
        if component.ends_with("[]") {
            return Err(SchemaError::MultiDimensionalArray {
                context: context.to_string(),
                type_name: type_name.to_string(),
            });
        }
        if let TypeRefKind::Plain(kind) = lookup_kind(kinds, component, context)?
            && kind.is_container()
        {
            return Err(SchemaError::Validation {
                message: format!("array of container '{type_name}' in '{context}'"),
            });
        }
        return Ok(TypeRefKind::Array);
    }

    kinds
        .get(type_name)
        .copied()
        .map(TypeRefKind::Plain)
        .ok_or_else(|| SchemaError::not_found(type_name))
}
