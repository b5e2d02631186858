//! # TypeProto Schema
//!
//! Type model and type-introspection capability for TypeProto.
//!
//! This crate provides:
//! - The [`TypeInfo`] capability the generator walks
//! - An in-memory [`TypeCatalog`] implementing it
//! - XML type-description parsing and validation
//! - [`Reflect`] registration of Rust types, usually via `#[derive(Reflect)]`

pub mod catalog;
pub mod description;
pub mod error;
pub mod info;
pub mod parser;
pub mod reflect;
pub mod types;
pub mod validation;

pub use catalog::TypeCatalog;
pub use description::{
    ContainerDecl, ContainerKind, Description, EnumDecl, FieldDecl, MessageDecl, OperationDecl,
    ParamDecl, TypeDecl,
};
pub use error::{ParseError, SchemaError};
pub use info::TypeInfo;
pub use parser::parse_description;
pub use reflect::{Reflect, TypeRef};
pub use types::{
    FieldDef, Modifiers, OperationDef, ParamDef, PrimitiveType, TypeDef, TypeId, TypeKind,
    simple_name,
};
pub use validation::validate_description;
