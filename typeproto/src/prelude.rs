//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use typeproto::prelude::*;
//! ```

// Type model
pub use typeproto_schema::{
    FieldDef, Modifiers, OperationDef, PrimitiveType, Reflect, TypeCatalog, TypeDef, TypeId,
    TypeInfo, TypeKind, TypeRef,
};

// Derive macro
pub use typeproto_derive::Reflect;

// Generation
pub use typeproto_codegen::{
    CodegenError, Generator, GeneratorConfig, Indent, PrimitiveMap, ReferenceStyle, Syntax,
};
