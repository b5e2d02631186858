//! # TypeProto
//!
//! Proto3 schema generation from type information.
//!
//! TypeProto walks the type graph rooted at one type and writes a proto
//! document describing it and every type it transitively references:
//! scalars, enums, nested messages, repeated fields and synthetic map
//! entries.
//!
//! ## Features
//!
//! - **Derive-based input** - `#[derive(Reflect)]` on structs and fieldless enums
//! - **Description-based input** - XML type descriptions for types outside Rust
//! - **Pluggable type information** - anything implementing [`TypeInfo`]
//! - **Configurable output** - proto2/proto3, scalar keywords, indentation
//!
//! ## Quick Start
//!
//! ```ignore
//! use typeproto::prelude::*;
//!
//! #[derive(Reflect)]
//! #[proto(crate = "typeproto::schema", package = "com.example")]
//! struct Person {
//!     name: String,
//!     friends: Vec<Person>,
//! }
//!
//! let proto = typeproto::generate_for::<Person>()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type model, catalog, descriptions and reflection
//! - [`codegen`] - Traversal engine and document generation

pub mod prelude;

/// Type model, catalog, descriptions and reflection.
pub mod schema {
    pub use typeproto_schema::*;
}

/// Proto document generation.
pub mod codegen {
    pub use typeproto_codegen::*;
}

// Re-export commonly used items at the crate root
pub use typeproto_codegen::{
    CodegenError, Generator, GeneratorConfig, generate_for, generate_for_with,
    generate_from_file, generate_from_xml, generate_from_xml_with,
};
pub use typeproto_derive::Reflect;
pub use typeproto_schema::{Reflect, TypeCatalog, TypeInfo};
