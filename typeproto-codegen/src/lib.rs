//! # TypeProto Codegen
//!
//! Proto schema generation from type information.
//!
//! This crate provides:
//! - Field classification and worklist traversal over a [`TypeInfo`] graph
//! - Proto3 (or proto2) document assembly with a configurable header
//! - Scalar keyword mapping for primitive types
//! - Convenience entry points for XML descriptions and `Reflect` types
//!
//! [`TypeInfo`]: typeproto_schema::TypeInfo

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod operations;
pub mod path;
pub mod primitives;
pub mod registry;
pub mod writer;

pub use config::{GeneratorConfig, GeneratorConfigBuilder, Indent, ReferenceStyle, Syntax};
pub use error::CodegenError;
pub use generator::Generator;
pub use primitives::PrimitiveMap;
pub use registry::TypeRegistry;

use typeproto_schema::{Reflect, TypeCatalog};

/// Generates a proto document from an XML type description.
///
/// # Arguments
/// * `xml` - Type-description document content
/// * `root` - Simple or qualified name of the root type
///
/// # Returns
/// Generated proto document.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml(xml: &str, root: &str) -> Result<String, CodegenError> {
    generate_from_xml_with(xml, root, GeneratorConfig::default())
}

/// Generates a proto document from an XML type description with a custom
/// configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml_with(
    xml: &str,
    root: &str,
    config: GeneratorConfig,
) -> Result<String, CodegenError> {
    let description = typeproto_schema::parse_description(xml)?;
    let catalog = TypeCatalog::from_description(&description)?;
    let mut generator = Generator::for_name(&catalog, root, config)?;
    Ok(generator.generate()?.to_string())
}

/// Generates a proto document from an XML type-description file.
///
/// # Arguments
/// * `path` - Path to the type-description file
/// * `root` - Simple or qualified name of the root type
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path, root: &str) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, root)
}

/// Generates a proto document for a Rust type implementing [`Reflect`].
///
/// # Errors
/// Returns `CodegenError` if the type graph cannot be expressed.
pub fn generate_for<T: Reflect>() -> Result<String, CodegenError> {
    generate_for_with::<T>(GeneratorConfig::default())
}

/// Generates a proto document for a [`Reflect`] type with a custom
/// configuration.
///
/// # Errors
/// Returns `CodegenError` if the type graph cannot be expressed.
pub fn generate_for_with<T: Reflect>(config: GeneratorConfig) -> Result<String, CodegenError> {
    let (catalog, root) = TypeCatalog::reflect::<T>();
    let mut generator = Generator::new(&catalog, root, config)?;
    Ok(generator.generate()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DESCRIPTION: &str = r#"<types package="com.example">
        <enum name="Status">
            <constant name="ACTIVE"/>
            <constant name="CLOSED"/>
        </enum>
        <message name="Account">
            <field name="id" type="long"/>
            <field name="status" type="Status"/>
            <field name="owners" type="List" args="Owner"/>
            <field name="limits" type="Map" args="string, Limit"/>
            <field name="history" type="double[]"/>
            <field name="session" type="string" transient="true"/>
            <operation name="close"><param name="reason" type="string"/></operation>
        </message>
        <message name="Owner">
            <field name="name" type="string"/>
        </message>
        <message name="Limit">
            <field name="amount" type="Double"/>
        </message>
    </types>"#;

    #[test]
    fn test_generate_from_xml() {
        let output = generate_from_xml(DESCRIPTION, "Account").expect("generate");
        let body = output.split_once("package AccountProto;\n\n").expect("package").1;

        assert_eq!(
            body,
            "message Account{\n\
             \tsint64 id = 1;\n\
             \tenum Status{\n\
             \t\tACTIVE = 0;\n\
             \t\tCLOSED = 1;\n\
             \t}\n\
             \tAccount.Status status = 2;\n\
             \trepeated Owner owners = 3;\n\
             \tmessage Map_limits{\n\
             \t\tstring key = 1;\n\
             \t\tLimit value = 2;\n\
             \t}\n\
             \trepeated Map_limits limits = 4;\n\
             \trepeated double history = 5;\n\
             }\n\
             message Limit{\n\
             \tdouble amount = 1;\n\
             }\n\
             message Owner{\n\
             \tstring name = 1;\n\
             }\n\
             \n\
             message close{\n\
             \tstring reason = 1;\n\
             }\n"
        );
        assert!(output.contains("option java_package=\"com.example.AccountProto\";\n"));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(DESCRIPTION.as_bytes())
            .expect("Failed to write description");

        let output = generate_from_file(file.path(), "com.example.Account").expect("generate");
        assert!(output.contains("message Account{\n"));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = generate_from_file(&dir.path().join("missing.xml"), "Account")
            .expect_err("missing file");
        assert!(matches!(err, CodegenError::Io(_)));
    }

    #[test]
    fn test_generate_unknown_root() {
        let err = generate_from_xml(DESCRIPTION, "Nobody").expect_err("unknown root");
        assert!(matches!(err, CodegenError::Configuration { .. }));
    }

    #[test]
    fn test_generate_invalid_description() {
        let xml = r#"<types><message name="A"><field name="m" type="Map" args="string"/></message></types>"#;
        let err = generate_from_xml(xml, "A").expect_err("invalid description");
        assert!(matches!(err, CodegenError::Schema(_)));

        let err = generate_from_xml("<nope/>", "A").expect_err("not a description");
        assert!(matches!(err, CodegenError::Parse(_)));
    }

    #[test]
    fn test_generate_for_reflect() {
        let output = generate_for::<Vec<i32>>();
        assert!(matches!(output, Err(CodegenError::Configuration { .. })));
    }
}
