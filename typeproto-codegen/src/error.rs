//! Error types for proto generation.

use thiserror::Error;
use typeproto_schema::PrimitiveType;

/// Error type for proto generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The generator was set up without a usable root type.
    #[error("configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// Container field without the generic arguments its kind requires.
    #[error(
        "field '{field}' of container type '{type_name}' needs {expected} generic argument(s), found {found}"
    )]
    MalformedGeneric {
        /// Field name.
        field: String,
        /// Container type name.
        type_name: String,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        found: usize,
    },

    /// Generic argument or array component that is itself a container.
    #[error("field '{field}' nests container type '{type_name}'")]
    NestedContainer {
        /// Field name.
        field: String,
        /// Offending type name.
        type_name: String,
    },

    /// Array whose component is another array.
    #[error("field '{field}' has multi-dimensional array type '{type_name}'")]
    MultiDimensionalArray {
        /// Field name.
        field: String,
        /// Array type name.
        type_name: String,
    },

    /// Primitive type without a scalar keyword in the primitive map.
    #[error("no scalar keyword mapped for primitive '{}'", primitive.name())]
    UnmappedPrimitive {
        /// The unmapped primitive.
        primitive: PrimitiveType,
    },

    /// Type identity the type information does not describe.
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// Type name or identity.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Type-description parsing error.
    #[error("description parse error: {0}")]
    Parse(#[from] typeproto_schema::ParseError),

    /// Type-description validation error.
    #[error("schema error: {0}")]
    Schema(#[from] typeproto_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a configuration error with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodegenError::MalformedGeneric {
            field: "scores".to_string(),
            type_name: "Map".to_string(),
            expected: 2,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "field 'scores' of container type 'Map' needs 2 generic argument(s), found 0"
        );

        let err = CodegenError::UnmappedPrimitive {
            primitive: PrimitiveType::Long,
        };
        assert_eq!(err.to_string(), "no scalar keyword mapped for primitive 'long'");
    }

    #[test]
    fn test_error_from_schema() {
        let err: CodegenError = typeproto_schema::SchemaError::not_found("Person").into();
        assert!(matches!(err, CodegenError::Schema(_)));
        assert_eq!(err.to_string(), "schema error: type 'Person' not found");
    }
}
