//! Error types for type-description parsing and validation.

use thiserror::Error;

/// Error raised while reading an XML type description.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML itself is not well formed.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element lacks an attribute it needs.
    #[error("<{element}> requires a '{attribute}' attribute")]
    MissingAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An attribute has a value the description format does not accept.
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        /// Element carrying the attribute.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Rejected value.
        value: String,
    },

    /// An element that cannot appear where it was found.
    #[error("unexpected <{element}> inside <{context}>")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Enclosing element.
        context: String,
    },

    /// The document is cut short or has no `<types>` root.
    #[error("malformed type description: {message}")]
    MalformedDescription {
        /// What is wrong.
        message: String,
    },

    /// Attribute or element text is not UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for type-description validation and catalog construction.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{name}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, field, constant).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Wrong number of generic arguments for a container field.
    #[error(
        "field '{field}' of type '{type_name}' expects {expected} generic argument(s), found {found}"
    )]
    GenericArity {
        /// Field name.
        field: String,
        /// Declared container type.
        type_name: String,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        found: usize,
    },

    /// Generic argument that is itself a container or array.
    #[error("field '{field}' uses nested parameterized type '{type_name}'")]
    NestedGeneric {
        /// Field name.
        field: String,
        /// Offending argument type.
        type_name: String,
    },

    /// Array with more than one dimension.
    #[error("'{type_name}' in '{context}' has more than one array dimension")]
    MultiDimensionalArray {
        /// Where the array was referenced.
        context: String,
        /// Array type name.
        type_name: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }
}

impl SchemaError {
    /// Creates a type-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::missing_attr("field", "type");
        assert_eq!(
            err.to_string(),
            "<field> requires a 'type' attribute"
        );
    }

    #[test]
    fn test_malformed_description_display() {
        let err = ParseError::MalformedDescription {
            message: "unterminated enum 'Color'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed type description: unterminated enum 'Color'"
        );
        let err = ParseError::invalid_attr("field", "transient", "maybe");
        assert_eq!(err.to_string(), "<field> has invalid transient=\"maybe\"");
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::GenericArity {
            field: "scores".to_string(),
            type_name: "Map".to_string(),
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "field 'scores' of type 'Map' expects 2 generic argument(s), found 1"
        );
    }

    #[test]
    fn test_schema_error_from_parse() {
        let err: SchemaError = ParseError::unknown_element("foo", "types").into();
        assert!(matches!(err, SchemaError::Parse(_)));
    }
}
