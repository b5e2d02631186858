//! Scalar keyword mapping for primitive types.

use std::collections::HashMap;
use typeproto_schema::PrimitiveType;

/// Mapping from primitive types to schema scalar keywords.
///
/// Boxed and unboxed forms of a primitive share one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveMap {
    keywords: HashMap<PrimitiveType, String>,
}

impl PrimitiveMap {
    /// Scalar keywords used by proto3 documents.
    #[must_use]
    pub fn proto3() -> Self {
        Self::from_pairs([
            (PrimitiveType::Boolean, "bool"),
            (PrimitiveType::Byte, "bytes"),
            (PrimitiveType::Int, "sint32"),
            (PrimitiveType::Long, "sint64"),
            (PrimitiveType::Float, "float"),
            (PrimitiveType::Double, "double"),
            (PrimitiveType::String, "string"),
        ])
    }

    /// Scalar keywords following the plain proto2 integer conventions.
    #[must_use]
    pub fn proto2() -> Self {
        Self::proto3()
            .with(PrimitiveType::Int, "int32")
            .with(PrimitiveType::Long, "int64")
    }

    /// Creates a map without any keywords.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keywords: HashMap::new(),
        }
    }

    fn from_pairs<const N: usize>(pairs: [(PrimitiveType, &str); N]) -> Self {
        Self {
            keywords: pairs
                .into_iter()
                .map(|(primitive, keyword)| (primitive, keyword.to_string()))
                .collect(),
        }
    }

    /// Overrides the keyword for one primitive.
    #[must_use]
    pub fn with(mut self, primitive: PrimitiveType, keyword: impl Into<String>) -> Self {
        self.keywords.insert(primitive, keyword.into());
        self
    }

    /// Returns the keyword for a primitive.
    #[must_use]
    pub fn get(&self, primitive: PrimitiveType) -> Option<&str> {
        self.keywords.get(&primitive).map(String::as_str)
    }
}

impl Default for PrimitiveMap {
    fn default() -> Self {
        Self::proto3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proto3_table() {
        let map = PrimitiveMap::proto3();
        let expected = [
            (PrimitiveType::Boolean, "bool"),
            (PrimitiveType::Byte, "bytes"),
            (PrimitiveType::Int, "sint32"),
            (PrimitiveType::Long, "sint64"),
            (PrimitiveType::Float, "float"),
            (PrimitiveType::Double, "double"),
            (PrimitiveType::String, "string"),
        ];
        for (primitive, keyword) in expected {
            assert_eq!(map.get(primitive), Some(keyword));
        }
    }

    #[test]
    fn test_proto2_overrides() {
        let map = PrimitiveMap::proto2();
        assert_eq!(map.get(PrimitiveType::Int), Some("int32"));
        assert_eq!(map.get(PrimitiveType::Long), Some("int64"));
        assert_eq!(map.get(PrimitiveType::String), Some("string"));
    }

    #[test]
    fn test_custom_keyword() {
        let map = PrimitiveMap::empty().with(PrimitiveType::Int, "fixed32");
        assert_eq!(map.get(PrimitiveType::Int), Some("fixed32"));
        assert_eq!(map.get(PrimitiveType::Long), None);
        assert_eq!(PrimitiveMap::default(), PrimitiveMap::proto3());
    }
}
