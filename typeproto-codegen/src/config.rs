//! Generator configuration.

use crate::primitives::PrimitiveMap;
pub use crate::writer::Indent;
use chrono::{DateTime, Local};

/// Default generator name written into the document header.
pub const DEFAULT_NAME: &str = "TypeProto Generator";

/// Default generator version written into the document header.
pub const DEFAULT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Header timestamp format.
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Schema language revision declared by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// `syntax="proto2";`, singular fields labelled `optional`.
    Proto2,
    /// `syntax="proto3";`.
    #[default]
    Proto3,
}

impl Syntax {
    /// Returns the syntax identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Proto2 => "proto2",
            Self::Proto3 => "proto3",
        }
    }

    /// Label required before singular fields.
    #[must_use]
    pub const fn singular_label(&self) -> Option<&'static str> {
        match self {
            Self::Proto2 => Some("optional"),
            Self::Proto3 => None,
        }
    }
}

/// How collection and nested-message fields name what they reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceStyle {
    /// List and collection fields reference the element type; nested-message
    /// fields keep their own name.
    #[default]
    ElementType,
    /// Collection fields reference the container type itself and
    /// nested-message fields are named after their type.
    Legacy,
}

/// Configuration for one generation session.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Generator name for the header comment.
    pub name: String,
    /// Generator version for the header comment.
    pub version: String,
    /// Scalar keywords for primitive types.
    pub primitives: PrimitiveMap,
    /// Declared syntax.
    pub syntax: Syntax,
    /// Indentation unit.
    pub indent: Indent,
    /// Reference style for collection fields.
    pub reference_style: ReferenceStyle,
    /// Fixed header timestamp; the current time when `None`.
    pub timestamp: Option<DateTime<Local>>,
    /// Whether operation parameter messages are emitted.
    pub operations: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            primitives: PrimitiveMap::proto3(),
            syntax: Syntax::Proto3,
            indent: Indent::Tab,
            reference_style: ReferenceStyle::ElementType,
            timestamp: None,
            operations: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Returns the header timestamp text.
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        self.timestamp
            .unwrap_or_else(Local::now)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generator name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Sets the generator version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Sets the primitive keyword map.
    #[must_use]
    pub fn primitives(mut self, primitives: PrimitiveMap) -> Self {
        self.config.primitives = primitives;
        self
    }

    /// Sets the syntax.
    #[must_use]
    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.config.syntax = syntax;
        self
    }

    /// Switches to proto2: syntax line, `optional` labels and proto2 keywords.
    #[must_use]
    pub fn proto2(self) -> Self {
        self.syntax(Syntax::Proto2).primitives(PrimitiveMap::proto2())
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn indent(mut self, indent: Indent) -> Self {
        self.config.indent = indent;
        self
    }

    /// Sets the collection reference style.
    #[must_use]
    pub fn reference_style(mut self, style: ReferenceStyle) -> Self {
        self.config.reference_style = style;
        self
    }

    /// Fixes the header timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.config.timestamp = Some(timestamp);
        self
    }

    /// Enables or disables operation parameter messages.
    #[must_use]
    pub fn operations(mut self, enabled: bool) -> Self {
        self.config.operations = enabled;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use typeproto_schema::PrimitiveType;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.name, "TypeProto Generator");
        assert!(config.version.starts_with('v'));
        assert_eq!(config.syntax, Syntax::Proto3);
        assert_eq!(config.indent, Indent::Tab);
        assert_eq!(config.reference_style, ReferenceStyle::ElementType);
        assert!(config.operations);
        assert!(config.timestamp.is_none());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::builder()
            .name("JavaToProto Generator")
            .version("v0.2")
            .indent(Indent::Spaces(4))
            .reference_style(ReferenceStyle::Legacy)
            .operations(false)
            .build();

        assert_eq!(config.name, "JavaToProto Generator");
        assert_eq!(config.version, "v0.2");
        assert_eq!(config.indent, Indent::Spaces(4));
        assert_eq!(config.reference_style, ReferenceStyle::Legacy);
        assert!(!config.operations);
    }

    #[test]
    fn test_proto2_builder() {
        let config = GeneratorConfig::builder().proto2().build();
        assert_eq!(config.syntax, Syntax::Proto2);
        assert_eq!(config.syntax.as_str(), "proto2");
        assert_eq!(config.syntax.singular_label(), Some("optional"));
        assert_eq!(config.primitives.get(PrimitiveType::Int), Some("int32"));
    }

    #[test]
    fn test_fixed_timestamp() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .single()
            .expect("unambiguous local time");
        let config = GeneratorConfig::builder().timestamp(at).build();
        assert_eq!(config.timestamp_text(), "Tue Mar 05 14:07:09 2024");
    }
}
