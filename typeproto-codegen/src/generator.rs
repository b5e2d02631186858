//! Document assembly.

use crate::config::GeneratorConfig;
use crate::engine::Traversal;
use crate::error::CodegenError;
use crate::operations::emit_operations;
use crate::registry::TypeRegistry;
use crate::writer::ProtoWriter;
use tracing::info;
use typeproto_schema::{TypeDef, TypeId, TypeInfo, TypeKind};

/// Proto document generator for one root type.
///
/// A generator is one session: the document is produced on the first call to
/// [`Generator::generate`] and returned from cache afterwards.
pub struct Generator<'a, I: TypeInfo + ?Sized> {
    info: &'a I,
    root: TypeId,
    config: GeneratorConfig,
    output: Option<String>,
}

impl<'a, I: TypeInfo + ?Sized> Generator<'a, I> {
    /// Creates a generator for `root`.
    ///
    /// # Errors
    /// Returns `CodegenError::Configuration` if `root` is not described by
    /// `info` or is neither a message nor an enum.
    pub fn new(info: &'a I, root: TypeId, config: GeneratorConfig) -> Result<Self, CodegenError> {
        let def = info.type_def(root).ok_or_else(|| {
            CodegenError::configuration(format!("root type {root} is not described"))
        })?;
        if !matches!(def.kind, TypeKind::Message | TypeKind::Enum) {
            return Err(CodegenError::configuration(format!(
                "root type '{}' must be a message or an enum",
                def.qualified_name
            )));
        }

        Ok(Self {
            info,
            root,
            config,
            output: None,
        })
    }

    /// Creates a generator for the type named `root`.
    ///
    /// # Errors
    /// Returns `CodegenError::Configuration` if no such type exists or it
    /// cannot be a root.
    pub fn for_name(info: &'a I, root: &str, config: GeneratorConfig) -> Result<Self, CodegenError> {
        let id = info
            .find(root)
            .ok_or_else(|| CodegenError::configuration(format!("root type '{root}' not found")))?;
        Self::new(info, id, config)
    }

    /// Root type of this session.
    #[must_use]
    pub fn root(&self) -> TypeId {
        self.root
    }

    /// Configuration of this session.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the document, or returns the one generated before.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reachable type cannot be expressed.
    pub fn generate(&mut self) -> Result<&str, CodegenError> {
        let output = match self.output.take() {
            Some(output) => output,
            None => self.render()?,
        };
        Ok(self.output.insert(output).as_str())
    }

    fn render(&self) -> Result<String, CodegenError> {
        let root = self
            .info
            .type_def(self.root)
            .ok_or_else(|| CodegenError::configuration("root type disappeared"))?;
        info!("Generating proto document for {}", root.qualified_name);

        let mut writer = ProtoWriter::new(self.config.indent)
            .with_singular_label(self.config.syntax.singular_label());
        self.write_header(&mut writer, root);

        let registry = TypeRegistry::seeded(self.info, &self.config.primitives)?;
        let mut traversal =
            Traversal::new(self.info, registry, writer, self.config.reference_style);
        traversal.run(self.root)?;
        let (mut writer, registry) = traversal.finish();

        if self.config.operations {
            emit_operations(self.info, &registry, &mut writer, self.root)?;
        }

        let output = writer.finish();
        info!(
            "Generated {} bytes for {}",
            output.len(),
            root.qualified_name
        );
        Ok(output)
    }

    fn write_header(&self, writer: &mut ProtoWriter, root: &TypeDef) {
        writer.raw(&format!(
            "// Generated by {} {} on {}",
            self.config.name,
            self.config.version,
            self.config.timestamp_text()
        ));
        writer.raw(&format!("syntax=\"{}\";", self.config.syntax.as_str()));
        writer.blank();

        writer.raw(&format!(
            "option java_package=\"{}Proto\";",
            root.qualified_name
        ));
        writer.raw(&format!(
            "option java_outer_classname=\"{}Proto\";",
            root.name
        ));
        writer.raw("option java_multiple_files=true;");
        writer.blank();

        writer.raw(&format!("package {}Proto;", root.name));
        writer.blank();
    }
}
