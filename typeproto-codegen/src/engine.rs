//! Worklist traversal over the type graph.
//!
//! The traversal emits the root type, then drains a LIFO worklist of types
//! discovered while emitting fields. A type's name is reserved in the
//! registry when it is queued, so every type is queued at most once and the
//! drain terminates on any finite graph, cyclic ones included.

use crate::classify::{FieldClass, classify};
use crate::config::ReferenceStyle;
use crate::error::CodegenError;
use crate::path::EnclosingStack;
use crate::registry::TypeRegistry;
use crate::writer::ProtoWriter;
use tracing::{debug, trace, warn};
use typeproto_schema::{FieldDef, TypeDef, TypeId, TypeInfo, TypeKind};

/// One traversal session over a type graph.
pub struct Traversal<'a, I: TypeInfo + ?Sized> {
    info: &'a I,
    registry: TypeRegistry,
    stack: EnclosingStack,
    worklist: Vec<TypeId>,
    writer: ProtoWriter,
    reference_style: ReferenceStyle,
}

impl<'a, I: TypeInfo + ?Sized> Traversal<'a, I> {
    /// Creates a traversal writing after whatever `writer` already holds.
    #[must_use]
    pub fn new(
        info: &'a I,
        registry: TypeRegistry,
        writer: ProtoWriter,
        reference_style: ReferenceStyle,
    ) -> Self {
        Self {
            info,
            registry,
            stack: EnclosingStack::new(),
            worklist: Vec::new(),
            writer,
            reference_style,
        }
    }

    /// Emits `root` and every type reachable from it.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reachable field cannot be classified.
    pub fn run(&mut self, root: TypeId) -> Result<(), CodegenError> {
        let def = self.type_def(root, "<root>")?;
        self.registry.reserve(root, def.name.as_str());
        self.worklist.push(root);

        while let Some(id) = self.worklist.pop() {
            if self.registry.is_emitted(id) {
                debug!("Skipping already emitted type {}", id);
                continue;
            }
            self.emit_type(id)?;
        }

        Ok(())
    }

    /// Consumes the traversal, returning the writer and the registry.
    #[must_use]
    pub fn finish(self) -> (ProtoWriter, TypeRegistry) {
        (self.writer, self.registry)
    }

    fn type_def(&self, id: TypeId, field: &str) -> Result<&'a TypeDef, CodegenError> {
        let info = self.info;
        info.type_def(id)
            .ok_or_else(|| CodegenError::unknown_type(id.to_string(), field))
    }

    /// Emits one queued type as a top-level block.
    fn emit_type(&mut self, id: TypeId) -> Result<(), CodegenError> {
        let def = self.type_def(id, "<worklist>")?;
        match def.kind {
            TypeKind::Message => self.emit_message(id, def),
            TypeKind::Enum => {
                self.emit_enum(id, def);
                Ok(())
            }
            other => Err(CodegenError::generation(format!(
                "cannot emit {other:?} type '{}' as a block",
                def.qualified_name
            ))),
        }
    }

    fn emit_message(&mut self, id: TypeId, def: &'a TypeDef) -> Result<(), CodegenError> {
        self.stack.push(def.name.as_str());
        let path = self.stack.current_path();
        debug!("Emitting message {} as {}", def.qualified_name, path);
        self.registry.reserve(id, path);
        self.registry.mark_emitted(id);

        self.writer.open_block("message", &def.name);
        for (ordinal, field) in def.fields.iter().enumerate() {
            self.emit_field(field, ordinal + 1)?;
        }
        self.writer.close_block();

        self.stack.pop();
        Ok(())
    }

    /// Emits an enum block inside the innermost open block, if any.
    fn emit_enum(&mut self, id: TypeId, def: &TypeDef) {
        self.stack.push(def.name.as_str());
        let path = self.stack.current_path();
        debug!("Emitting enum {} as {}", def.qualified_name, path);
        self.registry.reserve(id, path);
        self.registry.mark_emitted(id);

        self.writer.open_block("enum", &def.name);
        for (ordinal, constant) in def.constants.iter().enumerate() {
            self.writer.enum_constant(constant, ordinal);
        }
        self.writer.close_block();

        self.stack.pop();
    }

    fn emit_field(&mut self, field: &FieldDef, index: usize) -> Result<(), CodegenError> {
        let class = classify(self.info, &self.registry, field)?;
        trace!("Field {} #{} classified as {:?}", field.name, index, class);

        match class {
            FieldClass::Skip => {}
            FieldClass::Known(name) => self.writer.field(&name, &field.name, index),
            FieldClass::Enum(id) => {
                let def = self.type_def(id, &field.name)?;
                self.emit_enum(id, def);
                let name = self.reserved_name(id, &field.name)?;
                self.writer.field(&name, &field.name, index);
            }
            FieldClass::Map { key, value } => {
                let entry = format!("Map_{}", field.name);
                self.emit_map_entry(&entry, key, value, &field.name)?;
                self.writer.repeated(&entry, &field.name, index);
            }
            FieldClass::Array(element) | FieldClass::List(element) => {
                let name = self.reference(element, &field.name)?;
                self.writer.repeated(&name, &field.name, index);
            }
            FieldClass::Collection { container, element } => {
                let name = match self.reference_style {
                    ReferenceStyle::ElementType => self.reference(element, &field.name)?,
                    ReferenceStyle::Legacy => {
                        self.enqueue(element, &field.name)?;
                        let name = match self.registry.lookup(container) {
                            Some(name) => name.to_string(),
                            None => self.type_def(container, &field.name)?.name.clone(),
                        };
                        warn!(
                            "Field {} references container {} instead of its element type",
                            field.name, name
                        );
                        name
                    }
                };
                self.writer.repeated(&name, &field.name, index);
            }
            FieldClass::Nested(id) => {
                self.enqueue(id, &field.name)?;
                let def = self.type_def(id, &field.name)?;
                let name = match self.reference_style {
                    ReferenceStyle::ElementType => field.name.as_str(),
                    ReferenceStyle::Legacy => {
                        warn!(
                            "Field {} is written under its type name {}",
                            field.name, def.name
                        );
                        def.name.as_str()
                    }
                };
                self.writer.field(&def.name, name, index);
            }
        }

        Ok(())
    }

    /// Writes the synthetic key/value message for a map field.
    fn emit_map_entry(
        &mut self,
        entry: &str,
        key: TypeId,
        value: TypeId,
        field: &str,
    ) -> Result<(), CodegenError> {
        self.stack.push(entry);
        self.writer.open_block("message", entry);

        for (slot, (id, label)) in [(key, "key"), (value, "value")].into_iter().enumerate() {
            if !self.registry.contains(id) {
                let def = self.type_def(id, field)?;
                let path = self.stack.child_path(&def.name);
                debug!("Queueing {} for map entry as {}", def.qualified_name, path);
                self.registry.correct(id, path);
                self.worklist.push(id);
            }
            let name = self.reserved_name(id, field)?;
            let last = name.rsplit('.').next().unwrap_or(&name);
            self.writer.field(last, label, slot + 1);
        }

        self.writer.close_block();
        self.stack.pop();
        Ok(())
    }

    /// Name a repeated field uses for `id`, queueing it when still unnamed.
    fn reference(&mut self, id: TypeId, field: &str) -> Result<String, CodegenError> {
        self.enqueue(id, field)?;
        self.reserved_name(id, field)
    }

    /// Queues a type for emission unless it already has a name.
    fn enqueue(&mut self, id: TypeId, field: &str) -> Result<(), CodegenError> {
        if self.registry.contains(id) {
            return Ok(());
        }
        let def = self.type_def(id, field)?;
        if !(def.is_message() || def.is_enum()) {
            return Err(CodegenError::NestedContainer {
                field: field.to_string(),
                type_name: def.name.clone(),
            });
        }
        debug!("Queueing {}", def.qualified_name);
        self.registry.reserve(id, def.name.as_str());
        self.worklist.push(id);
        Ok(())
    }

    fn reserved_name(&self, id: TypeId, field: &str) -> Result<String, CodegenError> {
        self.registry
            .lookup(id)
            .map(str::to_string)
            .ok_or_else(|| CodegenError::unknown_type(id.to_string(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PrimitiveMap;
    use crate::writer::Indent;
    use typeproto_schema::{Modifiers, PrimitiveType, TypeCatalog};

    fn traverse(
        catalog: &TypeCatalog,
        root: TypeId,
        style: ReferenceStyle,
    ) -> Result<String, CodegenError> {
        let registry = TypeRegistry::seeded(catalog, &PrimitiveMap::proto3())?;
        let mut traversal =
            Traversal::new(catalog, registry, ProtoWriter::new(Indent::Tab), style);
        traversal.run(root)?;
        let (writer, _) = traversal.finish();
        Ok(writer.finish())
    }

    #[test]
    fn test_scalar_fields_and_skipped_indices() {
        let mut catalog = TypeCatalog::new();
        let root = catalog.add_message("Sample");
        let int = catalog.primitive(PrimitiveType::Int);
        let string = catalog.primitive(PrimitiveType::String);
        let fields = [
            FieldDef::new("a", int).with_modifiers(Modifiers::transient()),
            FieldDef::new("b", string),
            FieldDef::new("c", int).with_modifiers(Modifiers::abstract_field()),
            FieldDef::new("d", int),
        ];
        for field in fields {
            catalog.add_field(root, field).expect("add field");
        }

        let output = traverse(&catalog, root, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Sample{\n\tstring b = 2;\n\tsint32 d = 4;\n}\n"
        );
    }

    #[test]
    fn test_enum_nested_in_message() {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("Person");
        let color = catalog.add_enum("Color", ["RED", "GREEN", "BLUE"]);
        catalog
            .add_field(person, FieldDef::new("favorite", color))
            .expect("add field");
        catalog
            .add_field(person, FieldDef::new("second", color))
            .expect("add field");

        let output = traverse(&catalog, person, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Person{\n\
             \tenum Color{\n\
             \t\tRED = 0;\n\
             \t\tGREEN = 1;\n\
             \t\tBLUE = 2;\n\
             \t}\n\
             \tPerson.Color favorite = 1;\n\
             \tPerson.Color second = 2;\n\
             }\n"
        );
    }

    #[test]
    fn test_map_entry_with_scalars() {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("Person");
        let string = catalog.primitive(PrimitiveType::String);
        let integer = catalog.boxed(PrimitiveType::Int).expect("Integer");
        let scores = FieldDef::new("scores", catalog.map()).with_args([string, integer]);
        catalog.add_field(person, scores).expect("add field");

        let output = traverse(&catalog, person, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Person{\n\
             \tmessage Map_scores{\n\
             \t\tstring key = 1;\n\
             \t\tsint32 value = 2;\n\
             \t}\n\
             \trepeated Map_scores scores = 1;\n\
             }\n"
        );
    }

    #[test]
    fn test_map_value_is_queued_with_corrected_path() {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("Person");
        let address = catalog.add_message("Address");
        let string = catalog.primitive(PrimitiveType::String);
        catalog
            .add_field(address, FieldDef::new("street", string))
            .expect("add field");
        let homes = FieldDef::new("homes", catalog.map()).with_args([string, address]);
        catalog.add_field(person, homes).expect("add field");

        let registry = TypeRegistry::seeded(&catalog, &PrimitiveMap::proto3()).expect("seed");
        let mut traversal = Traversal::new(
            &catalog,
            registry,
            ProtoWriter::new(Indent::Tab),
            ReferenceStyle::ElementType,
        );
        traversal.run(person).expect("traverse");
        let (writer, registry) = traversal.finish();

        assert_eq!(
            writer.finish(),
            "message Person{\n\
             \tmessage Map_homes{\n\
             \t\tstring key = 1;\n\
             \t\tAddress value = 2;\n\
             \t}\n\
             \trepeated Map_homes homes = 1;\n\
             }\n\
             message Address{\n\
             \tstring street = 1;\n\
             }\n"
        );
        assert!(registry.is_emitted(address));
        assert_eq!(registry.lookup(address), Some("Address"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut catalog = TypeCatalog::new();
        let node = catalog.add_message("Node");
        let children = FieldDef::new("children", catalog.list()).with_args([node]);
        catalog
            .add_field(node, FieldDef::new("parent", node))
            .expect("add field");
        catalog.add_field(node, children).expect("add field");

        let output = traverse(&catalog, node, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Node{\n\tNode parent = 1;\n\trepeated Node children = 2;\n}\n"
        );
    }

    #[test]
    fn test_mutual_reference_emits_each_once() {
        let mut catalog = TypeCatalog::new();
        let a = catalog.add_message("A");
        let b = catalog.add_message("B");
        let c = catalog.add_message("C");
        let b_array = catalog.array_of(b);
        let string = catalog.primitive(PrimitiveType::String);
        catalog.add_field(a, FieldDef::new("b", b)).expect("add field");
        catalog
            .add_field(a, FieldDef::new("bs", b_array))
            .expect("add field");
        catalog.add_field(b, FieldDef::new("a", a)).expect("add field");
        let map = FieldDef::new("cs", catalog.map()).with_args([string, c]);
        catalog.add_field(b, map).expect("add field");
        catalog.add_field(c, FieldDef::new("b", b)).expect("add field");

        let output = traverse(&catalog, a, ReferenceStyle::ElementType).expect("traverse");
        for name in ["message A{", "message B{", "message C{"] {
            assert_eq!(output.matches(name).count(), 1, "{name} in {output}");
        }
        assert!(output.contains("\tB b = 1;\n"));
        assert!(output.contains("\trepeated B bs = 2;\n"));
    }

    #[test]
    fn test_reference_styles() {
        let mut catalog = TypeCatalog::new();
        let team = catalog.add_message("Team");
        let member = catalog.add_message("Member");
        let set = FieldDef::new("members", catalog.set()).with_args([member]);
        catalog.add_field(team, set).expect("add field");

        let output = traverse(&catalog, team, ReferenceStyle::ElementType).expect("traverse");
        assert!(output.contains("\trepeated Member members = 1;\n"));
        assert!(output.contains("message Member{\n}\n"));

        let output = traverse(&catalog, team, ReferenceStyle::Legacy).expect("traverse");
        assert!(output.contains("\trepeated Set members = 1;\n"));
        assert!(output.contains("message Member{\n}\n"));
    }

    #[test]
    fn test_nested_message_field_names() {
        let mut catalog = TypeCatalog::new();
        let person = catalog.add_message("Person");
        let address = catalog.add_message("Address");
        catalog
            .add_field(person, FieldDef::new("home", address))
            .expect("add field");
        catalog
            .add_field(person, FieldDef::new("work", address))
            .expect("add field");

        let output = traverse(&catalog, person, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Person{\n\tAddress home = 1;\n\tAddress work = 2;\n}\nmessage Address{\n}\n"
        );

        let output = traverse(&catalog, person, ReferenceStyle::Legacy).expect("traverse");
        assert_eq!(
            output,
            "message Person{\n\tAddress Address = 1;\n\tAddress Address = 2;\n}\nmessage Address{\n}\n"
        );
    }

    #[test]
    fn test_enum_element_emitted_top_level() {
        let mut catalog = TypeCatalog::new();
        let palette = catalog.add_message("Palette");
        let color = catalog.add_enum("Color", ["RED"]);
        let list = FieldDef::new("colors", catalog.list()).with_args([color]);
        catalog.add_field(palette, list).expect("add field");

        let output = traverse(&catalog, palette, ReferenceStyle::ElementType).expect("traverse");
        assert_eq!(
            output,
            "message Palette{\n\trepeated Color colors = 1;\n}\nenum Color{\n\tRED = 0;\n}\n"
        );
    }

    #[test]
    fn test_error_propagates() {
        let mut catalog = TypeCatalog::new();
        let root = catalog.add_message("Root");
        catalog
            .add_field(root, FieldDef::new("raw", catalog.map()))
            .expect("add field");

        let err = traverse(&catalog, root, ReferenceStyle::ElementType).expect_err("raw map");
        assert!(matches!(err, CodegenError::MalformedGeneric { .. }));
    }
}
