//! Parameter messages for the root type's operations.

use crate::error::CodegenError;
use crate::registry::TypeRegistry;
use crate::writer::ProtoWriter;
use tracing::debug;
use typeproto_schema::{TypeId, TypeInfo, TypeKind};

/// Emits one message per operation of `owner` that takes parameters.
///
/// Parameters only use names already in the registry; arrays become
/// repeated fields and any other type falls back to its qualified name.
/// Nothing is queued for emission.
///
/// # Errors
/// Returns `CodegenError::UnknownType` if a parameter type is not described.
pub fn emit_operations<I>(
    info: &I,
    registry: &TypeRegistry,
    writer: &mut ProtoWriter,
    owner: TypeId,
) -> Result<(), CodegenError>
where
    I: TypeInfo + ?Sized,
{
    writer.blank();

    for operation in info.operations(owner) {
        if operation.params.is_empty() {
            continue;
        }
        debug!(
            "Emitting operation {} with {} parameter(s)",
            operation.name,
            operation.params.len()
        );

        writer.open_block("message", &operation.name);
        for (ordinal, param) in operation.params.iter().enumerate() {
            let index = ordinal + 1;
            if let Some(name) = registry.lookup(param.type_id) {
                writer.field(name, &param.name, index);
                continue;
            }

            match info.kind(param.type_id) {
                Some(TypeKind::Array(component)) => {
                    let name = match registry.lookup(component) {
                        Some(name) => name.to_string(),
                        None => qualified_name(info, component, &param.name)?,
                    };
                    writer.repeated(&name, &param.name, index);
                }
                _ => {
                    let name = qualified_name(info, param.type_id, &param.name)?;
                    writer.field(&name, &param.name, index);
                }
            }
        }
        writer.close_block();
    }

    Ok(())
}

fn qualified_name<I>(info: &I, id: TypeId, param: &str) -> Result<String, CodegenError>
where
    I: TypeInfo + ?Sized,
{
    info.qualified_name(id)
        .map(str::to_string)
        .ok_or_else(|| CodegenError::unknown_type(id.to_string(), param))
}
