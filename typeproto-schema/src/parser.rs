//! XML type-description parser.
//!
//! This module parses type-description documents into the unresolved
//! [`Description`] representation. A document looks like:
//!
//! ```xml
//! <types package="com.example">
//!     <enum name="Color">
//!         <constant name="RED"/>
//!     </enum>
//!     <message name="Person">
//!         <field name="name" type="string"/>
//!         <field name="scores" type="Map" args="string, Integer"/>
//!         <operation name="rename">
//!             <param name="newName" type="string"/>
//!         </operation>
//!     </message>
//! </types>
//! ```

use crate::description::{
    ContainerDecl, ContainerKind, Description, EnumDecl, FieldDecl, MessageDecl, OperationDecl,
    ParamDecl, TypeDecl,
};
use crate::error::ParseError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a type-description document from a string.
///
/// # Arguments
/// * `xml` - XML document content
///
/// # Returns
/// Parsed description or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid elements.
pub fn parse_description(xml: &str) -> Result<Description, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut description: Option<Description> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if let Some(desc) = description.as_mut() {
                    parse_decl(&mut reader, e, desc, true)?;
                } else {
                    description = Some(parse_types_element(e)?);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some(desc) = description.as_mut() {
                    parse_decl(&mut reader, e, desc, false)?;
                } else {
                    description = Some(parse_types_element(e)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    description.ok_or_else(|| ParseError::MalformedDescription {
        message: "no <types> element found".to_string(),
    })
}

/// Parses the root `types` element attributes.
fn parse_types_element(e: &BytesStart<'_>) -> Result<Description, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;
    if name != "types" {
        return Err(ParseError::unknown_element(name, "document"));
    }

    let mut package = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        if key == "package" {
            package = Some(value.to_string());
        }
    }

    Ok(Description::new(package))
}

/// Parses one top-level declaration inside `types`.
fn parse_decl(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    desc: &mut Description,
    has_body: bool,
) -> Result<(), ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    let decl = match (name, has_body) {
        ("message", true) => TypeDecl::Message(parse_message(reader, e)?),
        ("message", false) => TypeDecl::Message(MessageDecl::new(required_name(e, "message")?)),
        ("enum", true) => TypeDecl::Enum(parse_enum(reader, e)?),
        ("enum", false) => TypeDecl::Enum(EnumDecl::new(required_name(e, "enum")?)),
        ("container", _) => {
            let container = parse_container(e)?;
            if has_body {
                skip_to_end(reader)?;
            }
            TypeDecl::Container(container)
        }
        (other, _) => return Err(ParseError::unknown_element(other, "types")),
    };

    desc.add_decl(decl);
    Ok(())
}

/// Reads the mandatory `name` attribute of an element.
fn required_name(e: &BytesStart<'_>, element: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "name" {
            let value = std::str::from_utf8(&attr.value)?;
            if value.is_empty() {
                return Err(ParseError::invalid_attr(element, "name", value));
            }
            return Ok(value.to_string());
        }
    }
    Err(ParseError::missing_attr(element, "name"))
}

/// Parses a boolean attribute value.
fn parse_flag(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Parses a message declaration with its fields and operations.
fn parse_message(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<MessageDecl, ParseError> {
    let mut message = MessageDecl::new(required_name(e, "message")?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "field" => {
                        message.add_field(parse_field(e)?);
                        skip_to_end(reader)?;
                    }
                    "operation" => message.add_operation(parse_operation(reader, e)?),
                    other => return Err(ParseError::unknown_element(other, "message")),
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "field" => message.add_field(parse_field(e)?),
                    "operation" => {
                        message.add_operation(OperationDecl::new(required_name(e, "operation")?))
                    }
                    other => return Err(ParseError::unknown_element(other, "message")),
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::MalformedDescription {
                    message: format!("unterminated message '{}'", message.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(message)
}

/// Parses a field declaration.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDecl, ParseError> {
    let mut name = None;
    let mut type_name = None;
    let mut args = Vec::new();
    let mut is_abstract = false;
    let mut is_transient = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => type_name = Some(value.trim().to_string()),
            "args" => {
                args = value
                    .split(',')
                    .map(str::trim)
                    .filter(|arg| !arg.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "abstract" => is_abstract = parse_flag("field", "abstract", value)?,
            "transient" => is_transient = parse_flag("field", "transient", value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let type_name = type_name.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    let mut field = FieldDecl::new(name, type_name);
    field.args = args;
    field.is_abstract = is_abstract;
    field.is_transient = is_transient;

    Ok(field)
}

/// Parses an operation declaration and its parameters.
fn parse_operation(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<OperationDecl, ParseError> {
    let mut operation = OperationDecl::new(required_name(e, "operation")?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                operation.params.push(parse_param(e)?);
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => operation.params.push(parse_param(e)?),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::MalformedDescription {
                    message: format!("unterminated operation '{}'", operation.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(operation)
}

/// Parses an operation parameter.
fn parse_param(e: &BytesStart<'_>) -> Result<ParamDecl, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let tag_name = std::str::from_utf8(&name_bytes)?;
    if tag_name != "param" {
        return Err(ParseError::unknown_element(tag_name, "operation"));
    }

    let mut name = None;
    let mut type_name = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => type_name = Some(value.trim().to_string()),
            _ => {}
        }
    }

    Ok(ParamDecl {
        name: name.ok_or_else(|| ParseError::missing_attr("param", "name"))?,
        type_name: type_name.ok_or_else(|| ParseError::missing_attr("param", "type"))?,
    })
}

/// Parses an enum declaration.
fn parse_enum(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> Result<EnumDecl, ParseError> {
    let mut enum_decl = EnumDecl::new(required_name(e, "enum")?);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "constant" {
                    return Err(ParseError::unknown_element(tag_name, "enum"));
                }
                enum_decl.constants.push(required_name(e, "constant")?);
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                if tag_name != "constant" {
                    return Err(ParseError::unknown_element(tag_name, "enum"));
                }
                enum_decl.constants.push(required_name(e, "constant")?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::MalformedDescription {
                    message: format!("unterminated enum '{}'", enum_decl.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(enum_decl)
}

/// Parses a container declaration.
fn parse_container(e: &BytesStart<'_>) -> Result<ContainerDecl, ParseError> {
    let mut name = None;
    let mut kind = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "kind" => {
                kind = Some(
                    ContainerKind::parse(value)
                        .ok_or_else(|| ParseError::invalid_attr("container", "kind", value))?,
                )
            }
            _ => {}
        }
    }

    Ok(ContainerDecl {
        name: name.ok_or_else(|| ParseError::missing_attr("container", "name"))?,
        kind: kind.ok_or_else(|| ParseError::missing_attr("container", "kind"))?,
    })
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
