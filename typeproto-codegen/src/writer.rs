//! Indentation-scoped text emission.

/// Indentation unit for one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indent {
    /// One tab per level.
    #[default]
    Tab,
    /// The given number of spaces per level.
    Spaces(usize),
}

impl Indent {
    fn write_to(self, output: &mut String, depth: usize) {
        for _ in 0..depth {
            match self {
                Self::Tab => output.push('\t'),
                Self::Spaces(n) => output.extend(std::iter::repeat_n(' ', n)),
            }
        }
    }
}

/// Append-only document buffer with a current indent depth.
#[derive(Debug, Clone, Default)]
pub struct ProtoWriter {
    output: String,
    depth: usize,
    indent: Indent,
    label: Option<&'static str>,
}

impl ProtoWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new(indent: Indent) -> Self {
        Self {
            output: String::new(),
            depth: 0,
            indent,
            label: None,
        }
    }

    /// Sets the label written before singular fields (`optional` in proto2).
    #[must_use]
    pub fn with_singular_label(mut self, label: Option<&'static str>) -> Self {
        self.label = label;
        self
    }

    /// Opens a `<keyword> <name>{` block and indents.
    pub fn open_block(&mut self, keyword: &str, name: &str) {
        self.line(&format!("{keyword} {name}{{"));
        self.depth += 1;
    }

    /// Dedents and closes the innermost block.
    pub fn close_block(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Appends one indented, newline-terminated line.
    pub fn line(&mut self, text: &str) {
        self.indent.write_to(&mut self.output, self.depth);
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Appends an unindented line.
    pub fn raw(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Appends `<type> <name> = <index>;`.
    pub fn field(&mut self, type_name: &str, name: &str, index: usize) {
        let mut text = String::new();
        if let Some(label) = self.label {
            text.push_str(label);
            text.push(' ');
        }
        text.push_str(&format!("{type_name} {name} = {index};"));
        self.line(&text);
    }

    /// Appends `repeated <type> <name> = <index>;`.
    pub fn repeated(&mut self, type_name: &str, name: &str, index: usize) {
        self.line(&format!("repeated {type_name} {name} = {index};"));
    }

    /// Appends `<constant> = <ordinal>;`.
    pub fn enum_constant(&mut self, name: &str, ordinal: usize) {
        self.line(&format!("{name} = {ordinal};"));
    }

    /// Consumes the writer and returns the document.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_indentation() {
        let mut writer = ProtoWriter::new(Indent::Tab);
        writer.open_block("message", "Person");
        writer.field("string", "name", 1);
        writer.open_block("enum", "Color");
        writer.enum_constant("RED", 0);
        writer.close_block();
        writer.repeated("sint32", "counts", 3);
        writer.close_block();

        assert_eq!(
            writer.finish(),
            "message Person{\n\tstring name = 1;\n\tenum Color{\n\t\tRED = 0;\n\t}\n\trepeated sint32 counts = 3;\n}\n"
        );
    }

    #[test]
    fn test_space_indent() {
        let mut writer = ProtoWriter::new(Indent::Spaces(2));
        writer.open_block("message", "A");
        writer.field("bool", "flag", 1);
        writer.close_block();
        assert_eq!(writer.finish(), "message A{\n  bool flag = 1;\n}\n");
    }

    #[test]
    fn test_singular_label() {
        let mut writer = ProtoWriter::new(Indent::Tab).with_singular_label(Some("optional"));
        writer.field("int32", "age", 2);
        writer.repeated("int32", "counts", 3);
        assert_eq!(
            writer.finish(),
            "optional int32 age = 2;\nrepeated int32 counts = 3;\n"
        );
    }

    #[test]
    fn test_close_never_underflows() {
        let mut writer = ProtoWriter::default();
        writer.close_block();
        writer.raw("syntax=\"proto3\";");
        writer.blank();
        writer.line("package A;");
        assert_eq!(writer.finish(), "}\nsyntax=\"proto3\";\n\npackage A;\n");
    }
}
