//! Enclosing-block stack and nesting path resolution.

/// Ordered stack (outer to inner) of the blocks currently being emitted.
///
/// Frames are the simple names of message and enum blocks, or of synthetic
/// map-entry messages.
#[derive(Debug, Clone, Default)]
pub struct EnclosingStack {
    frames: Vec<String>,
}

impl EnclosingStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the frame of a block being opened.
    pub fn push(&mut self, name: impl Into<String>) {
        self.frames.push(name.into());
    }

    /// Pops the innermost frame.
    pub fn pop(&mut self) -> Option<String> {
        self.frames.pop()
    }

    /// Returns the dotted path of the innermost block, empty at top level.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.frames.join(".")
    }

    /// Returns the path a block named `name` would get inside the innermost one.
    #[must_use]
    pub fn child_path(&self, name: &str) -> String {
        if self.frames.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.current_path(), name)
        }
    }
}
