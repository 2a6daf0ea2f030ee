//! Line builder for generating properly indented pages.

use super::{CodeFragment, Indent, Renderable};

/// Builder for text with proper indentation.
///
/// Page sections are emitted as [`CodeFragment`]s; empty lines are never
/// indented.
///
/// # Example
///
/// ```
/// use refpages_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::rst();
/// builder
///     .push_line(".. toctree::")
///     .push_blank()
///     .emit(&vec![CodeFragment::indent(vec![CodeFragment::line("f/index")])]);
/// assert_eq!(builder.build(), ".. toctree::\n\n  f/index\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with reStructuredText's 2-space indentation.
    pub fn rst() -> Self {
        Self::new(Indent::RST)
    }

    /// Add a line with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Emit a Renderable node (mutable).
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
        }
    }

    /// Consume the builder and return the generated text.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        self.buffer.push_str(&self.indent.repeat(self.indent_level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fragments: Vec<CodeFragment>) -> String {
        let mut builder = CodeBuilder::rst();
        builder.emit(&fragments);
        builder.build()
    }

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::rst();
        builder.push_line(".. type:: size_t");
        assert_eq!(builder.build(), ".. type:: size_t\n");
    }

    #[test]
    fn test_indentation() {
        let text = render(vec![
            CodeFragment::line(".. function::"),
            CodeFragment::indent(vec![CodeFragment::indent(vec![CodeFragment::line(
                "void f()",
            )])]),
            CodeFragment::line("done"),
        ]);

        assert_eq!(text, ".. function::\n    void f()\ndone\n");
    }

    #[test]
    fn test_blank_lines_are_never_indented() {
        let text = render(vec![CodeFragment::indent(vec![
            CodeFragment::line("a"),
            CodeFragment::Blank,
            CodeFragment::line(""),
            CodeFragment::line("b"),
        ])]);

        assert_eq!(text, "  a\n\n\n  b\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::rst();
        builder.push_dedent().push_dedent().push_line("top");
        assert_eq!(builder.build(), "top\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        let text = render(vec![
            CodeFragment::line(".. class:: Widget"),
            CodeFragment::Blank,
            CodeFragment::indent(vec![
                CodeFragment::line("Intro."),
                CodeFragment::Blank,
                CodeFragment::indent(vec![CodeFragment::line("deeper")]),
            ]),
        ]);

        assert_eq!(text, ".. class:: Widget\n\n  Intro.\n\n    deeper\n");
    }
}
