//! Indentation configuration for generated pages.

/// Width of one indentation level, in spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(usize);

impl Indent {
    /// 2-space indentation, the unit of reStructuredText directive bodies.
    pub const RST: Self = Self(2);

    /// The whitespace of `level` indentation levels.
    pub fn repeat(&self, level: usize) -> String {
        " ".repeat(self.0 * level)
    }
}
