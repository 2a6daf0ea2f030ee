//! Check command report data structures.

use std::{collections::HashMap, path::PathBuf};

use refpages_core::EntityKind;

use super::output::{Output, Report};

/// Report data from document validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the root document.
    pub input: PathBuf,
    /// What the document would generate.
    pub stats: Stats,
}

/// Document statistics.
#[derive(Debug, Default)]
pub struct Stats {
    /// Pages, one per output directory.
    pub pages: usize,
    /// Summary tables.
    pub tables: usize,
    /// Pages given as literal reStructuredText.
    pub raw_pages: usize,
    /// Documented entities by kind.
    pub entities: HashMap<EntityKind, usize>,
}

impl Stats {
    /// Entity counts, in the order kinds are listed everywhere else.
    pub fn entity_counts(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .into_iter()
            .filter_map(|kind| self.entities.get(&kind).map(|count| (kind, *count)))
            .collect()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();

        out.key_value_indented("pages", &self.stats.pages.to_string());
        out.key_value_indented("summary tables", &self.stats.tables.to_string());
        if self.stats.raw_pages > 0 {
            out.key_value_indented("raw pages", &self.stats.raw_pages.to_string());
        }

        let counts = self.stats.entity_counts();
        if !counts.is_empty() {
            out.newline();
            out.section("Entities");
            for (kind, count) in counts {
                out.key_value_indented(kind.as_str(), &count.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_render_check_report() {
        let report = CheckReport {
            input: PathBuf::from("docs/index.yaml"),
            stats: Stats {
                pages: 4,
                tables: 1,
                raw_pages: 0,
                entities: HashMap::from([(EntityKind::Fn, 3), (EntityKind::Struct, 1)]),
            },
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "✓ docs/index.yaml is valid",
                "",
                "  pages: 4",
                "  summary tables: 1",
                "",
                "Entities:",
                "  struct: 1",
                "  fn: 3",
            ]
        );
    }
}
