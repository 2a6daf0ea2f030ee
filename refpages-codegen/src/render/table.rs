//! Summary tables and the child pages they spawn.

use std::path::Path;

use refpages_core::Scope;
use refpages_manifest::SummaryTable;

use super::{PageRenderer, Rendered, SummaryRow, TableHeader, child_dir};

/// A rendered summary table with the toctree links of its child pages.
#[derive(Debug, Default)]
pub(crate) struct RenderedTable {
    pub section: Rendered,
    /// `<slug>/index` per row, in row order.
    pub links: Vec<String>,
}

impl PageRenderer<'_> {
    /// Render a summary table, generating one child page per row.
    ///
    /// Child pages are generated in the scope of the table itself.
    pub(super) fn render_table(&self, table: &SummaryTable, scope: &Scope, dir: &Path) -> RenderedTable {
        let mut out = RenderedTable::default();
        out.section.emit(&TableHeader::new(&table.header));

        for item in &table.items {
            let files = self.render_directory(&item.node, scope, &child_dir(dir, &item.slug));
            out.section.files.extend(files);

            let link = format!("{}/index", item.slug);
            out.section.emit(&SummaryRow::new(&item.name, &link, &item.desc));
            out.links.push(link);
        }
        out
    }
}
