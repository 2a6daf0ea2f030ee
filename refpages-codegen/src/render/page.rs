//! Generic page bodies and entity pages.

use std::path::Path;

use refpages_core::Scope;
use refpages_manifest::{Entity, PageBody};

use super::{ContentsBlock, NamespaceDirective, PageRenderer, Rendered, TitleBlock};
use crate::builder::CodeFragment;

impl PageRenderer<'_> {
    /// Render a page body in its fixed section order.
    ///
    /// An explicit `ns` switches the scope for everything after the title.
    pub(super) fn render_page(
        &self,
        body: &PageBody,
        ns: Option<&str>,
        scope: &Scope,
        dir: &Path,
    ) -> Rendered {
        let mut out = Rendered::default();

        if let Some(title) = &body.title {
            out.emit(&TitleBlock::new(title));
        }

        let scope = match ns {
            Some(ns) => {
                let scope = scope.with_namespace(ns);
                out.emit(&NamespaceDirective::new(&scope));
                scope
            }
            None => scope.clone(),
        };

        if let Some(intro) = &body.intro {
            out.push(CodeFragment::text(intro));
            out.blank();
        }

        let mut links = Vec::new();
        for table in &body.contents {
            let rendered = self.render_table(table, &scope, dir);
            links.extend(rendered.links);
            out.append(rendered.section);
            out.blank();
        }

        if let Some(main) = &body.main {
            out.push(CodeFragment::text(main));
            out.blank();
        }

        for entity in &body.entities {
            out.append(self.render_entity(entity, &scope, dir));
            out.blank();
        }

        if let Some(outro) = &body.outro {
            out.push(CodeFragment::text(outro));
            out.blank();
        }

        out.emit(&ContentsBlock::new(&links));
        out
    }

    /// Render a page documenting a single entity.
    pub(super) fn render_entity_page(&self, entity: &Entity, scope: &Scope, dir: &Path) -> Rendered {
        let scope = match &entity.ns {
            Some(ns) => scope.with_namespace(ns),
            None => scope.clone(),
        };
        let title = format!("{}: ``{}``", entity.label(), scope.qualify(&entity.name));

        let mut out = Rendered::default();
        out.emit(&TitleBlock::new(&title));
        out.append(self.render_entity(entity, &scope, dir));
        out
    }
}
