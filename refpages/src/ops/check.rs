//! Check operation - document validation summary.
//!
//! Loading a document already validates it, so checking only gathers
//! statistics about the tree that would be generated.

use std::path::Path;

use refpages_manifest::{Document, Entity, Node, PageBody};

use crate::reports::{CheckReport, Stats};

/// Execute the check operation.
pub fn check(input: &Path, document: &Document) -> CheckReport {
    let mut stats = Stats::default();
    collect_node(&document.root, &mut stats);

    CheckReport {
        input: input.to_path_buf(),
        stats,
    }
}

fn collect_node(node: &Node, stats: &mut Stats) {
    stats.pages += 1;
    match node {
        Node::Page(page) => collect_body(&page.body, stats),
        Node::EntityPage(entity) => collect_entity(entity, stats),
        Node::Raw(_) => stats.raw_pages += 1,
    }
}

fn collect_body(body: &PageBody, stats: &mut Stats) {
    stats.tables += body.contents.len();
    for item in body.table_items() {
        collect_node(&item.node, stats);
    }
    for entity in &body.entities {
        collect_entity(entity, stats);
    }
}

fn collect_entity(entity: &Entity, stats: &mut Stats) {
    *stats.entities.entry(entity.kind()).or_default() += 1;
    collect_body(&entity.body, stats);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refpages_core::EntityKind;

    use super::*;

    #[test]
    fn test_check_counts_tree() {
        let document: Document = r#"
page:
  title: API
  contents:
    Types:
      - name: Widget
        desc: A widget.
        ent-page:
          kind: class
          name: Widget
          entities:
            - kind: fn
              name: resize
              sigs: [void resize()]
            - kind: ctor
              name: Widget
              sigs: [Widget()]
    Notes:
      - name: notes
        desc: Release notes
        rst: Nothing yet.
  entities:
    - kind: fn
      name: make_widget
      sigs: [Widget make_widget()]
"#
        .parse()
        .unwrap();

        let report = check(Path::new("index.yaml"), &document);

        assert_eq!(report.stats.pages, 3);
        assert_eq!(report.stats.tables, 2);
        assert_eq!(report.stats.raw_pages, 1);
        assert_eq!(
            report.stats.entity_counts(),
            vec![
                (EntityKind::Class, 1),
                (EntityKind::Fn, 2),
                (EntityKind::Ctor, 1)
            ]
        );
    }

    #[test]
    fn test_check_single_raw_page() {
        let document: Document = "rst: Hello".parse().unwrap();
        let report = check(Path::new("index.yaml"), &document);

        assert_eq!(report.stats.pages, 1);
        assert_eq!(report.stats.raw_pages, 1);
        assert!(report.stats.entities.is_empty());
    }
}
