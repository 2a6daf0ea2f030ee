use std::fs;

use pretty_assertions::assert_eq;
use refpages_manifest::{Declaration, Document, DocumentFile, Error, Node};
use tempfile::TempDir;

fn parse_err(yaml: &str) -> Error {
    *yaml.parse::<Document>().unwrap_err()
}

#[test]
fn test_entity_page_with_nested_table() {
    let yaml = r#"
ent-page:
  kind: class
  name: Widget
  template: <class T>
  ns: lib
  contents:
    Member Functions:
      - name: resize
        desc: Changes the size.
        ent-page:
          kind: fn
          name: resize
          sigs: [void resize(int n)]
"#;
    let doc: Document = yaml.parse().unwrap();

    let Node::EntityPage(widget) = &doc.root else {
        panic!("expected an entity page");
    };
    assert_eq!(widget.label(), "Class Template");
    assert_eq!(widget.ns.as_deref(), Some("lib"));

    let items: Vec<_> = widget.body.table_items().collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].slug, "resize");
    assert!(matches!(
        &items[0].node,
        Node::EntityPage(e) if matches!(e.declaration, Declaration::Function { .. })
    ));
}

#[test]
fn test_unknown_kind() {
    let yaml = "ent-page:\n  kind: widget\n  name: w\n";
    let err = parse_err(yaml);
    match err {
        Error::UnknownKind {
            kind, location, span, ..
        } => {
            assert_eq!(kind, "widget");
            assert_eq!(location, "ent-page");
            assert_eq!(span.map(|s| s.offset()), Some(18));
        }
        other => panic!("expected UnknownKind, got {other:?}"),
    }
}

#[test]
fn test_node_without_shape() {
    let yaml = r#"
page:
  contents:
    Types:
      - name: T
        desc: A type.
"#;
    let err = parse_err(yaml);
    assert!(matches!(
        err,
        Error::NodeShape { ref location, .. } if location == "page.contents.Types[0]"
    ));
}

#[test]
fn test_node_with_two_shapes() {
    let err = parse_err("rst: a\npage:\n  title: b\n");
    match err {
        Error::NodeShape { reason, location } => {
            assert_eq!(location, "document root");
            assert_eq!(reason, "has more than one of 'page', 'rst'");
        }
        other => panic!("expected NodeShape, got {other:?}"),
    }
}

#[test]
fn test_function_requires_signatures() {
    let err = parse_err("ent-page:\n  kind: fn\n  name: f\n");
    assert!(matches!(
        err,
        Error::Validation { ref message, .. } if message.contains("at least one signature")
    ));
}

#[test]
fn test_concept_requires_template() {
    let err = parse_err("ent-page:\n  kind: concept\n  name: Sized\n");
    assert!(matches!(
        err,
        Error::Validation { ref message, .. } if message.contains("'template'")
    ));
}

#[test]
fn test_variable_requires_type() {
    let err = parse_err("ent-page:\n  kind: const\n  name: npos\n");
    assert!(matches!(
        err,
        Error::Validation { ref message, .. } if message.contains("'type'")
    ));
}

#[test]
fn test_wrong_field_shape() {
    assert!(matches!(
        parse_err("page: [1, 2]\n"),
        Error::Shape { ref location, .. } if location == "document root"
    ));
}

#[test]
fn test_wrong_field_shape_names_the_item() {
    let yaml = r#"
page:
  contents:
    Types:
      - name: T
        desc: [1, 2]
        rst: x
"#;
    match parse_err(yaml) {
        Error::Shape { location, .. } => assert_eq!(location, "page.contents.Types[0]"),
        other => panic!("expected Shape, got {other:?}"),
    }
}

#[test]
fn test_wrong_field_shape_in_nested_entity() {
    let yaml = "page:\n  entities:\n    - kind: var\n      name: n\n      type: [int]\n";
    match parse_err(yaml) {
        Error::Shape { location, .. } => assert_eq!(location, "page.entities[0]"),
        other => panic!("expected Shape, got {other:?}"),
    }
}

#[test]
fn test_invalid_yaml() {
    assert!(matches!(parse_err("page: [\n"), Error::Parse { .. }));
}

#[test]
fn test_invalid_slug() {
    let yaml = r#"
page:
  contents:
    Functions:
      - name: operator/
        desc: Divides.
        rst: x
"#;
    assert!(matches!(
        parse_err(yaml),
        Error::InvalidSlug { ref slug, .. } if slug == "operator/"
    ));
}

#[test]
fn test_duplicate_slug_in_one_table() {
    let yaml = r#"
page:
  contents:
    Functions:
      - name: f
        desc: First.
        rst: a
      - name: f
        desc: Second.
        rst: b
"#;
    match parse_err(yaml) {
        Error::DuplicateSlug {
            slug,
            directory,
            first_span,
            second_span,
            ..
        } => {
            assert_eq!(slug, "f");
            assert_eq!(directory, ".");
            assert!(first_span.is_some());
            assert!(second_span.is_some());
        }
        other => panic!("expected DuplicateSlug, got {other:?}"),
    }
}

#[test]
fn test_duplicate_slug_across_entity_body() {
    let yaml = r#"
page:
  contents:
    Types:
      - name: Widget
        desc: A widget.
        rst: a
  entities:
    - kind: struct
      name: Gadget
      contents:
        Members:
          - name: x
            slug: Widget
            desc: Clashes.
            rst: b
"#;
    assert!(matches!(
        parse_err(yaml),
        Error::DuplicateSlug { ref slug, .. } if slug == "Widget"
    ));
}

#[test]
fn test_duplicate_slug_in_child_directory() {
    let yaml = r#"
page:
  contents:
    Pages:
      - name: sub
        desc: Sub page.
        page:
          contents:
            Items:
              - {name: a, desc: x, rst: x}
              - {name: a, desc: y, rst: y}
"#;
    assert!(matches!(
        parse_err(yaml),
        Error::DuplicateSlug { ref directory, .. } if directory == "sub"
    ));
}

#[test]
fn test_same_slug_in_sibling_directories() {
    let yaml = r#"
page:
  contents:
    Pages:
      - name: one
        desc: One.
        page:
          contents:
            Items: [{name: a, desc: x, rst: x}]
      - name: two
        desc: Two.
        page:
          contents:
            Items: [{name: a, desc: y, rst: y}]
"#;
    assert!(yaml.parse::<Document>().is_ok());
}

#[test]
fn test_load_directory_with_includes() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("parts")).unwrap();
    fs::write(
        temp.path().join("index.yaml"),
        "page:\n  title: API\n  intro: !include-str parts/intro.rst\n  entities: !include parts/entities.yaml\n",
    )
    .unwrap();
    fs::write(temp.path().join("parts/intro.rst"), "Welcome.\n").unwrap();
    fs::write(
        temp.path().join("parts/entities.yaml"),
        "- kind: var\n  name: count\n  type: int\n",
    )
    .unwrap();

    let file = DocumentFile::open(temp.path()).unwrap();

    let Node::Page(page) = &file.document().root else {
        panic!("expected a page");
    };
    assert_eq!(page.body.intro.as_deref(), Some("Welcome.\n"));
    assert_eq!(page.body.entities.len(), 1);
    assert_eq!(page.body.entities[0].name, "count");
}

#[test]
fn test_duplicate_slug_from_include_has_no_spans() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("index.yaml"),
        "page:\n  contents:\n    Functions:\n      - name: f\n        desc: First.\n        rst: a\n    More: !include more.yaml\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("more.yaml"),
        "- name: f\n  desc: Second.\n  rst: b\n",
    )
    .unwrap();

    let err = Document::from_file(temp.path()).unwrap_err();
    match *err {
        Error::DuplicateSlug {
            slug,
            first_span,
            second_span,
            ..
        } => {
            assert_eq!(slug, "f");
            assert_eq!(first_span, None);
            assert_eq!(second_span, None);
        }
        other => panic!("expected DuplicateSlug, got {other:?}"),
    }
}

#[test]
fn test_root_including_itself() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("index.yaml"),
        "page:\n  entities: !include index.yaml\n",
    )
    .unwrap();

    let err = Document::from_file(temp.path()).unwrap_err();
    assert!(matches!(*err, Error::IncludeCycle { .. }));
}
