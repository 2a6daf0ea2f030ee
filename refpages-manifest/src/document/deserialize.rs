//! Untyped document shapes and their conversion into the node model.
//!
//! Serde handles the field-level shape (strings must be strings, lists must
//! be lists); the conversion below handles what depends on more than one
//! field: node shape selection, per-kind requirements and slugs.
//!
//! Table items and entities stay as raw values until their parent is
//! converted, so a field-level failure is reported at the item it belongs to.

use indexmap::IndexMap;
use refpages_core::{EntityKind, UnknownKind};
use serde::Deserialize;
use serde_yaml::Value;

use super::{
    ClassKind, Declaration, Entity, Node, Page, PageBody, ParseContext, Signature, SummaryTable,
    TableItem, validate_slug,
};
use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(expecting = "a mapping with one of 'page', 'ent-page' or 'rst'")]
pub(super) struct RawNode {
    page: Option<RawPage>,
    #[serde(rename = "ent-page")]
    ent_page: Option<RawEntity>,
    rst: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPage {
    ns: Option<String>,
    #[serde(flatten)]
    body: RawBody,
}

#[derive(Debug, Default, Deserialize)]
struct RawBody {
    title: Option<String>,
    intro: Option<String>,
    contents: Option<IndexMap<String, Vec<Value>>>,
    main: Option<String>,
    entities: Option<Vec<Value>>,
    outro: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    slug: Option<String>,
    desc: String,
    #[serde(flatten)]
    node: RawNode,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    kind: String,
    name: String,
    template: Option<String>,
    ns: Option<String>,
    params: Option<IndexMap<String, String>>,
    sigs: Option<Vec<RawSignature>>,
    is: Option<String>,
    #[serde(rename = "type")]
    ty: Option<String>,
    #[serde(flatten)]
    body: RawBody,
}

/// A signature is either plain text or a mapping with details.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSignature {
    Plain(String),
    Detailed {
        sig: String,
        template: Option<String>,
        desc: Option<String>,
    },
}

/// Treat empty text as absent.
fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.is_empty())
}

impl RawNode {
    pub(super) fn into_node(self, ctx: &ParseContext) -> Result<Node> {
        let present: Vec<&str> = [
            (self.page.is_some(), "'page'"),
            (self.ent_page.is_some(), "'ent-page'"),
            (self.rst.is_some(), "'rst'"),
        ]
        .into_iter()
        .filter_map(|(is_present, key)| is_present.then_some(key))
        .collect();

        match (self.page, self.ent_page, self.rst) {
            (Some(page), None, None) => Ok(Node::Page(page.into_page(&ctx.push("page"))?)),
            (None, Some(entity), None) => Ok(Node::EntityPage(
                entity.into_entity(&ctx.push("ent-page"))?,
            )),
            (None, None, Some(rst)) => Ok(Node::Raw(rst)),
            (None, None, None) => Err(Error::node_shape(
                ctx.location(),
                "has none of 'page', 'ent-page' or 'rst'",
            )),
            _ => Err(Error::node_shape(
                ctx.location(),
                format!("has more than one of {}", present.join(", ")),
            )),
        }
    }
}

impl RawPage {
    fn into_page(self, ctx: &ParseContext) -> Result<Page> {
        Ok(Page {
            ns: non_empty(self.ns),
            body: self.body.into_body(ctx)?,
        })
    }
}

impl RawBody {
    fn into_body(self, ctx: &ParseContext) -> Result<PageBody> {
        let mut contents = Vec::new();
        for (header, items) in self.contents.unwrap_or_default() {
            let items = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    let ctx = ctx.push(format!("contents.{header}[{i}]"));
                    ctx.decode::<RawItem>(item)?.into_item(&ctx)
                })
                .collect::<Result<Vec<_>>>()?;
            contents.push(SummaryTable { header, items });
        }

        let entities = self
            .entities
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, entity)| {
                let ctx = ctx.push(format!("entities[{i}]"));
                ctx.decode::<RawEntity>(entity)?.into_entity(&ctx)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PageBody {
            title: non_empty(self.title),
            intro: non_empty(self.intro),
            contents,
            main: non_empty(self.main),
            entities,
            outro: non_empty(self.outro),
        })
    }
}

impl RawItem {
    fn into_item(self, ctx: &ParseContext) -> Result<TableItem> {
        let slug = non_empty(self.slug).unwrap_or_else(|| self.name.clone());
        if let Some(reason) = validate_slug(&slug) {
            let span = ctx
                .find_span("slug", &slug)
                .or_else(|| ctx.find_span("name", &slug));
            return Err(ctx
                .source_context()
                .invalid_slug_error(slug, reason, span));
        }

        Ok(TableItem {
            node: self.node.into_node(ctx)?,
            name: self.name,
            slug,
            desc: self.desc,
        })
    }
}

impl RawEntity {
    fn into_entity(self, ctx: &ParseContext) -> Result<Entity> {
        let kind: EntityKind = self.kind.parse().map_err(|err: UnknownKind| {
            ctx.source_context().unknown_kind_error(
                &err.0,
                ctx.location(),
                ctx.find_span("kind", &self.kind),
            )
        })?;

        let mut template = non_empty(self.template);
        let is = non_empty(self.is);

        if !kind.is_callable() {
            if self.sigs.is_some() {
                tracing::warn!(entity = %self.name, %kind, "ignoring 'sigs' on a non-function entity");
            }
            if self.params.is_some() {
                tracing::warn!(entity = %self.name, %kind, "ignoring 'params' on a non-function entity");
            }
        }

        let declaration = match kind {
            EntityKind::Struct => Declaration::Class {
                kind: ClassKind::Struct,
            },
            EntityKind::Class => Declaration::Class {
                kind: ClassKind::Class,
            },
            EntityKind::Type => Declaration::TypeAlias { is },
            EntityKind::Const | EntityKind::Var => {
                let ty = non_empty(self.ty)
                    .ok_or_else(|| missing_field(ctx, kind, &self.name, "type"))?;
                Declaration::Variable {
                    constant: kind == EntityKind::Const,
                    ty,
                    is,
                }
            }
            EntityKind::Concept => {
                let template = template
                    .take()
                    .ok_or_else(|| missing_field(ctx, kind, &self.name, "template"))?;
                Declaration::Concept { template, is }
            }
            EntityKind::Fn | EntityKind::Ctor => {
                let signatures: Vec<Signature> = self
                    .sigs
                    .unwrap_or_default()
                    .into_iter()
                    .map(RawSignature::into_signature)
                    .collect();
                if signatures.is_empty() {
                    return Err(ctx.source_context().validation_error(
                        format!(
                            "{kind} '{}' at '{}' needs at least one signature in 'sigs'",
                            self.name,
                            ctx.location()
                        ),
                        ctx.find_span("name", &self.name),
                    ));
                }
                Declaration::Function {
                    constructor: kind == EntityKind::Ctor,
                    signatures,
                    params: self.params.unwrap_or_default(),
                }
            }
        };

        Ok(Entity {
            body: self.body.into_body(ctx)?,
            name: self.name,
            ns: non_empty(self.ns),
            template,
            declaration,
        })
    }
}

impl RawSignature {
    fn into_signature(self) -> Signature {
        match self {
            RawSignature::Plain(sig) => Signature::plain(sig),
            RawSignature::Detailed {
                sig,
                template,
                desc,
            } => Signature {
                sig,
                template: non_empty(template),
                desc: non_empty(desc),
            },
        }
    }
}

fn missing_field(ctx: &ParseContext, kind: EntityKind, name: &str, field: &str) -> Box<Error> {
    ctx.source_context().validation_error(
        format!(
            "{kind} '{name}' at '{}' is missing required field '{field}'",
            ctx.location()
        ),
        ctx.find_span("name", name),
    )
}
