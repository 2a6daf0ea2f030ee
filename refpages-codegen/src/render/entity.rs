//! Declaration blocks for each entity kind.

use std::path::Path;

use indexmap::IndexMap;
use refpages_core::{Scope, split_lines};
use refpages_manifest::{Declaration, Entity, Signature};

use super::{NamespaceDirective, PageRenderer, Rendered};
use crate::builder::{CodeFragment, Renderable};

impl PageRenderer<'_> {
    /// Render an entity's declaration and documentation body.
    ///
    /// An explicit `ns` on the entity replaces the enclosing scope.
    pub(super) fn render_entity(&self, entity: &Entity, scope: &Scope, dir: &Path) -> Rendered {
        let scope = match &entity.ns {
            Some(ns) => scope.with_namespace(ns),
            None => scope.clone(),
        };
        let template = template_prefix(entity.template.as_deref());
        let name = &entity.name;

        let mut out = Rendered::default();
        out.emit(&NamespaceDirective::new(&scope));

        match &entity.declaration {
            Declaration::Class { kind } => {
                out.push(CodeFragment::line(format!(
                    ".. {}:: {template}{name}",
                    kind.as_str()
                )));
                out.blank();
                let inner = scope.enter(name, entity.template.as_deref());
                out.append_indented(self.render_page(&entity.body, None, &inner, dir));
                out.blank();
            }
            Declaration::TypeAlias { is } => {
                out.push(CodeFragment::line(format!(
                    ".. type:: {template}{name}{}",
                    assignment(is.as_deref())
                )));
                self.render_plain_body(&mut out, entity, &scope, dir);
            }
            Declaration::Variable { ty, is, .. } => {
                out.push(CodeFragment::line(format!(
                    ".. var:: {template}{ty} {name}{}",
                    assignment(is.as_deref())
                )));
                self.render_plain_body(&mut out, entity, &scope, dir);
            }
            Declaration::Concept { template, is } => {
                out.push(CodeFragment::line(format!(
                    ".. concept:: template {template} {name}{}",
                    assignment(is.as_deref())
                )));
                self.render_plain_body(&mut out, entity, &scope, dir);
            }
            Declaration::Function {
                signatures, params, ..
            } => {
                out.emit(&FunctionDeclaration::new(
                    signatures,
                    entity.template.as_deref(),
                ));
                out.blank();

                let mut body = Rendered::default();
                body.emit(&OverloadDescriptions::new(signatures));
                body.blank();
                body.emit(&ParamList::new(params));
                body.blank();
                body.append(self.render_page(&entity.body, None, &scope, dir));
                body.blank();
                out.append_indented(body);
            }
        }
        out
    }

    /// A blank line, the body indented in the unchanged scope, a blank line.
    fn render_plain_body(&self, out: &mut Rendered, entity: &Entity, scope: &Scope, dir: &Path) {
        out.blank();
        out.append_indented(self.render_page(&entity.body, None, scope, dir));
        out.blank();
    }
}

fn template_prefix(template: Option<&str>) -> String {
    template
        .map(|template| format!("template {template} "))
        .unwrap_or_default()
}

fn assignment(is: Option<&str>) -> String {
    is.map(|is| format!(" = {is}")).unwrap_or_default()
}

/// The `.. function::` directive listing every overload.
///
/// Overloads are numbered `[[#n]]` when there is more than one. A signature
/// without its own template uses the entity's template, if any.
#[derive(Debug, Clone)]
pub struct FunctionDeclaration<'a> {
    signatures: &'a [Signature],
    template: Option<&'a str>,
}

impl<'a> FunctionDeclaration<'a> {
    pub fn new(signatures: &'a [Signature], template: Option<&'a str>) -> Self {
        Self {
            signatures,
            template,
        }
    }

    fn overload_line(&self, index: usize, signature: &Signature) -> String {
        let template = signature
            .template
            .as_deref()
            .or(self.template)
            .map(|template| format!("template {template}"));
        let marker = (self.signatures.len() > 1).then(|| format!("[[#{}]]", index + 1));

        [template, marker, Some(signature.sig.trim().to_string())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Renderable for FunctionDeclaration<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let overloads = self
            .signatures
            .iter()
            .enumerate()
            .map(|(index, signature)| CodeFragment::line(self.overload_line(index, signature)))
            .collect();
        vec![
            CodeFragment::line(".. function::"),
            CodeFragment::indent(vec![CodeFragment::indent(overloads)]),
        ]
    }
}

/// Numbered descriptions of the overloads that carry one.
///
/// Numbers follow the overload's position among all signatures, and
/// continuation lines are aligned under the text.
#[derive(Debug, Clone)]
pub struct OverloadDescriptions<'a> {
    signatures: &'a [Signature],
}

impl<'a> OverloadDescriptions<'a> {
    pub fn new(signatures: &'a [Signature]) -> Self {
        Self { signatures }
    }
}

impl Renderable for OverloadDescriptions<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        for (index, signature) in self.signatures.iter().enumerate() {
            let Some(desc) = &signature.desc else {
                continue;
            };
            let marker = format!("{}. ", index + 1);
            let hanging = " ".repeat(marker.len());
            for (line_no, line) in split_lines(desc).into_iter().enumerate() {
                fragments.push(if line_no == 0 {
                    CodeFragment::line(format!("{marker}{line}"))
                } else if line.is_empty() {
                    CodeFragment::Blank
                } else {
                    CodeFragment::line(format!("{hanging}{line}"))
                });
            }
        }
        fragments
    }
}

/// One `:param name:` field per parameter, in document order.
#[derive(Debug, Clone)]
pub struct ParamList<'a> {
    params: &'a IndexMap<String, String>,
}

impl<'a> ParamList<'a> {
    pub fn new(params: &'a IndexMap<String, String>) -> Self {
        Self { params }
    }
}

impl Renderable for ParamList<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.params
            .iter()
            .flat_map(|(name, desc)| {
                [
                    CodeFragment::line(format!(":param {name}:")),
                    CodeFragment::indent(vec![CodeFragment::text(desc)]),
                ]
            })
            .collect()
    }
}
