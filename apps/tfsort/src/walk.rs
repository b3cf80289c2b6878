//! Extraction of containers from a parsed HCL document.
//!
//! Every block body and every object literal becomes its own container.
//! Top-level blocks of the tracked declaration types (`variable` by
//! default) are gathered per type into one synthetic container that is
//! checked after the rest of the document.

use crate::container::{Container, ContainerKind};
use crate::error::{Error, Result};
use crate::models::{Element, ElementKind, OrderPolicy, Violation};
use hcl_edit::expr::{Expression, Object, ObjectKey};
use hcl_edit::structure::{Attribute, Block, BlockLabel, Body, Structure};
use hcl_edit::template::Element as TemplateElement;
use hcl_edit::visit::{visit_block, visit_object, Visit};
use hcl_edit::Span;
use std::ops::Range;
use std::path::Path;

/// Maps byte offsets to 1-based line numbers.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(src.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex { starts }
    }

    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }

    /// True when the first and last byte of `range` sit on different lines.
    pub fn spans_lines(&self, range: &Range<usize>) -> bool {
        range.end > range.start && self.line(range.start) != self.line(range.end - 1)
    }
}

#[derive(Debug, Clone)]
/// Policies applied while walking a document.
pub struct Rules {
    /// Used for block bodies and object literals.
    pub body: OrderPolicy,
    /// Used for the aggregated top-level declaration lists.
    pub declarations: OrderPolicy,
    /// Top-level block types aggregated into declaration containers.
    pub declaration_types: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            body: OrderPolicy::default(),
            declarations: OrderPolicy::plain(),
            declaration_types: vec!["variable".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
/// Result of walking one document.
pub struct DocumentOutcome {
    pub sorted: bool,
    pub containers: usize,
    pub violations: Vec<Violation>,
}

/// Parse `src` and check every container in it.
///
/// `on_violation` is called as soon as an out-of-order container is found,
/// before the rest of the document is walked.
pub fn lint_document<F>(
    path: &Path,
    src: &str,
    rules: &Rules,
    on_violation: F,
) -> Result<DocumentOutcome>
where
    F: FnMut(&Violation),
{
    let body = hcl_edit::parser::parse_body(src).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = LineIndex::new(src);
    let mut walker = DocumentWalker {
        path,
        lines: &lines,
        rules,
        on_violation,
        outcome: DocumentOutcome {
            sorted: true,
            containers: 0,
            violations: Vec::new(),
        },
    };
    walker.visit_body(&body);
    for container in walker.declaration_containers(&body) {
        walker.check(&container, &rules.declarations);
    }
    Ok(walker.outcome)
}

struct DocumentWalker<'a, F> {
    path: &'a Path,
    lines: &'a LineIndex,
    rules: &'a Rules,
    on_violation: F,
    outcome: DocumentOutcome,
}

impl<F: FnMut(&Violation)> DocumentWalker<'_, F> {
    fn check(&mut self, container: &Container, policy: &OrderPolicy) {
        self.outcome.containers += 1;
        let sorted = match container.validate(policy) {
            Ok(()) => true,
            Err(violation) => {
                (self.on_violation)(&violation);
                self.outcome.violations.push(violation);
                false
            }
        };
        self.outcome.sorted = self.outcome.sorted && sorted;
    }

    fn line_of(&self, span: Option<Range<usize>>) -> usize {
        span.map(|r| self.lines.line(r.start)).unwrap_or(0)
    }

    fn block_container(&self, block: &Block) -> Container {
        let mut label = block.ident.as_str().to_string();
        if let Some(last) = block.labels.last() {
            label.push(' ');
            label.push_str(label_text(last));
        }
        let mut container = Container::new(
            ContainerKind::Block,
            label,
            self.line_of(block.ident.span()),
            self.path,
        );
        for structure in block.body.iter() {
            match structure {
                Structure::Attribute(attr) => container.push(self.attribute_element(attr)),
                Structure::Block(nested) => container.push(Element::container(
                    nested.ident.as_str(),
                    self.line_of(nested.ident.span()),
                )),
            }
        }
        container
    }

    // A multi-line attribute sorts with the nested blocks.
    fn attribute_element(&self, attr: &Attribute) -> Element {
        let range = match (attr.key.span(), attr.value.span()) {
            (Some(key), Some(value)) => Some(key.start..value.end),
            _ => attr.span(),
        };
        let kind = if range.as_ref().is_some_and(|r| self.lines.spans_lines(r)) {
            ElementKind::Container
        } else {
            ElementKind::Value
        };
        Element::new(attr.key.as_str(), self.line_of(attr.key.span()), kind)
    }

    fn object_container(&self, object: &Object) -> Container {
        let mut container = Container::new(
            ContainerKind::Expression,
            "",
            self.line_of(object.span()),
            self.path,
        );
        for (key, value) in object.iter() {
            // quoted and computed keys are not named children
            let ObjectKey::Ident(ident) = key else {
                continue;
            };
            let expr = value.expr();
            let kind = if is_string_like(expr)
                && expr.span().is_some_and(|r| self.lines.spans_lines(&r))
            {
                ElementKind::Container
            } else {
                ElementKind::Value
            };
            container.push(Element::new(
                ident.as_str(),
                self.line_of(ident.span()),
                kind,
            ));
        }
        container
    }

    fn declaration_containers(&self, body: &Body) -> Vec<Container> {
        let mut containers = Vec::new();
        for block_type in &self.rules.declaration_types {
            let mut container = Container::new(
                ContainerKind::Declarations(block_type.clone()),
                "",
                1,
                self.path,
            );
            for structure in body.iter() {
                let Structure::Block(block) = structure else {
                    continue;
                };
                if block.ident.as_str() != block_type {
                    continue;
                }
                if let Some(first) = block.labels.first() {
                    container.push(Element::container(
                        label_text(first),
                        self.line_of(block.ident.span()),
                    ));
                }
            }
            if !container.children.is_empty() {
                containers.push(container);
            }
        }
        containers
    }
}

impl<F: FnMut(&Violation)> Visit for DocumentWalker<'_, F> {
    fn visit_block(&mut self, node: &Block) {
        let rules = self.rules;
        let container = self.block_container(node);
        self.check(&container, &rules.body);
        visit_block(self, node);
    }

    fn visit_object(&mut self, node: &Object) {
        let rules = self.rules;
        let container = self.object_container(node);
        self.check(&container, &rules.body);
        visit_object(self, node);
    }
}

fn label_text(label: &BlockLabel) -> &str {
    match label {
        BlockLabel::Ident(ident) => ident.as_str(),
        BlockLabel::String(s) => s.as_str(),
    }
}

// `"${expr}"` alone is a wrapped expression, not string text.
fn is_string_like(expr: &Expression) -> bool {
    match expr {
        Expression::String(_) | Expression::HeredocTemplate(_) => true,
        Expression::StringTemplate(template) => {
            let mut elements = template.iter();
            !matches!(
                (elements.next(), elements.next()),
                (Some(TemplateElement::Interpolation(_)), None)
            )
        }
        _ => false,
    }
}
