//! Order validation for a single container.
//!
//! A container is anything with an ordered list of named children: a block
//! body, an object literal, or the synthetic list of top-level declarations
//! of one block type. Its expected order is derived from the children by
//! `OrderPolicy`; actual order is the children sorted by source line.

use crate::models::{Category, Element, Elements, ExpectedEntry, OrderPolicy, Violation};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    Block,
    Expression,
    /// All top-level blocks of the named type in one document.
    Declarations(String),
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Block => f.write_str("Block"),
            ContainerKind::Expression => f.write_str("Expression"),
            ContainerKind::Declarations(block_type) => f.write_str(block_type),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    pub kind: ContainerKind,
    /// Diagnostic label, may be empty.
    pub label: String,
    pub line: usize,
    pub file: PathBuf,
    pub children: Elements,
}

impl Container {
    pub fn new(kind: ContainerKind, label: impl Into<String>, line: usize, file: &Path) -> Self {
        Container {
            kind,
            label: label.into(),
            line,
            file: file.to_path_buf(),
            children: Elements::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Children in source order.
    pub fn actual(&self) -> Elements {
        self.children.sort_by_line()
    }

    /// Children in canonical order under `policy`.
    pub fn expected(&self, policy: &OrderPolicy) -> Elements {
        let by_line = self.children.sort_by_line();
        let mut buckets: [Elements; 4] = Default::default();
        for element in by_line {
            let category = policy.classify(&element);
            buckets[category as usize].push(element);
        }

        let mut expected = Elements::new();
        for category in Category::ORDER {
            expected.extend(buckets[category as usize].sort_by_name());
        }
        expected
    }

    pub fn is_sorted(&self, policy: &OrderPolicy) -> bool {
        let actual = self.actual();
        let expected = self.expected(policy);
        actual
            .iter()
            .zip(expected.iter())
            .all(|(a, e)| a.name == e.name)
    }

    /// Build the report for this container, pairing each expected name with
    /// whether it sits at a different index in the source.
    pub fn report(&self, policy: &OrderPolicy) -> Violation {
        let actual = self.actual();
        let expected = self
            .expected(policy)
            .into_iter()
            .zip(actual.iter())
            .map(|(e, a)| ExpectedEntry {
                out_of_order: e.name != a.name,
                name: e.name,
            })
            .collect();
        Violation {
            file: self.file.to_string_lossy().to_string(),
            line: self.line,
            kind: self.kind.to_string(),
            label: self.label.clone(),
            expected,
        }
    }

    /// Verdict plus the report when the container is out of order.
    pub fn validate(&self, policy: &OrderPolicy) -> Result<(), Violation> {
        if self.is_sorted(policy) {
            tracing::debug!(
                file = %self.file.display(),
                line = self.line,
                kind = %self.kind,
                "container sorted"
            );
            Ok(())
        } else {
            let violation = self.report(policy);
            tracing::debug!(
                file = %self.file.display(),
                line = self.line,
                kind = %self.kind,
                misplaced = ?violation.out_of_order_names().collect::<Vec<_>>(),
                "container out of order"
            );
            Err(violation)
        }
    }
}
