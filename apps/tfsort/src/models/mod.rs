//! Shared data models: container children, ordering policy, and lint output.

pub mod element;
pub mod policy;

pub use element::{Element, ElementKind, Elements, SortKey};
pub use policy::{Category, OrderPolicy};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One line of a violation report.
pub struct ExpectedEntry {
    pub name: String,
    /// True when the actual sequence holds a different name at this index.
    pub out_of_order: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A container whose children are not in canonical order.
pub struct Violation {
    pub file: String,
    pub line: usize,
    pub kind: String,
    pub label: String,
    pub expected: Vec<ExpectedEntry>,
}

impl Violation {
    pub fn out_of_order_names(&self) -> impl Iterator<Item = &str> {
        self.expected
            .iter()
            .filter(|e| e.out_of_order)
            .map(|e| e.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counts for one run.
pub struct Summary {
    pub files: usize,
    pub containers: usize,
    pub violations: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub violations: Vec<Violation>,
    pub summary: Summary,
    /// Run-wide verdict, folded with `&&` over every container checked.
    pub sorted: bool,
}

impl LintResult {
    /// Files containing at least one violation.
    pub fn files_with_violations(&self) -> usize {
        let mut files: Vec<&str> = self.violations.iter().map(|v| v.file.as_str()).collect();
        files.dedup();
        files.len()
    }
}
