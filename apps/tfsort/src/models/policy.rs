//! Ordering policy: which names are special and how elements are bucketed.
//!
//! Expected order inside a container is the concatenation of four
//! categories, each alphabetized on its own:
//! - special attributes (`count`, `source`, ... pulled to the front)
//! - ordinary attributes
//! - ordinary nested blocks
//! - special blocks (wiring such as `providers` kept at the end)

use super::element::{Element, ElementKind};
use std::collections::BTreeSet;

/// Special names applied to block bodies and object literals by default.
pub const DEFAULT_SPECIAL: [&str; 5] = ["count", "source", "providers", "lifecycle", "for_each"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Ordering bucket of an element. Variant order is the output order.
pub enum Category {
    SpecialAttribute,
    Attribute,
    Block,
    SpecialBlock,
}

impl Category {
    pub const ORDER: [Category; 4] = [
        Category::SpecialAttribute,
        Category::Attribute,
        Category::Block,
        Category::SpecialBlock,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reserved-word set deciding which names are ordering-privileged.
pub struct OrderPolicy {
    special: BTreeSet<String>,
}

impl Default for OrderPolicy {
    fn default() -> Self {
        OrderPolicy::from_names(DEFAULT_SPECIAL)
    }
}

impl OrderPolicy {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OrderPolicy {
            special: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy without special names, used for top-level declaration lists.
    pub fn plain() -> Self {
        OrderPolicy {
            special: BTreeSet::new(),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn is_special(&self, name: &str) -> bool {
        self.special.contains(name)
    }

    pub fn classify(&self, element: &Element) -> Category {
        match (element.kind, self.is_special(&element.name)) {
            (ElementKind::Value, true) => Category::SpecialAttribute,
            (ElementKind::Value, false) => Category::Attribute,
            (ElementKind::Container, false) => Category::Block,
            (ElementKind::Container, true) => Category::SpecialBlock,
        }
    }

    pub fn special_names(&self) -> impl Iterator<Item = &str> {
        self.special.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_covers_all_four_categories() {
        let policy = OrderPolicy::default();
        assert_eq!(
            policy.classify(&Element::value("count", 1)),
            Category::SpecialAttribute
        );
        assert_eq!(
            policy.classify(&Element::value("ami", 1)),
            Category::Attribute
        );
        assert_eq!(
            policy.classify(&Element::container("ebs_block_device", 1)),
            Category::Block
        );
        assert_eq!(
            policy.classify(&Element::container("lifecycle", 1)),
            Category::SpecialBlock
        );
    }

    #[test]
    fn test_special_match_is_exact() {
        let policy = OrderPolicy::default();
        assert!(policy.is_special("for_each"));
        assert!(!policy.is_special("Count"));
        assert!(!policy.is_special("metadata"));
        assert!(!policy.is_special("provider"));
    }

    #[test]
    fn test_custom_and_plain_policies() {
        let with_metadata = OrderPolicy::from_names(["count", "metadata"]);
        assert!(with_metadata.is_special("metadata"));
        assert!(!with_metadata.is_special("source"));

        let plain = OrderPolicy::plain();
        assert_eq!(
            plain.classify(&Element::container("count", 1)),
            Category::Block
        );
        assert_eq!(plain.special_names().count(), 0);
    }

    #[test]
    fn test_category_order_matches_variant_order() {
        let mut sorted = Category::ORDER;
        sorted.sort();
        assert_eq!(sorted, Category::ORDER);
    }
}
