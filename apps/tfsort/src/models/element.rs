//! Children of a container and the collection used to reorder them.
//!
//! `Elements` never sorts in place: `sort_by_name` and `sort_by_line` hand
//! back a fresh collection so the actual and expected views of one
//! container cannot disturb each other.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether a child is a plain value or block-like.
pub enum ElementKind {
    Value,
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single named child of a container.
pub struct Element {
    pub name: String,
    /// 1-based source line.
    pub line: usize,
    pub kind: ElementKind,
}

impl Element {
    pub fn new(name: impl Into<String>, line: usize, kind: ElementKind) -> Self {
        Element {
            name: name.into(),
            line,
            kind,
        }
    }

    pub fn value(name: impl Into<String>, line: usize) -> Self {
        Element::new(name, line, ElementKind::Value)
    }

    pub fn container(name: impl Into<String>, line: usize) -> Self {
        Element::new(name, line, ElementKind::Container)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Total orders supported by `Elements::sorted_by`.
pub enum SortKey {
    /// Case-insensitive name.
    Name,
    /// Ascending source line.
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered group of elements, in discovery order until sorted.
pub struct Elements {
    items: Vec<Element>,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.items.push(element);
    }

    /// Return a sorted copy; `self` is left untouched.
    ///
    /// Sorting is stable, so ties keep their current relative order.
    pub fn sorted_by(&self, key: SortKey) -> Elements {
        let mut items = self.items.clone();
        match key {
            SortKey::Name => items.sort_by_cached_key(|e| e.name.to_lowercase()),
            SortKey::Line => items.sort_by_key(|e| e.line),
        }
        Elements { items }
    }

    pub fn sort_by_name(&self) -> Elements {
        self.sorted_by(SortKey::Name)
    }

    pub fn sort_by_line(&self) -> Elements {
        self.sorted_by(SortKey::Line)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Element> for Elements {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Elements {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Element> for Elements {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Elements {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Elements {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
