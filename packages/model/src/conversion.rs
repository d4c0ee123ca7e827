//! DOM import contract.
//!
//! A node type registers matchers per tag name. A matcher inspects an element
//! and either declines (`None`) or offers a [`DomConversion`]; when several
//! matchers accept the same element the highest priority wins.

use crate::node::Node;
use std::collections::HashMap;
use std::fmt;
use vellum_markup::DomElement;

/// Turns an accepted element into a node
pub type DomConversionFn = fn(&DomElement) -> Option<DomConversionOutput>;

/// Decides whether a converter applies to an element
pub type DomMatcher = fn(&DomElement) -> Option<DomConversion>;

#[derive(Clone, Copy)]
pub struct DomConversion {
    pub conversion: DomConversionFn,
    pub priority: u8,
}

impl fmt::Debug for DomConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomConversion")
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Result of a conversion. `node: None` consumes the element without
/// producing a node; its children are still imported.
#[derive(Debug, Clone, PartialEq)]
pub struct DomConversionOutput {
    pub node: Option<Node>,
}

#[derive(Clone, Default)]
pub struct DomConversionMap {
    matchers: HashMap<String, Vec<DomMatcher>>,
}

impl fmt::Debug for DomConversionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .matchers
            .iter()
            .map(|(tag, matchers)| (tag.as_str(), matchers.len()))
            .collect();
        counts.sort();
        f.debug_struct("DomConversionMap").field("matchers", &counts).finish()
    }
}

impl DomConversionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: &str, matcher: DomMatcher) -> Self {
        self.insert(tag, matcher);
        self
    }

    pub fn insert(&mut self, tag: &str, matcher: DomMatcher) {
        self.matchers
            .entry(tag.to_ascii_lowercase())
            .or_default()
            .push(matcher);
    }

    /// Add every matcher of `other`
    pub fn merge(&mut self, other: DomConversionMap) {
        for (tag, matchers) in other.matchers {
            self.matchers.entry(tag).or_default().extend(matchers);
        }
    }

    pub fn matchers(&self, tag: &str) -> &[DomMatcher] {
        self.matchers
            .get(&tag.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest-priority conversion accepting `element`. Ties go to the
    /// matcher registered first.
    pub fn find_conversion(&self, element: &DomElement) -> Option<DomConversion> {
        let mut best: Option<DomConversion> = None;

        for matcher in self.matchers(&element.tag) {
            if let Some(candidate) = matcher(element) {
                if best.map_or(true, |current| candidate.priority > current.priority) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
