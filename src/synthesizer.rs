//! Unique CSS selector synthesis
//!
//! For a target element the synthesizer prefers `#id` when the id is non-empty
//! and unique in the document. Otherwise it walks up the ancestor chain, one
//! segment per element (`tag` plus `:nth-child(n)` when a sibling shares the
//! tag), until it reaches an ancestor with a unique id or runs out of elements.
//! Segments are joined outermost first with `" > "`.
//!
//! ```
//! use cssprobe::{DomArena, SelectorSynthesizer};
//!
//! let mut dom = DomArena::new();
//! let panel = dom.append_element(dom.document(), "section", Some("panel")).unwrap();
//! dom.append_element(panel, "p", None).unwrap();
//! let second = dom.append_element(panel, "p", None).unwrap();
//!
//! let synthesizer = SelectorSynthesizer::new(&dom, &dom);
//! assert_eq!(synthesizer.synthesize(second).unwrap(), "#panel > p:nth-child(2)");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::dom::{DomTree, ElementView, SelectorCounter, SelectorResolver};
use crate::escape::{escape_identifier, escape_tag_name};

const SEPARATOR: &str = " > ";

/// Errors raised for targets that break the input contract
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The target handle does not point at an element
    #[error("Cannot build a selector for a {kind} node{}", batch_suffix(.position))]
    NotAnElement {
        kind: &'static str,
        /// Position in a batch, if the target came from one
        position: Option<usize>,
    },
}

fn batch_suffix(position: &Option<usize>) -> String {
    position
        .map(|i| format!(" (target {} of the batch)", i + 1))
        .unwrap_or_default()
}

/// One target element or an ordered batch of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets<H> {
    One(H),
    Many(Vec<H>),
}

/// Selector(s) aligned with the [`Targets`] they were built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorOutput {
    One(String),
    Many(Vec<String>),
}

/// Builds selectors against one document
pub struct SelectorSynthesizer<'a, T: DomTree, C: SelectorCounter + ?Sized> {
    tree: &'a T,
    counter: &'a C,
}

impl<'a, T: DomTree, C: SelectorCounter + ?Sized> SelectorSynthesizer<'a, T, C> {
    pub fn new(tree: &'a T, counter: &'a C) -> Self {
        SelectorSynthesizer { tree, counter }
    }

    /// Build the selector for a single element
    pub fn synthesize(&self, target: T::Handle) -> Result<String, SelectorError> {
        self.synthesize_at(target, None)
    }

    /// Build one selector per element, in input order
    pub fn synthesize_all(&self, targets: &[T::Handle]) -> Result<Vec<String>, SelectorError> {
        targets
            .iter()
            .enumerate()
            .map(|(i, &target)| self.synthesize_at(target, Some(i)))
            .collect()
    }

    pub fn synthesize_targets(
        &self,
        targets: &Targets<T::Handle>,
    ) -> Result<SelectorOutput, SelectorError> {
        match targets {
            Targets::One(target) => self.synthesize(*target).map(SelectorOutput::One),
            Targets::Many(batch) => self.synthesize_all(batch).map(SelectorOutput::Many),
        }
    }

    fn synthesize_at(
        &self,
        target: T::Handle,
        position: Option<usize>,
    ) -> Result<String, SelectorError> {
        let node = self.tree.node(target);
        if node.as_element().is_none() {
            return Err(SelectorError::NotAnElement {
                kind: node.kind(),
                position,
            });
        }

        let mut segments = Vec::new();
        let mut current = Some(target);

        while let Some(handle) = current {
            let Some(element) = self.tree.node(handle).as_element() else {
                break;
            };

            if let Some(id) = self.unique_id(handle, &element) {
                trace!("{:?} has unique id, stopping walk", handle);
                segments.push(format!("#{}", id));
                break;
            }

            let segment = self.positional_segment(handle, &element);
            trace!("{:?} -> {}", handle, segment);
            segments.push(segment);
            current = self.tree.parent(handle);
        }

        segments.reverse();
        Ok(segments.join(SEPARATOR))
    }

    /// The escaped id, if it addresses exactly this one element
    fn unique_id(&self, handle: T::Handle, element: &ElementView<'_>) -> Option<String> {
        let id = element.non_empty_id()?;

        // Lookups against a detached subtree would answer for the wrong tree
        if !self.tree.is_connected(handle) {
            return None;
        }

        let escaped = escape_identifier(id);
        match self.counter.count_matching(&format!("#{}", escaped)) {
            1 => Some(escaped),
            _ => None,
        }
    }

    fn positional_segment(&self, handle: T::Handle, element: &ElementView<'_>) -> String {
        let tag = element.tag.to_lowercase();
        let mut segment = escape_tag_name(&tag);

        let Some(parent) = self.tree.parent(handle) else {
            return segment;
        };

        let siblings = self.tree.element_children(parent);
        let shares_tag = siblings.iter().any(|&sibling| {
            sibling != handle
                && self
                    .tree
                    .node(sibling)
                    .as_element()
                    .is_some_and(|s| s.tag.eq_ignore_ascii_case(&tag))
        });

        if shares_tag && let Some(index) = siblings.iter().position(|&s| s == handle) {
            segment.push_str(&format!(":nth-child({})", index + 1));
        }

        segment
    }
}

impl<'a, T: SelectorResolver, C: SelectorCounter + ?Sized> SelectorSynthesizer<'a, T, C> {
    /// Check that `selector` addresses `target` and nothing else
    pub fn verify(&self, selector: &str, target: T::Handle) -> bool {
        match self.tree.select_all(selector) {
            Ok(matches) => matches.len() == 1 && matches[0] == target,
            Err(e) => {
                trace!("Selector '{}' failed to resolve: {}", selector, e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "synthesizer_test.rs"]
mod synthesizer_test;
