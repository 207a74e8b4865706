//! Tag-tree resolution.
//!
//! A tag tree such as `feature>story>label>tag` lists the allure decorators a
//! definition must carry. Resolution removes every tag that one of the
//! definition's recognized markers provides and returns what is left, in
//! tag-tree order. The relative order of the decorators on the definition is
//! not checked.
use tracing::trace;

use crate::syntax::{Decorated, Marker};

/// Decorators outside this namespace are ignored.
pub const RECOGNIZED_NAMESPACE: &str = "allure";

pub const TAG_SEPARATOR: char = '>';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTree {
    tags: Vec<String>,
}

impl TagTree {
    /// Returns `None` for an empty tag tree, which means nothing is required.
    pub fn parse(tag_tree: &str) -> Option<Self> {
        if tag_tree.is_empty() {
            return None;
        }
        let tags = tag_tree.split(TAG_SEPARATOR).map(str::to_string).collect();
        Some(Self { tags })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }
}

pub fn is_recognized(marker: &Marker) -> bool {
    marker.is_call && marker.namespace == RECOGNIZED_NAMESPACE
}

/// Returns the tags of `tag_tree` that `node` is missing, or `None` when nothing
/// is missing or nothing is required.
///
/// Outside strict mode a node without any recognized marker is accepted.
pub fn resolve<N: Decorated + ?Sized>(
    node: &N,
    tag_tree: Option<&str>,
    strict: bool,
) -> Option<Vec<String>> {
    let mut remaining = TagTree::parse(tag_tree?)?.into_tags();

    let recognized: Vec<&Marker> = node.markers().iter().filter(|m| is_recognized(m)).collect();
    if recognized.is_empty() && !strict {
        return None;
    }

    for marker in recognized {
        if let Some(index) = remaining.iter().position(|tag| *tag == marker.method) {
            remaining.remove(index);
        }
    }

    trace!(missing = remaining.len(), "resolved tag tree");
    if remaining.is_empty() {
        None
    } else {
        Some(remaining)
    }
}
