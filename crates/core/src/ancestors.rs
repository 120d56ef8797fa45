//! Ancestor walker
//!
//! Turns a node's containment chain into root-first crumbs, excluding the
//! node itself. Ancestors the store cannot resolve are skipped.

use crate::models::{Crumb, PostId, TermId};
use crate::store::ContentStore;
use std::collections::HashSet;

/// Containment relation to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment<'a> {
    /// Term parent links within a taxonomy
    Taxonomy(&'a str),
    /// Content item parent links
    ContentParent,
}

/// Walks ancestor chains through a content store
pub struct AncestorWalker<'a> {
    store: &'a dyn ContentStore,
    max_depth: usize,
}

impl<'a> AncestorWalker<'a> {
    pub fn new(store: &'a dyn ContentStore, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Ancestor crumbs of `id`, topmost ancestor first
    pub fn walk(&self, id: u64, containment: Containment<'_>) -> Vec<Crumb> {
        match containment {
            Containment::Taxonomy(taxonomy) => self.term_ancestors(id, taxonomy),
            Containment::ContentParent => self.page_ancestors(id),
        }
    }

    fn term_ancestors(&self, term_id: TermId, taxonomy: &str) -> Vec<Crumb> {
        let mut ancestors = self.store.term_ancestors(term_id, taxonomy);
        ancestors.reverse();

        ancestors
            .into_iter()
            .filter_map(|ancestor| match self.store.term(ancestor, taxonomy) {
                Some(term) => Some(Crumb::new(term.name, term.link)),
                None => {
                    tracing::debug!(term_id = ancestor, taxonomy, "ancestor term not found, skipping");
                    None
                }
            })
            .collect()
    }

    /// Follows parent links one item at a time; stops at a missing parent, a
    /// revisited id, or `max_depth`.
    fn page_ancestors(&self, post_id: PostId) -> Vec<Crumb> {
        let mut crumbs = Vec::new();
        let mut seen = HashSet::from([post_id]);

        let mut parent_id = self.store.content_item(post_id).and_then(|item| item.parent_id);

        while let Some(id) = parent_id {
            if crumbs.len() >= self.max_depth {
                tracing::debug!(post_id, max_depth = self.max_depth, "parent chain truncated");
                break;
            }
            if !seen.insert(id) {
                tracing::debug!(post_id, parent_id = id, "parent cycle detected");
                break;
            }

            let Some(parent) = self.store.content_item(id) else {
                tracing::debug!(post_id, parent_id = id, "parent item not found, stopping walk");
                break;
            };

            parent_id = parent.parent_id;
            crumbs.push(Crumb::new(parent.title, parent.permalink));
        }

        crumbs.reverse();
        crumbs
    }
}
