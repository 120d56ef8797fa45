//! Page context
//!
//! Read-only description of the view being rendered, supplied fresh for
//! every trail generation by the host's query-state resolver.

use crate::models::{DateArchive, PageKind, PostId, QueriedObject};
use serde::{Deserialize, Serialize};

/// A search-results view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchContext {
    /// The search terms as entered
    pub query: String,

    /// Current URL with the pagination parameter removed
    pub url: String,
}

/// What page is being viewed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Page-kind predicates that hold for this view
    #[serde(default)]
    pub kinds: Vec<PageKind>,

    /// Whether this is the site front page
    #[serde(default)]
    pub front_page: bool,

    /// Pagination variable; 0 when the view is not paginated
    #[serde(default)]
    pub paged: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queried_object: Option<QueriedObject>,

    /// The content item in context (single, page and attachment views)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<PostId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateArchive>,

    /// Commerce endpoint (account sub-view) of the current URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Raw `action` request parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl PageContext {
    /// Create a context for a single page kind
    pub fn new(kind: PageKind) -> Self {
        Self {
            kinds: vec![kind],
            ..Default::default()
        }
    }

    /// Evaluate a page-kind predicate
    pub fn is(&self, kind: PageKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_paged(&self) -> bool {
        self.paged > 0
    }

    pub fn is_search(&self) -> bool {
        self.search.is_some()
    }

    /// Add another true predicate (builder pattern)
    pub fn with_kind(mut self, kind: PageKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// Mark as the site front page (builder pattern)
    pub fn with_front_page(mut self, front_page: bool) -> Self {
        self.front_page = front_page;
        self
    }

    /// Set the pagination variable (builder pattern)
    pub fn with_paged(mut self, paged: u32) -> Self {
        self.paged = paged;
        self
    }

    /// Set search query and paging-free URL (builder pattern)
    pub fn with_search(mut self, query: impl Into<String>, url: impl Into<String>) -> Self {
        self.search = Some(SearchContext {
            query: query.into(),
            url: url.into(),
        });
        self
    }

    /// Set the queried object (builder pattern)
    pub fn with_queried_object(mut self, object: QueriedObject) -> Self {
        self.queried_object = Some(object);
        self
    }

    /// Set the content item in context (builder pattern)
    pub fn with_post(mut self, id: PostId) -> Self {
        self.post = Some(id);
        self
    }

    /// Set the date archive (builder pattern)
    pub fn with_date(mut self, date: DateArchive) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the commerce endpoint and its action parameter (builder pattern)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>, action: Option<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self.action = action;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = PageContext::new(PageKind::Home)
            .with_kind(PageKind::Home)
            .with_front_page(true)
            .with_paged(2);

        assert_eq!(ctx.kinds, vec![PageKind::Home]);
        assert!(ctx.front_page);
        assert!(ctx.is_paged());
        assert!(!ctx.is_search());
    }

    #[test]
    fn test_context_from_yaml() {
        let yaml = r#"
kinds: [single]
post: 42
search:
  query: widget
  url: https://example.com/?s=widget
"#;
        let ctx: PageContext = serde_yaml::from_str(yaml).unwrap();
        assert!(ctx.is(PageKind::Single));
        assert!(!ctx.is(PageKind::Page));
        assert_eq!(ctx.post, Some(42));
        assert_eq!(ctx.paged, 0);
        assert_eq!(ctx.search.unwrap().query, "widget");
    }
}
