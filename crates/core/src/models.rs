//! Data models for breadcrumb trails
//!
//! This module defines the core data structures used throughout the breadcrumbs
//! library: crumbs and trails, the page kinds driving dispatch, and the content
//! records returned by the site collaborators.

use serde::{Deserialize, Serialize};

/// Identifier of a content item (post, page, attachment, product)
pub type PostId = u64;

/// Identifier of a taxonomy term
pub type TermId = u64;

/// Identifier of a user
pub type UserId = u64;

/// Default post type
pub const POST_TYPE_POST: &str = "post";

/// Commerce product post type
pub const POST_TYPE_PRODUCT: &str = "product";

/// Default hierarchical taxonomy for posts
pub const TAXONOMY_CATEGORY: &str = "category";

/// Commerce product category taxonomy
pub const TAXONOMY_PRODUCT_CAT: &str = "product_cat";

/// Classification of the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    NotFound,
    Attachment,
    Single,
    Page,
    PostTypeArchive,
    Category,
    Tag,
    Author,
    Date,
    TaxonomyTerm,
    CommerceCategory,
    CommerceTag,
    CommerceShop,
}

impl PageKind {
    /// Dispatch order for the core kinds
    pub const PRIORITY: [PageKind; 11] = [
        PageKind::Home,
        PageKind::NotFound,
        PageKind::Attachment,
        PageKind::Single,
        PageKind::Page,
        PageKind::PostTypeArchive,
        PageKind::Category,
        PageKind::Tag,
        PageKind::Author,
        PageKind::Date,
        PageKind::TaxonomyTerm,
    ];

    /// Kinds appended to the dispatch order when the commerce extension is present
    pub const COMMERCE_PRIORITY: [PageKind; 3] = [
        PageKind::CommerceCategory,
        PageKind::CommerceTag,
        PageKind::CommerceShop,
    ];

    /// Get human-readable label for the page kind
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::NotFound => "404",
            PageKind::Attachment => "attachment",
            PageKind::Single => "single",
            PageKind::Page => "page",
            PageKind::PostTypeArchive => "post type archive",
            PageKind::Category => "category",
            PageKind::Tag => "tag",
            PageKind::Author => "author",
            PageKind::Date => "date",
            PageKind::TaxonomyTerm => "taxonomy term",
            PageKind::CommerceCategory => "product category",
            PageKind::CommerceTag => "product tag",
            PageKind::CommerceShop => "shop",
        }
    }

    /// Check if this kind only exists with the commerce extension
    pub fn is_commerce(&self) -> bool {
        matches!(
            self,
            PageKind::CommerceCategory | PageKind::CommerceTag | PageKind::CommerceShop
        )
    }
}

/// A single (label, link) pair in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    /// Plain-text label
    pub label: String,

    /// Target link; empty for a terminal crumb
    #[serde(default)]
    pub link: String,
}

impl Crumb {
    /// Create a crumb from an already sanitized label
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: link.into(),
        }
    }

    /// Whether this crumb renders as a hyperlink
    pub fn is_linked(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A resolved breadcrumb trail with the page kind that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Page kind whose rule ran, if any matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PageKind>,

    /// Crumbs from root to leaf
    pub crumbs: Vec<Crumb>,
}

impl Breadcrumb {
    /// Get the formatted path string
    pub fn path(&self) -> String {
        self.crumbs
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Number of crumbs in the trail
    pub fn depth(&self) -> usize {
        self.crumbs.len()
    }

    /// Whether the trail should render at all
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Get the leaf crumb
    pub fn current(&self) -> Option<&Crumb> {
        self.crumbs.last()
    }
}

/// A trail resolved for a named page context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBreadcrumb {
    pub name: String,

    #[serde(flatten)]
    pub breadcrumb: Breadcrumb,
}

/// Summary statistics for a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Contexts processed
    pub total_contexts: usize,

    /// Contexts that produced no crumbs
    pub empty_trails: usize,

    /// Crumbs across all trails
    pub total_crumbs: usize,

    /// Deepest trail
    pub max_depth: usize,
}

/// Metadata about a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Duration of the run in milliseconds
    pub duration_ms: u64,

    /// Contexts processed per second
    pub contexts_per_second: f64,

    /// ISO timestamp of the run
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// Trails for many page contexts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub trails: Vec<NamedBreadcrumb>,
    pub stats: BatchStats,
    pub metadata: RunMetadata,
}

impl BatchReport {
    /// Build a report, computing statistics and run metadata
    pub fn new(trails: Vec<NamedBreadcrumb>, duration: std::time::Duration) -> Self {
        let total_contexts = trails.len();
        let stats = BatchStats {
            total_contexts,
            empty_trails: trails.iter().filter(|t| t.breadcrumb.is_empty()).count(),
            total_crumbs: trails.iter().map(|t| t.breadcrumb.depth()).sum(),
            max_depth: trails.iter().map(|t| t.breadcrumb.depth()).max().unwrap_or(0),
        };

        let metadata = RunMetadata {
            duration_ms: duration.as_millis() as u64,
            contexts_per_second: if duration.as_secs_f64() > 0.0 {
                total_contexts as f64 / duration.as_secs_f64()
            } else {
                total_contexts as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Self {
            trails,
            stats,
            metadata,
        }
    }
}

/// A content item as returned by the content store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: PostId,

    /// Parent item; `None` for top-level items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PostId>,

    #[serde(default = "default_post_type")]
    pub post_type: String,

    pub title: String,

    /// URL slug (`post_name`)
    #[serde(default)]
    pub slug: String,

    pub permalink: String,
}

fn default_post_type() -> String {
    POST_TYPE_POST.to_string()
}

/// A taxonomy term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub taxonomy: String,
    pub name: String,

    /// Parent term; `None` at the taxonomy root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TermId>,

    pub link: String,
}

impl Term {
    /// Parent id with the root encoded as 0, for ordering by parent
    pub fn parent_key(&self) -> TermId {
        self.parent.unwrap_or(0)
    }
}

/// Registered post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeObject {
    pub name: String,

    /// Plural label
    pub label: String,

    pub singular_label: String,

    #[serde(default)]
    pub has_archive: bool,

    /// Archive slug; defaults to the post type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_slug: Option<String>,
}

/// Registered taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyObject {
    pub name: String,

    /// Plural label
    pub label: String,
}

/// Site user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
}

/// Permalink settings of the commerce extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermalinkStructure {
    /// Base path of product permalinks, e.g. `/shop`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_base: Option<String>,
}

/// Granularity of a date archive view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateGranularity {
    Year,
    Month,
    Day,
}

/// The date of a date-archive view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateArchive {
    pub year: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,

    /// Only meaningful together with `month`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl DateArchive {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: None,
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// Finest granularity this archive describes
    pub fn granularity(&self) -> DateGranularity {
        match (self.month, self.day) {
            (Some(_), Some(_)) => DateGranularity::Day,
            (Some(_), None) => DateGranularity::Month,
            _ => DateGranularity::Year,
        }
    }
}

/// The object a view is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueriedObject {
    Post { id: PostId },
    Term { id: TermId, taxonomy: String },
    PostType { name: String },
    User { id: UserId },
}

impl QueriedObject {
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            QueriedObject::Post { id } => Some(*id),
            _ => None,
        }
    }

    pub fn term(&self) -> Option<(TermId, &str)> {
        match self {
            QueriedObject::Term { id, taxonomy } => Some((*id, taxonomy.as_str())),
            _ => None,
        }
    }

    pub fn post_type(&self) -> Option<&str> {
        match self {
            QueriedObject::PostType { name } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            QueriedObject::User { id } => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_path() {
        let breadcrumb = Breadcrumb {
            kind: Some(PageKind::Single),
            crumbs: vec![
                Crumb::new("Blog", "https://example.com/blog/"),
                Crumb::new("Hello World", ""),
            ],
        };

        assert_eq!(breadcrumb.path(), "Blog > Hello World");
        assert_eq!(breadcrumb.depth(), 2);
        assert!(!breadcrumb.current().unwrap().is_linked());
    }

    #[test]
    fn test_date_granularity() {
        assert_eq!(DateArchive::year(2024).granularity(), DateGranularity::Year);
        assert_eq!(DateArchive::month(2024, 3).granularity(), DateGranularity::Month);
        assert_eq!(DateArchive::day(2024, 3, 15).granularity(), DateGranularity::Day);
    }

    #[test]
    fn test_queried_object_serde_tag() {
        let object: QueriedObject =
            serde_json::from_str(r#"{"type":"term","id":7,"taxonomy":"category"}"#).unwrap();
        assert_eq!(object.term(), Some((7, "category")));
        assert_eq!(object.post_id(), None);
    }

    #[test]
    fn test_commerce_kinds_are_last() {
        assert!(PageKind::PRIORITY.iter().all(|k| !k.is_commerce()));
        assert!(PageKind::COMMERCE_PRIORITY.iter().all(|k| k.is_commerce()));
    }

    #[test]
    fn test_batch_report_stats() {
        let trails = vec![
            NamedBreadcrumb {
                name: "front".to_string(),
                breadcrumb: Breadcrumb::default(),
            },
            NamedBreadcrumb {
                name: "post".to_string(),
                breadcrumb: Breadcrumb {
                    kind: Some(PageKind::Single),
                    crumbs: vec![Crumb::new("News", "/news/"), Crumb::new("Hello", "/hello/")],
                },
            },
        ];

        let report = BatchReport::new(trails, std::time::Duration::from_millis(0));
        assert_eq!(report.stats.total_contexts, 2);
        assert_eq!(report.stats.empty_trails, 1);
        assert_eq!(report.stats.total_crumbs, 2);
        assert_eq!(report.stats.max_depth, 2);
        assert_eq!(report.metadata.contexts_per_second, 2.0);
    }
}
