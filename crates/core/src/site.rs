//! In-memory site snapshot
//!
//! A serializable copy of the content a trail generation can look up. It
//! implements [`ContentStore`] and, through its optional `commerce` section,
//! [`CommerceExtension`]; the CLI and the tests use it as the collaborator.

use crate::models::{
    ContentItem, PermalinkStructure, PostId, PostTypeObject, TaxonomyObject, Term, TermId, User,
    UserId, POST_TYPE_POST,
};
use crate::store::{CommerceExtension, ContentStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Site snapshot errors
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u64 },
}

/// Site-wide options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
    pub blog_name: String,

    /// Home URL, used for date and post type archive links
    pub home_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_on_front: Option<PostId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_for_posts: Option<PostId>,
}

/// A content item with its term assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(flatten)]
    pub item: ContentItem,

    /// Assigned term ids keyed by taxonomy, in assignment order
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub terms: BTreeMap<String, Vec<TermId>>,
}

/// Endpoint display titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointTitle {
    pub title: String,

    /// Titles overriding `title` for specific `action` values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<String, String>,
}

/// Commerce extension state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommerceSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_page_id: Option<PostId>,

    pub permalinks: PermalinkStructure,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, EndpointTitle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_url: Option<String>,
}

impl CommerceExtension for CommerceSnapshot {
    fn shop_page_id(&self) -> Option<PostId> {
        self.shop_page_id
    }

    fn permalink_structure(&self) -> PermalinkStructure {
        self.permalinks.clone()
    }

    fn endpoint_title(&self, endpoint: &str, action: Option<&str>) -> Option<String> {
        let entry = self.endpoints.get(endpoint)?;
        action
            .and_then(|a| entry.actions.get(a))
            .or(Some(&entry.title))
            .filter(|t| !t.is_empty())
            .cloned()
    }

    fn activation_url(&self) -> Option<String> {
        self.activation_url.clone()
    }
}

/// Serializable snapshot of a site's content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSnapshot {
    pub options: SiteOptions,
    pub posts: Vec<PostRecord>,
    pub terms: Vec<Term>,
    pub post_types: Vec<PostTypeObject>,
    pub taxonomies: Vec<TaxonomyObject>,
    pub users: Vec<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commerce: Option<CommerceSnapshot>,
}

impl SiteSnapshot {
    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: &Path) -> Result<Self, SiteError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
            other => return Err(SiteError::UnsupportedFormat(format!("{:?}", other))),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject duplicate post ids and duplicate term ids within a taxonomy
    pub fn validate(&self) -> Result<(), SiteError> {
        let mut posts = HashSet::new();
        for record in &self.posts {
            if !posts.insert(record.item.id) {
                return Err(SiteError::DuplicateId {
                    kind: "post",
                    id: record.item.id,
                });
            }
        }

        let mut terms = HashSet::new();
        for term in &self.terms {
            if !terms.insert((term.taxonomy.as_str(), term.id)) {
                return Err(SiteError::DuplicateId {
                    kind: "term",
                    id: term.id,
                });
            }
        }

        Ok(())
    }

    /// Commerce capability, present when the snapshot has a commerce section
    pub fn commerce(&self) -> Option<&dyn CommerceExtension> {
        self.commerce.as_ref().map(|c| c as &dyn CommerceExtension)
    }

    /// Set site options (builder pattern)
    pub fn with_options(mut self, options: SiteOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a content item without term assignments (builder pattern)
    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.posts.push(PostRecord {
            item,
            terms: BTreeMap::new(),
        });
        self
    }

    /// Add a content item with term assignments (builder pattern)
    pub fn with_record(mut self, record: PostRecord) -> Self {
        self.posts.push(record);
        self
    }

    /// Add a term (builder pattern)
    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.push(term);
        self
    }

    /// Register a post type (builder pattern)
    pub fn with_post_type(mut self, post_type: PostTypeObject) -> Self {
        self.post_types.push(post_type);
        self
    }

    /// Register a taxonomy (builder pattern)
    pub fn with_taxonomy(mut self, taxonomy: TaxonomyObject) -> Self {
        self.taxonomies.push(taxonomy);
        self
    }

    /// Add a user (builder pattern)
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Enable the commerce section (builder pattern)
    pub fn with_commerce(mut self, commerce: CommerceSnapshot) -> Self {
        self.commerce = Some(commerce);
        self
    }

    fn record(&self, id: PostId) -> Option<&PostRecord> {
        self.posts.iter().find(|r| r.item.id == id)
    }

    fn find_term(&self, id: TermId, taxonomy: &str) -> Option<&Term> {
        self.terms
            .iter()
            .find(|t| t.id == id && t.taxonomy == taxonomy)
    }

    fn home(&self) -> &str {
        self.options.home_url.trim_end_matches('/')
    }
}

impl ContentStore for SiteSnapshot {
    fn content_item(&self, id: PostId) -> Option<ContentItem> {
        self.record(id).map(|r| r.item.clone())
    }

    fn term(&self, id: TermId, taxonomy: &str) -> Option<Term> {
        self.find_term(id, taxonomy).cloned()
    }

    fn term_ancestors(&self, id: TermId, taxonomy: &str) -> Vec<TermId> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.find_term(id, taxonomy).and_then(|t| t.parent);

        while let Some(parent) = current {
            if !seen.insert(parent) {
                break;
            }
            ancestors.push(parent);
            current = self.find_term(parent, taxonomy).and_then(|t| t.parent);
        }

        ancestors
    }

    fn object_terms(&self, id: PostId, taxonomy: &str) -> Vec<Term> {
        let Some(record) = self.record(id) else {
            return Vec::new();
        };

        record
            .terms
            .get(taxonomy)
            .map(|ids| {
                ids.iter()
                    .filter_map(|term_id| self.term(*term_id, taxonomy))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn post_type(&self, name: &str) -> Option<PostTypeObject> {
        self.post_types.iter().find(|p| p.name == name).cloned()
    }

    fn post_type_archive_link(&self, name: &str) -> Option<String> {
        let post_type = self.post_types.iter().find(|p| p.name == name)?;

        // Default posts archive is the posts page, or the home URL.
        if name == POST_TYPE_POST {
            return match self.options.page_for_posts.and_then(|id| self.record(id)) {
                Some(record) => Some(record.item.permalink.clone()),
                None => Some(format!("{}/", self.home())),
            };
        }

        if !post_type.has_archive {
            return None;
        }

        let slug = post_type.archive_slug.as_deref().unwrap_or(&post_type.name);
        Some(format!("{}/{}/", self.home(), slug.trim_matches('/')))
    }

    fn taxonomy(&self, name: &str) -> Option<TaxonomyObject> {
        self.taxonomies.iter().find(|t| t.name == name).cloned()
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn year_link(&self, year: i32) -> String {
        format!("{}/{}/", self.home(), year)
    }

    fn month_link(&self, year: i32, month: u32) -> String {
        format!("{}/{}/{:02}/", self.home(), year, month)
    }

    fn page_on_front(&self) -> Option<PostId> {
        self.options.page_on_front
    }

    fn page_for_posts(&self) -> Option<PostId> {
        self.options.page_for_posts
    }

    fn blog_name(&self) -> String {
        self.options.blog_name.clone()
    }
}
