//! Collaborator interfaces
//!
//! The trail rules never read ambient state; every lookup goes through these
//! traits. All methods are side-effect-free reads, and "not found" is always
//! an `Option::None` or an empty list so that callers can omit and continue.

use crate::models::{
    ContentItem, PermalinkStructure, PostId, PostTypeObject, TaxonomyObject, Term, TermId, User,
    UserId,
};

/// Read access to posts, terms, and site options
pub trait ContentStore {
    /// Fetch a content item by id
    fn content_item(&self, id: PostId) -> Option<ContentItem>;

    /// Fetch a term of the given taxonomy
    fn term(&self, id: TermId, taxonomy: &str) -> Option<Term>;

    /// Ancestor ids of a term, nearest parent first
    fn term_ancestors(&self, id: TermId, taxonomy: &str) -> Vec<TermId>;

    /// Terms of a taxonomy assigned to a content item, in assignment order
    fn object_terms(&self, id: PostId, taxonomy: &str) -> Vec<Term>;

    fn post_type(&self, name: &str) -> Option<PostTypeObject>;

    /// Archive link of a post type; `None` when it has no archive
    fn post_type_archive_link(&self, name: &str) -> Option<String>;

    fn taxonomy(&self, name: &str) -> Option<TaxonomyObject>;

    fn user(&self, id: UserId) -> Option<User>;

    fn year_link(&self, year: i32) -> String;

    fn month_link(&self, year: i32, month: u32) -> String;

    /// Page configured as the static front page
    fn page_on_front(&self) -> Option<PostId>;

    /// Page configured as the posts listing
    fn page_for_posts(&self) -> Option<PostId>;

    fn blog_name(&self) -> String;
}

/// Capability handed in by the host when the commerce extension is installed
pub trait CommerceExtension {
    /// Page configured as the shop listing
    fn shop_page_id(&self) -> Option<PostId>;

    fn permalink_structure(&self) -> PermalinkStructure;

    /// Display title of an endpoint, optionally refined by the request action
    fn endpoint_title(&self, endpoint: &str, action: Option<&str>) -> Option<String>;

    /// Admin URL that activates the extension; never affects the trail
    fn activation_url(&self) -> Option<String> {
        None
    }
}
