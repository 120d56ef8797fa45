//! wp_breadcrumbs_core - Core library for breadcrumb trails
//!
//! This crate turns a description of the page being viewed into the ordered
//! list of crumbs a visitor sees as "Home > Category > Subcategory > Article".
//!
//! # Features
//!
//! - **Page-kind Dispatch**: A fixed priority order selects exactly one trail
//!   rule per view; the first true predicate wins.
//! - **Ancestor Walks**: Taxonomy term and page parent chains are rendered
//!   root-first, silently skipping entries that no longer resolve.
//! - **Plain-text Labels**: All markup is stripped before a crumb is stored.
//! - **Injected Collaborators**: Content lookups go through [`ContentStore`];
//!   the optional commerce extension is a [`CommerceExtension`] capability.
//! - **Multiple Output Formats**: JSON, YAML, ANSI-colored and summary output.
//!
//! # Example
//!
//! ```rust,no_run
//! use wp_breadcrumbs_core::{BreadcrumbGenerator, PageContext, PageKind, SiteSnapshot};
//! use std::path::Path;
//!
//! let site = SiteSnapshot::from_path(Path::new("site.yaml")).unwrap();
//! let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());
//!
//! let ctx = PageContext::new(PageKind::Single).with_post(42);
//! for crumb in generator.generate(&ctx) {
//!     println!("{} -> {}", crumb.label, crumb.link);
//! }
//! ```

pub mod ancestors;
pub mod config;
pub mod context;
pub mod engine;
pub mod extension;
pub mod models;
pub mod output;
pub mod rules;
pub mod site;
pub mod store;
pub mod trail;

// Re-exports for convenience
pub use ancestors::{AncestorWalker, Containment};
pub use config::{BreadcrumbConfig, ConfigError, Labels};
pub use context::{PageContext, SearchContext};
pub use engine::BreadcrumbGenerator;
pub use extension::{ExtensionProbe, ExtensionStatus};
pub use models::{
    BatchReport, BatchStats, Breadcrumb, ContentItem, Crumb, DateArchive, DateGranularity,
    NamedBreadcrumb, PageKind, PermalinkStructure, PostId, PostTypeObject, QueriedObject,
    RunMetadata, TaxonomyObject, Term, TermId, User, UserId,
};
pub use output::{format_batch, format_output, format_value, FormatError, OutputFormat};
pub use site::{CommerceSnapshot, EndpointTitle, PostRecord, SiteError, SiteOptions, SiteSnapshot};
pub use store::{CommerceExtension, ContentStore};
pub use trail::{strip_markup, Trail};
