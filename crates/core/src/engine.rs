//! Breadcrumb engine module
//!
//! This module provides the page-kind dispatcher: the front-page guard, the
//! first-match selection of a trail rule, and the search and pagination
//! tails that run after every dispatch.

use crate::config::{BreadcrumbConfig, Labels};
use crate::context::PageContext;
use crate::models::{Breadcrumb, Crumb, PageKind};
use crate::rules::{rule_for, RuleEnv};
use crate::store::{CommerceExtension, ContentStore};
use crate::trail::Trail;

/// Main breadcrumb generator
pub struct BreadcrumbGenerator<'a> {
    store: &'a dyn ContentStore,
    commerce: Option<&'a dyn CommerceExtension>,
    config: BreadcrumbConfig,
}

impl<'a> BreadcrumbGenerator<'a> {
    /// Create a generator with the default configuration and no commerce extension
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self {
            store,
            commerce: None,
            config: BreadcrumbConfig::default(),
        }
    }

    /// Set configuration (builder pattern)
    pub fn with_config(mut self, config: BreadcrumbConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the commerce capability; `None` means not installed (builder pattern)
    pub fn with_commerce(mut self, commerce: Option<&'a dyn CommerceExtension>) -> Self {
        self.commerce = commerce;
        self
    }

    /// Page kinds in dispatch order
    pub fn priority(&self) -> Vec<PageKind> {
        let mut kinds = PageKind::PRIORITY.to_vec();
        if self.commerce.is_some() {
            kinds.extend(PageKind::COMMERCE_PRIORITY);
        }
        kinds
    }

    /// First page kind in dispatch order whose predicate holds
    pub fn match_kind(&self, ctx: &PageContext) -> Option<PageKind> {
        self.priority().into_iter().find(|kind| ctx.is(*kind))
    }

    /// Generate the trail for a view
    pub fn generate(&self, ctx: &PageContext) -> Vec<Crumb> {
        self.resolve(ctx).crumbs
    }

    /// Generate the trail together with the page kind whose rule ran
    pub fn resolve(&self, ctx: &PageContext) -> Breadcrumb {
        if self.is_unpaged_front_page(ctx) {
            tracing::debug!("front page view, no breadcrumb");
            return Breadcrumb::default();
        }

        let env = RuleEnv {
            store: self.store,
            commerce: self.commerce,
            config: &self.config,
        };
        let mut trail = Trail::new();

        let kind = self.match_kind(ctx);
        match kind {
            Some(kind) => {
                tracing::debug!(kind = kind.label(), "dispatching trail rule");
                rule_for(kind)(&env, ctx, &mut trail);
            }
            None => tracing::debug!("no page kind matched"),
        }

        self.search_trail(ctx, &mut trail);
        self.paged_trail(ctx, &mut trail);

        Breadcrumb {
            kind,
            crumbs: trail.into_crumbs(),
        }
    }

    /// The unpaginated front page, or the shop archive serving as front page
    fn is_unpaged_front_page(&self, ctx: &PageContext) -> bool {
        if ctx.is_paged() {
            return false;
        }
        if ctx.front_page {
            return true;
        }

        let Some(commerce) = self.commerce else {
            return false;
        };
        let shop_is_front = match (self.store.page_on_front(), commerce.shop_page_id()) {
            (Some(front), Some(shop)) => front == shop,
            _ => false,
        };

        shop_is_front && (ctx.is(PageKind::PostTypeArchive) || ctx.is(PageKind::CommerceShop))
    }

    fn search_trail(&self, ctx: &PageContext, trail: &mut Trail) {
        if let Some(search) = &ctx.search {
            trail.add_crumb(
                &Labels::format(&self.config.labels.search_results, &search.query),
                &search.url,
            );
        }
    }

    fn paged_trail(&self, ctx: &PageContext, trail: &mut Trail) {
        if ctx.is_paged() {
            trail.add_crumb(&Labels::format(&self.config.labels.page, ctx.paged), "");
        }
    }
}
