//! Trail builder rules
//!
//! One rule per page kind. A rule appends the crumbs that place the current
//! view in the content hierarchy, ending with the view itself where it has a
//! crumb of its own. Missing lookups omit the affected crumb and carry on.

use crate::ancestors::{AncestorWalker, Containment};
use crate::config::{BreadcrumbConfig, Labels};
use crate::context::PageContext;
use crate::models::{
    ContentItem, DateGranularity, PageKind, PostId, Term, POST_TYPE_POST, POST_TYPE_PRODUCT,
    TAXONOMY_CATEGORY, TAXONOMY_PRODUCT_CAT,
};
use crate::store::{CommerceExtension, ContentStore};
use crate::trail::{sanitize_text_field, Trail};

/// Collaborators available to every rule
pub struct RuleEnv<'a> {
    pub store: &'a dyn ContentStore,
    pub commerce: Option<&'a dyn CommerceExtension>,
    pub config: &'a BreadcrumbConfig,
}

impl RuleEnv<'_> {
    fn labels(&self) -> &Labels {
        &self.config.labels
    }

    fn walker(&self) -> AncestorWalker<'_> {
        AncestorWalker::new(self.store, self.config.max_parent_depth)
    }

    /// Queried term, resolved through the store
    fn queried_term(&self, ctx: &PageContext) -> Option<Term> {
        let (id, taxonomy) = ctx.queried_object.as_ref()?.term()?;
        let term = self.store.term(id, taxonomy);
        if term.is_none() {
            tracing::debug!(term_id = id, taxonomy, "queried term not found");
        }
        term
    }

    /// Content item in context: the explicit post, else the queried post
    fn current_item(&self, ctx: &PageContext) -> Option<ContentItem> {
        let id = ctx
            .post
            .or_else(|| ctx.queried_object.as_ref().and_then(|o| o.post_id()))?;
        let item = self.store.content_item(id);
        if item.is_none() {
            tracing::debug!(post_id = id, "content item not found");
        }
        item
    }

    fn is_front_page_id(&self, id: PostId) -> bool {
        self.store.page_on_front() == Some(id)
    }
}

/// Signature shared by all rules
pub type Rule = fn(&RuleEnv<'_>, &PageContext, &mut Trail);

/// Rule implementing a page kind
pub fn rule_for(kind: PageKind) -> Rule {
    match kind {
        PageKind::Home => home,
        PageKind::NotFound => not_found,
        PageKind::Attachment => attachment,
        PageKind::Single => single,
        PageKind::Page => page,
        PageKind::PostTypeArchive => post_type_archive,
        PageKind::Category => category,
        PageKind::Tag => tag,
        PageKind::Author => author,
        PageKind::Date => date,
        PageKind::TaxonomyTerm => taxonomy_term,
        PageKind::CommerceCategory => commerce_category,
        PageKind::CommerceTag => commerce_tag,
        PageKind::CommerceShop => commerce_shop,
    }
}

fn home(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let posts_page = ctx
        .queried_object
        .as_ref()
        .and_then(|o| o.post_id())
        .or_else(|| env.store.page_for_posts())
        .and_then(|id| env.store.content_item(id));

    match posts_page {
        Some(item) => trail.add_crumb(&item.title, ""),
        None => trail.add_crumb(&env.store.blog_name(), ""),
    }
}

fn not_found(env: &RuleEnv<'_>, _ctx: &PageContext, trail: &mut Trail) {
    trail.add_crumb(&env.labels().error_404, "");
}

fn attachment(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(item) = env.current_item(ctx) else {
        return;
    };

    if let Some(parent) = item.parent_id.and_then(|id| env.store.content_item(id)) {
        single_trail(env, &parent, None, trail);
    }

    trail.add_crumb(&item.title, &item.permalink);
}

fn single(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    if let Some(item) = env.current_item(ctx) {
        single_trail(env, &item, None, trail);
    }
}

/// Trail of a single content item, with an optional permalink override
pub fn single_trail(
    env: &RuleEnv<'_>,
    item: &ContentItem,
    permalink: Option<&str>,
    trail: &mut Trail,
) {
    let permalink = permalink.unwrap_or(&item.permalink);

    match (item.post_type.as_str(), env.commerce) {
        (POST_TYPE_PRODUCT, Some(commerce)) => {
            prepend_shop_page(env, commerce, trail);

            let mut terms = env.store.object_terms(item.id, TAXONOMY_PRODUCT_CAT);
            terms.sort_by(|a, b| b.parent_key().cmp(&a.parent_key()));

            if let Some(main_term) = terms.first() {
                trail.extend(
                    env.walker()
                        .walk(main_term.id, Containment::Taxonomy(TAXONOMY_PRODUCT_CAT)),
                );
                trail.add_crumb(&main_term.name, &main_term.link);
            }
        }
        (POST_TYPE_POST, _) => {
            if let Some(posts_page) = env
                .store
                .page_for_posts()
                .and_then(|id| env.store.content_item(id))
            {
                trail.add_crumb(&posts_page.title, &posts_page.permalink);
            }

            if let Some(cat) = env.store.object_terms(item.id, TAXONOMY_CATEGORY).first() {
                trail.extend(
                    env.walker()
                        .walk(cat.id, Containment::Taxonomy(TAXONOMY_CATEGORY)),
                );
                trail.add_crumb(&cat.name, &cat.link);
            }
        }
        (post_type, _) => {
            let archive = env
                .store
                .post_type(post_type)
                .filter(|pt| pt.has_archive)
                .zip(env.store.post_type_archive_link(post_type));

            if let Some((pt, link)) = archive {
                trail.add_crumb(&pt.singular_label, &link);
            }
        }
    }

    trail.add_crumb(&item.title, permalink);
}

fn page(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(item) = env.current_item(ctx) else {
        return;
    };

    if item.parent_id.is_some() {
        trail.extend(env.walker().walk(item.id, Containment::ContentParent));
    }

    trail.add_crumb(&item.title, &item.permalink);
    endpoint_trail(env, ctx, trail);
}

/// Crumb for a recognized commerce endpoint of the current page
fn endpoint_trail(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(commerce) = env.commerce else {
        return;
    };
    let Some(endpoint) = ctx.endpoint.as_deref().filter(|e| !e.is_empty()) else {
        return;
    };

    let action = ctx
        .action
        .as_deref()
        .map(sanitize_text_field)
        .filter(|a| !a.is_empty());

    if let Some(title) = commerce
        .endpoint_title(endpoint, action.as_deref())
        .filter(|t| !t.is_empty())
    {
        trail.add_crumb(&title, "");
    }
}

fn post_type_archive(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(name) = ctx.queried_object.as_ref().and_then(|o| o.post_type()) else {
        return;
    };

    let archive = env
        .store
        .post_type(name)
        .zip(env.store.post_type_archive_link(name));

    if let Some((post_type, link)) = archive {
        trail.add_crumb(&post_type.label, &link);
    }
}

fn category(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(term) = env.queried_term(ctx) else {
        return;
    };

    if term.parent.is_some() {
        trail.extend(env.walker().walk(term.id, Containment::Taxonomy(&term.taxonomy)));
    }

    trail.add_crumb(&term.name, &term.link);
}

fn tag(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    if let Some(term) = env.queried_term(ctx) {
        trail.add_crumb(&Labels::format(&env.labels().posts_tagged, &term.name), &term.link);
    }
}

fn taxonomy_term(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(term) = env.queried_term(ctx) else {
        return;
    };

    if let Some(taxonomy) = env.store.taxonomy(&term.taxonomy) {
        trail.add_crumb(&taxonomy.label, "");
    }

    if term.parent.is_some() {
        trail.extend(env.walker().walk(term.id, Containment::Taxonomy(&term.taxonomy)));
    }

    trail.add_crumb(&term.name, &term.link);
}

fn author(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let user = ctx
        .queried_object
        .as_ref()
        .and_then(|o| o.user_id())
        .and_then(|id| env.store.user(id));

    if let Some(user) = user {
        trail.add_crumb(&Labels::format(&env.labels().author, &user.display_name), "");
    }
}

fn date(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(date) = ctx.date else {
        return;
    };
    let granularity = date.granularity();

    trail.add_crumb(&date.year.to_string(), &env.store.year_link(date.year));

    if let (Some(month), DateGranularity::Month | DateGranularity::Day) = (date.month, granularity)
    {
        trail.add_crumb(
            &env.labels().month_name(month),
            &env.store.month_link(date.year, month),
        );
    }

    if let (Some(day), DateGranularity::Day) = (date.day, granularity) {
        trail.add_crumb(&format!("{:02}", day), "");
    }
}

/// Shop page crumb, when product permalinks live under the shop page
fn prepend_shop_page(env: &RuleEnv<'_>, commerce: &dyn CommerceExtension, trail: &mut Trail) {
    let Some(shop_id) = commerce.shop_page_id() else {
        return;
    };
    let Some(shop_page) = env.store.content_item(shop_id) else {
        tracing::debug!(shop_id, "shop page not found");
        return;
    };
    if shop_page.slug.is_empty() || env.is_front_page_id(shop_id) {
        return;
    }

    let under_shop = commerce
        .permalink_structure()
        .product_base
        .is_some_and(|base| base.contains(&format!("/{}", shop_page.slug)));

    if under_shop {
        trail.add_crumb(&shop_page.title, &shop_page.permalink);
    }
}

fn commerce_category(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(commerce) = env.commerce else {
        return;
    };
    let Some(term) = env.queried_term(ctx) else {
        return;
    };

    prepend_shop_page(env, commerce, trail);
    trail.extend(env.walker().walk(term.id, Containment::Taxonomy(&term.taxonomy)));
    trail.add_crumb(&term.name, &term.link);
}

fn commerce_tag(env: &RuleEnv<'_>, ctx: &PageContext, trail: &mut Trail) {
    let Some(commerce) = env.commerce else {
        return;
    };
    let Some(term) = env.queried_term(ctx) else {
        return;
    };

    prepend_shop_page(env, commerce, trail);
    trail.add_crumb(
        &Labels::format(&env.labels().products_tagged, &term.name),
        &term.link,
    );
}

fn commerce_shop(env: &RuleEnv<'_>, _ctx: &PageContext, trail: &mut Trail) {
    let Some(commerce) = env.commerce else {
        return;
    };
    let shop_id = commerce.shop_page_id();

    if shop_id.is_some_and(|id| env.is_front_page_id(id)) {
        return;
    }

    let label = shop_id
        .and_then(|id| env.store.content_item(id))
        .map(|page| page.title)
        .filter(|title| !title.is_empty())
        .or_else(|| env.store.post_type(POST_TYPE_PRODUCT).map(|pt| pt.label))
        .unwrap_or_default();

    let link = env
        .store
        .post_type_archive_link(POST_TYPE_PRODUCT)
        .unwrap_or_default();

    trail.add_crumb(&label, &link);
}
