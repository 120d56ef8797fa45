//! End-to-end trail scenarios against a YAML site snapshot

use std::path::PathBuf;
use wp_breadcrumbs_core::{
    BreadcrumbGenerator, ContentItem, ContentStore, Crumb, DateArchive, PageContext, PageKind,
    PostId, PostTypeObject, QueriedObject, SiteSnapshot, TaxonomyObject, Term, TermId, User,
    UserId,
};

fn fixture() -> SiteSnapshot {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site.yaml");
    SiteSnapshot::from_path(&path).expect("load site fixture")
}

fn labels(crumbs: &[Crumb]) -> Vec<&str> {
    crumbs.iter().map(|c| c.label.as_str()).collect()
}

fn term_ctx(kind: PageKind, id: TermId, taxonomy: &str) -> PageContext {
    PageContext::new(kind).with_queried_object(QueriedObject::Term {
        id,
        taxonomy: taxonomy.to_string(),
    })
}

/// Store that hides one term, as if it had been deleted
struct MissingTerm<'a> {
    inner: &'a SiteSnapshot,
    missing: TermId,
}

impl ContentStore for MissingTerm<'_> {
    fn content_item(&self, id: PostId) -> Option<ContentItem> {
        self.inner.content_item(id)
    }

    fn term(&self, id: TermId, taxonomy: &str) -> Option<Term> {
        if id == self.missing {
            return None;
        }
        self.inner.term(id, taxonomy)
    }

    fn term_ancestors(&self, id: TermId, taxonomy: &str) -> Vec<TermId> {
        self.inner.term_ancestors(id, taxonomy)
    }

    fn object_terms(&self, id: PostId, taxonomy: &str) -> Vec<Term> {
        self.inner.object_terms(id, taxonomy)
    }

    fn post_type(&self, name: &str) -> Option<PostTypeObject> {
        self.inner.post_type(name)
    }

    fn post_type_archive_link(&self, name: &str) -> Option<String> {
        self.inner.post_type_archive_link(name)
    }

    fn taxonomy(&self, name: &str) -> Option<TaxonomyObject> {
        self.inner.taxonomy(name)
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.inner.user(id)
    }

    fn year_link(&self, year: i32) -> String {
        self.inner.year_link(year)
    }

    fn month_link(&self, year: i32, month: u32) -> String {
        self.inner.month_link(year, month)
    }

    fn page_on_front(&self) -> Option<PostId> {
        self.inner.page_on_front()
    }

    fn page_for_posts(&self) -> Option<PostId> {
        self.inner.page_for_posts()
    }

    fn blog_name(&self) -> String {
        self.inner.blog_name()
    }
}

#[test]
fn single_post_with_posts_page_and_category_chain() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let crumbs = generator.generate(&PageContext::new(PageKind::Single).with_post(42));

    assert_eq!(
        crumbs,
        vec![
            Crumb::new("Blog", "https://example.com/blog/"),
            Crumb::new("Articles", "https://example.com/category/articles/"),
            Crumb::new("News", "https://example.com/category/articles/news/"),
            Crumb::new("Hello World", "https://example.com/hello-world/"),
        ]
    );
}

#[test]
fn search_results_on_second_page() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let ctx = PageContext::default()
        .with_search("widget", "https://example.com/?s=widget")
        .with_paged(2);

    assert_eq!(
        generator.generate(&ctx),
        vec![
            Crumb::new(
                "Search results for \u{201c}widget\u{201d}",
                "https://example.com/?s=widget"
            ),
            Crumb::new("Page 2", ""),
        ]
    );
}

#[test]
fn not_found_view() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    assert_eq!(
        generator.generate(&PageContext::new(PageKind::NotFound)),
        vec![Crumb::new("Error 404", "")]
    );
}

#[test]
fn day_archive() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let ctx = PageContext::new(PageKind::Date).with_date(DateArchive::day(2024, 3, 15));

    assert_eq!(
        generator.generate(&ctx),
        vec![
            Crumb::new("2024", "https://example.com/2024/"),
            Crumb::new("March", "https://example.com/2024/03/"),
            Crumb::new("15", ""),
        ]
    );
}

#[test]
fn nothing_matches_means_empty_trail() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());

    assert!(generator.generate(&PageContext::default()).is_empty());
}

#[test]
fn front_page_guard_respects_pagination() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let front = PageContext::new(PageKind::Page).with_post(1).with_front_page(true);
    assert!(generator.generate(&front).is_empty());

    let paged = generator.generate(&front.with_paged(4));
    assert!(!paged.is_empty());
    assert_eq!(paged.last(), Some(&Crumb::new("Page 4", "")));
}

#[test]
fn category_ancestors_are_root_first_and_exclude_self() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let crumbs = generator.generate(&term_ctx(PageKind::Category, 13, "category"));
    assert_eq!(labels(&crumbs), vec!["Articles", "News", "Local", "Deep"]);
}

#[test]
fn missing_ancestor_is_skipped() {
    let site = fixture();
    let store = MissingTerm {
        inner: &site,
        missing: 12,
    };
    let generator = BreadcrumbGenerator::new(&store);

    let crumbs = generator.generate(&term_ctx(PageKind::Category, 13, "category"));
    assert_eq!(labels(&crumbs), vec!["Articles", "News", "Deep"]);
}

#[test]
fn generate_twice_gives_same_trail() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());
    let ctx = PageContext::new(PageKind::Single).with_post(60).with_paged(2);

    assert_eq!(generator.generate(&ctx), generator.generate(&ctx));
}

#[test]
fn attachment_strips_markup_from_title() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let crumbs = generator.generate(&PageContext::new(PageKind::Attachment).with_post(43));
    assert_eq!(
        labels(&crumbs),
        vec!["Blog", "Articles", "News", "Hello World", "Header Image"]
    );
}

#[test]
fn product_trail_with_shop_root() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());

    let crumbs = generator.generate(&PageContext::new(PageKind::Single).with_post(60));
    assert_eq!(
        labels(&crumbs),
        vec!["Shop", "Clothing", "Shirts", "Casual", "Blue Shirt"]
    );
    assert_eq!(crumbs[0].link, "https://example.com/shop/");
}

#[test]
fn commerce_views() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());

    let crumbs = generator.generate(&term_ctx(PageKind::CommerceCategory, 21, "product_cat"));
    assert_eq!(labels(&crumbs), vec!["Shop", "Clothing", "Shirts"]);

    let crumbs = generator.generate(&PageContext::new(PageKind::CommerceShop).with_paged(2));
    assert_eq!(
        crumbs,
        vec![
            Crumb::new("Shop", "https://example.com/shop/"),
            Crumb::new("Page 2", ""),
        ]
    );
}

#[test]
fn account_endpoint_tail() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site).with_commerce(site.commerce());

    let ctx = PageContext::new(PageKind::Page)
        .with_post(4)
        .with_endpoint("edit-address", Some("billing".to_string()));
    assert_eq!(
        labels(&generator.generate(&ctx)),
        vec!["My Account", "Billing address"]
    );

    let plain = BreadcrumbGenerator::new(&site);
    assert_eq!(labels(&plain.generate(&ctx)), vec!["My Account"]);
}

#[test]
fn author_and_home_views() {
    let site = fixture();
    let generator = BreadcrumbGenerator::new(&site);

    let ctx = PageContext::new(PageKind::Author).with_queried_object(QueriedObject::User { id: 7 });
    assert_eq!(
        generator.generate(&ctx),
        vec![Crumb::new("Author: Ada Lovelace", "")]
    );

    let ctx = PageContext::new(PageKind::Home).with_queried_object(QueriedObject::Post { id: 2 });
    assert_eq!(generator.generate(&ctx), vec![Crumb::new("Blog", "")]);
}
