//! Integration tests for listing posts, slug lookup and navigation.

use notiblog::MemorySource;

use crate::common::{PageBuilder, TestHarness};

fn ids(posts: &[notiblog::Post]) -> Vec<&str> {
    posts.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_lists_published_newest_first() {
    let harness = TestHarness::new();

    let posts = harness
        .blog
        .list_published_posts(None)
        .await
        .expect("listing should succeed");

    assert_eq!(ids(&posts), ["p2", "p5", "p1", "p4"]);
}

#[tokio::test]
async fn test_tag_filter_is_exact() {
    let harness = TestHarness::new();

    let rust = harness.blog.list_published_posts(Some("Rust")).await.unwrap();
    assert_eq!(ids(&rust), ["p2", "p1"]);

    let lowercase = harness.blog.list_published_posts(Some("rust")).await.unwrap();
    assert!(lowercase.is_empty(), "tag matching is case-sensitive");

    let unknown = harness.blog.list_published_posts(Some("Haskell")).await.unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_listing_accumulates_every_page() {
    let mut source = MemorySource::new().with_page_size(2);
    for day in 1..=7 {
        source.push_page(
            PageBuilder::new(&format!("p{day}"))
                .date(&format!("2024-05-0{day}"))
                .build(),
            "",
        );
    }
    let harness = TestHarness::with_source(source);

    let posts = harness.blog.list_published_posts(None).await.unwrap();

    assert_eq!(ids(&posts), ["p7", "p6", "p5", "p4", "p3", "p2", "p1"]);
}

#[tokio::test]
async fn test_mapped_fields() {
    let harness = TestHarness::new();

    let posts = harness.blog.list_published_posts(Some("Intro")).await.unwrap();
    let first = &posts[0];

    assert_eq!(first.title, "Post p1");
    assert_eq!(first.slug, "hello-rust");
    assert_eq!(first.author, "Kim");
    assert_eq!(first.date.as_deref(), Some("2024-01-10"));
    assert_eq!(first.tags, ["Rust", "Intro"]);

    let no_slug = &posts[1];
    assert_eq!(no_slug.slug, no_slug.id, "slug falls back to the record id");
    assert_eq!(no_slug.author, "");
}

#[tokio::test]
async fn test_get_post_by_slug_returns_body() {
    let harness = TestHarness::new();

    let found = harness
        .blog
        .get_post_by_slug("async-notes")
        .await
        .unwrap()
        .expect("post should exist");

    assert_eq!(found.post.id, "p2");
    assert_eq!(found.content, "## Futures\n\n### Pinning\n");
}

#[tokio::test]
async fn test_missing_and_draft_slugs_are_absent() {
    let harness = TestHarness::new();

    assert!(harness.blog.get_post_by_slug("nope").await.unwrap().is_none());
    assert!(harness.blog.get_post_by_slug("draft-post").await.unwrap().is_none());
    assert!(harness.blog.get_post_by_slug("Hello-Rust").await.unwrap().is_none());
}

#[tokio::test]
async fn test_slug_match_joins_segments() {
    let source = MemorySource::new().with_page(
        serde_json::json!({
            "id": "split",
            "properties": {
                "Status": { "type": "select", "select": { "name": "Published" } },
                "Slug": {
                    "type": "rich_text",
                    "rich_text": [{ "plain_text": "two-" }, { "plain_text": "parts" }]
                }
            }
        }),
        "body",
    );
    let harness = TestHarness::with_source(source);

    let found = harness.blog.get_post_by_slug("two-parts").await.unwrap();

    assert_eq!(found.map(|f| f.post.slug), Some("two-parts".to_string()));
}

#[tokio::test]
async fn test_adjacent_posts() {
    let harness = TestHarness::new();

    let middle = harness.blog.adjacent_posts("p5").await.unwrap();
    assert_eq!(middle.prev.map(|p| p.id), Some("p2".to_string()));
    assert_eq!(middle.next.map(|p| p.id), Some("p1".to_string()));

    let newest = harness.blog.adjacent_posts("p2").await.unwrap();
    assert!(newest.prev.is_none());
    assert_eq!(newest.next.map(|p| p.id), Some("p5".to_string()));

    let oldest = harness.blog.adjacent_posts("p4").await.unwrap();
    assert_eq!(oldest.prev.map(|p| p.id), Some("p1".to_string()));
    assert!(oldest.next.is_none());

    let draft = harness.blog.adjacent_posts("p3").await.unwrap();
    assert!(draft.prev.is_none() && draft.next.is_none());
}

#[tokio::test]
async fn test_undated_posts_sort_last() {
    let source = MemorySource::new()
        .with_page(PageBuilder::new("undated").title("Undated").build(), "")
        .with_page(PageBuilder::new("dated").date("2020-01-01").build(), "");
    let harness = TestHarness::with_source(source);

    let posts = harness.blog.list_published_posts(None).await.unwrap();

    assert_eq!(ids(&posts), ["dated", "undated"]);
    assert_eq!(posts[1].title, "Undated");
}
