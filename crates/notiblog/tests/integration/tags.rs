//! Integration tests for tag statistics.

use notiblog::{Blog, BlogOptions, MemorySource, TagFilterItem};
use std::sync::Arc;

use crate::common::{PageBuilder, TestHarness, sample_source};

#[tokio::test]
async fn test_tag_stats_over_published_posts() {
    let harness = TestHarness::new();

    let stats = harness.blog.tag_stats().await.expect("stats should load");

    let summary: Vec<(&str, &str, usize)> = stats
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str(), s.count))
        .collect();
    assert_eq!(
        summary,
        [
            ("all", "전체", 4),
            ("rust", "Rust", 2),
            ("intro", "Intro", 2),
            ("async", "Async", 1),
            ("next-js", "Next JS", 1),
        ]
    );
}

#[tokio::test]
async fn test_custom_all_label() {
    let options = BlogOptions {
        all_label: "All posts".to_string(),
        ..Default::default()
    };
    let blog = Blog::with_options(Arc::new(sample_source()), options);

    let stats = blog.tag_stats().await.unwrap();

    assert_eq!(stats[0], TagFilterItem::all("All posts", 4));
}

#[tokio::test]
async fn test_empty_blog() {
    let harness = TestHarness::with_source(MemorySource::new());

    let stats = harness.blog.tag_stats().await.unwrap();

    assert_eq!(stats, [TagFilterItem::all("전체", 0)]);
}

#[tokio::test]
async fn test_drafts_do_not_count() {
    let source = MemorySource::new()
        .with_page(PageBuilder::new("a").tags(&["Rust"]).build(), "")
        .with_page(PageBuilder::new("b").tags(&["Rust", "Draft"]).draft().build(), "");
    let harness = TestHarness::with_source(source);

    let stats = harness.blog.tag_stats().await.unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[1], TagFilterItem::tag("Rust", 1));
}
