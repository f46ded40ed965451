//! Integration tests for outlines and HTML of fetched post bodies.

use notiblog::{extract_table_of_contents, nest_table_of_contents, render_html};

use crate::common::TestHarness;

#[tokio::test]
async fn test_outline_of_fetched_post() {
    let harness = TestHarness::new();
    let post = harness
        .blog
        .get_post_by_slug("hello-rust")
        .await
        .unwrap()
        .expect("post should exist");

    let toc = extract_table_of_contents(&post.content);

    let ids: Vec<&str> = toc.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["hello", "setup", "setup-1"]);
    assert_eq!(toc[1].level, 2);
}

#[tokio::test]
async fn test_nested_outline() {
    let harness = TestHarness::new();
    let post = harness.blog.post_or_none("hello-rust").await.unwrap();

    let nested = nest_table_of_contents(extract_table_of_contents(&post.content));

    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].children.len(), 2);
}

#[tokio::test]
async fn test_rendered_anchors_match_outline() {
    let harness = TestHarness::new();

    for slug in ["hello-rust", "async-notes", "next-js-tips"] {
        let post = harness.blog.post_or_none(slug).await.unwrap();
        let html = render_html(&post.content);
        for item in extract_table_of_contents(&post.content) {
            assert!(
                html.contains(&format!(r#"id="{}""#, item.id)),
                "{slug}: anchor {} missing",
                item.id
            );
        }
    }
}

#[tokio::test]
async fn test_korean_heading_keeps_text() {
    let harness = TestHarness::new();
    let post = harness.blog.post_or_none("next-js-tips").await.unwrap();

    let toc = extract_table_of_contents(&post.content);

    assert_eq!(toc[0].id, "시작하기");
}

#[tokio::test]
async fn test_post_without_slug_is_not_found_by_id() {
    let harness = TestHarness::new();

    assert!(harness.blog.post_or_none("p4").await.is_none());
}
