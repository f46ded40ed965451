//! Integration tests for upstream failure handling.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use notiblog::{Blog, Error, TagFilterItem};

use crate::common::{BrokenBodies, FailingSource, TestHarness, sample_source};

#[tokio::test]
async fn test_list_propagates_errors() {
    let harness = TestHarness::with_source(FailingSource::new(503));

    let err = harness.blog.list_published_posts(None).await.unwrap_err();

    assert!(matches!(err, Error::Api { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_post_by_slug_propagates_errors() {
    let harness = TestHarness::with_source(FailingSource::new(500));

    assert!(harness.blog.get_post_by_slug("hello-rust").await.is_err());
}

#[tokio::test]
async fn test_post_or_none_degrades_to_absent() {
    let harness = TestHarness::with_source(FailingSource::new(500));

    assert!(harness.blog.post_or_none("hello-rust").await.is_none());
}

#[tokio::test]
async fn test_body_failure_is_an_error() {
    let harness = TestHarness::with_source(BrokenBodies(sample_source()));

    let err = harness.blog.get_post_by_slug("hello-rust").await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));

    assert!(harness.blog.post_or_none("hello-rust").await.is_none());
}

#[tokio::test]
async fn test_tag_stats_or_default_degrades_to_all_entry() {
    let source = Arc::new(FailingSource::new(502));
    let blog = Blog::new(source.clone());

    assert!(blog.tag_stats().await.is_err());
    let stats = blog.tag_stats_or_default().await;

    assert_eq!(stats, [TagFilterItem::all("전체", 0)]);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_lenient_forms_pass_through_success() {
    let harness = TestHarness::new();

    let post = harness.blog.post_or_none("hello-rust").await;
    assert_eq!(post.map(|p| p.post.id), Some("p1".to_string()));

    let stats = harness.blog.tag_stats_or_default().await;
    assert_eq!(stats.len(), 5);
}
