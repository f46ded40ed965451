//! Tag statistics.

use std::collections::HashMap;

use notiblog_core::{Post, Result, TagFilterItem};

use crate::blog::Blog;

/// Counts tags across `posts`.
///
/// The first entry covers every post under `all_label`. The rest are one
/// per distinct tag, most used first; equal counts keep the order in which
/// the tags were first seen. Tags are compared exactly, so `Rust` and
/// `rust` are counted apart.
///
/// ```
/// use notiblog::{Post, aggregate_tags};
///
/// let post = |tags: &[&str]| Post {
///     tags: tags.iter().map(|t| t.to_string()).collect(),
///     ..Post::new("p")
/// };
/// let stats = aggregate_tags(&[post(&["go", "rust"]), post(&["rust"])], "All");
///
/// assert_eq!(stats[0].id, "all");
/// assert_eq!(stats[0].count, 2);
/// assert_eq!(stats[1].name, "rust");
/// assert_eq!(stats[1].count, 2);
/// assert_eq!(stats[2].name, "go");
/// ```
pub fn aggregate_tags(posts: &[Post], all_label: &str) -> Vec<TagFilterItem> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in posts.iter().flat_map(|p| p.tags.iter().map(String::as_str)) {
        match index.get(tag) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(tag, order.len());
                order.push((tag, 1));
            }
        }
    }

    // Stable: ties stay in first-seen order.
    order.sort_by(|a, b| b.1.cmp(&a.1));

    std::iter::once(TagFilterItem::all(all_label, posts.len()))
        .chain(
            order
                .into_iter()
                .map(|(name, count)| TagFilterItem::tag(name, count)),
        )
        .collect()
}

impl Blog {
    /// Tag statistics over all published posts.
    pub async fn tag_stats(&self) -> Result<Vec<TagFilterItem>> {
        let posts = self.list_published_posts(None).await?;
        let stats = aggregate_tags(&posts, &self.options().all_label);
        tracing::debug!(tags = stats.len() - 1, posts = posts.len(), "Aggregated tags");
        Ok(stats)
    }

    /// Like [`Blog::tag_stats`], but logs failures and returns only the
    /// aggregate entry with a zero count.
    pub async fn tag_stats_or_default(&self) -> Vec<TagFilterItem> {
        match self.tag_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::error!(error = %err, "Failed to aggregate tags");
                vec![TagFilterItem::all(&self.options().all_label, 0)]
            }
        }
    }
}
