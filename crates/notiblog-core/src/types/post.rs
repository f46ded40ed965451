//! Published blog entries.

use serde::{Deserialize, Serialize};

/// A published blog entry, projected from one remote page record.
///
/// Only `id` is guaranteed; every other field is best-effort and degrades to
/// an empty string or `None` when the upstream record lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque identifier assigned by the remote source
    pub id: String,

    /// Plain-text title
    pub title: String,

    /// Plain-text summary
    pub description: String,

    /// Cover image URL, external or uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Multi-select labels, upstream order
    pub tags: Vec<String>,

    /// Author display name
    pub author: String,

    /// Publish date (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Last modification date (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,

    /// URL routing key; the record id when no explicit slug is set
    pub slug: String,
}

impl Post {
    /// Creates a post with only its id set; the slug falls back to the id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            ..Default::default()
        }
    }

    /// Returns `true` if the post was modified on a different date than it
    /// was published.
    pub fn was_modified(&self) -> bool {
        match (&self.modified_date, &self.date) {
            (Some(modified), Some(published)) => modified != published,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

/// A post together with its Markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    /// The mapped post
    pub post: Post,

    /// Page body rendered to Markdown
    pub content: String,
}

/// The neighbours of a post in the date-descending post list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentPosts {
    /// The newer post, listed just before
    pub prev: Option<Post>,

    /// The older post, listed just after
    pub next: Option<Post>,
}

impl AdjacentPosts {
    /// Finds the neighbours of `post_id` in an ordered list.
    ///
    /// Both sides are `None` when the id is not in the list.
    pub fn locate(posts: &[Post], post_id: &str) -> Self {
        let Some(index) = posts.iter().position(|p| p.id == post_id) else {
            return Self::default();
        };

        Self {
            prev: index.checked_sub(1).map(|i| posts[i].clone()),
            next: posts.get(index + 1).cloned(),
        }
    }
}
