//! The blog content service.

use std::sync::Arc;

use notiblog_core::{AdjacentPosts, DEFAULT_ALL_LABEL, Post, PostContent, Result};
use notiblog_notion::{ContentSource, Filter, PropertyNames, QueryRequest, Sort, map_page};

/// Settings for a [`Blog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogOptions {
    /// Database property names and the published status value
    pub properties: PropertyNames,

    /// Label of the aggregate tag entry
    pub all_label: String,
}

impl Default for BlogOptions {
    fn default() -> Self {
        Self {
            properties: PropertyNames::default(),
            all_label: DEFAULT_ALL_LABEL.to_string(),
        }
    }
}

/// Published posts and their bodies, read from a [`ContentSource`].
///
/// Every call queries the source afresh; nothing is cached between calls.
#[derive(Clone)]
pub struct Blog {
    source: Arc<dyn ContentSource>,
    options: BlogOptions,
}

impl Blog {
    /// Creates a blog over `source` with default options.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_options(source, BlogOptions::default())
    }

    /// Creates a blog over `source` with the given options.
    pub fn with_options(source: Arc<dyn ContentSource>, options: BlogOptions) -> Self {
        Self { source, options }
    }

    /// The blog's options.
    pub fn options(&self) -> &BlogOptions {
        &self.options
    }

    /// Status equals the published value.
    fn published(&self) -> Filter {
        let names = &self.options.properties;
        Filter::select_equals(&names.status, &names.published)
    }

    /// Lists published posts, newest first.
    ///
    /// With `tag`, only posts carrying exactly that tag are returned.
    /// Follows cursors until the source reports no more pages.
    pub async fn list_published_posts(&self, tag: Option<&str>) -> Result<Vec<Post>> {
        let names = &self.options.properties;
        let mut filters = vec![self.published()];
        if let Some(tag) = tag {
            filters.push(Filter::multi_select_contains(&names.tags, tag));
        }

        let request = QueryRequest::new()
            .with_filter(Filter::and(filters))
            .with_sort(Sort::descending(&names.date));
        let records = self.source.query_all(&request).await?;

        let posts: Vec<Post> = records.iter().map(|r| map_page(r, names)).collect();
        tracing::info!(
            source = self.source.name(),
            tag = tag.unwrap_or_default(),
            count = posts.len(),
            "Listed published posts"
        );
        Ok(posts)
    }

    /// Fetches a published post by exact slug, with its Markdown body.
    ///
    /// Returns `Ok(None)` when no published post has the slug. Source
    /// failures are returned as errors; see [`Blog::post_or_none`] for the
    /// lenient form.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostContent>> {
        if slug.is_empty() {
            return Ok(None);
        }

        let names = &self.options.properties;
        let request = QueryRequest::new()
            .with_filter(Filter::and(vec![
                self.published(),
                Filter::rich_text_equals(&names.slug, slug),
            ]))
            .with_page_size(1);
        let response = self.source.query_database(&request).await?;

        let Some(record) = response.results.first() else {
            tracing::debug!(slug, "No published post with slug");
            return Ok(None);
        };

        let post = map_page(record, names);
        let content = self.source.page_markdown(&post.id).await?;
        tracing::info!(slug, post_id = %post.id, bytes = content.len(), "Fetched post");
        Ok(Some(PostContent { post, content }))
    }

    /// Like [`Blog::get_post_by_slug`], but logs failures and reports them
    /// as not found.
    pub async fn post_or_none(&self, slug: &str) -> Option<PostContent> {
        match self.get_post_by_slug(slug).await {
            Ok(found) => found,
            Err(err) => {
                tracing::error!(slug, error = %err, "Failed to fetch post");
                None
            }
        }
    }

    /// The posts listed just before and after `post_id`, newest first.
    pub async fn adjacent_posts(&self, post_id: &str) -> Result<AdjacentPosts> {
        let posts = self.list_published_posts(None).await?;
        Ok(AdjacentPosts::locate(&posts, post_id))
    }
}
