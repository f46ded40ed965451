//! Page record to [`Post`] mapping.
//!
//! Page records are loosely typed JSON. Every access here is total: a
//! missing property, a wrong type, or a null value degrades to an empty
//! string or `None`, never to an error.

use notiblog_core::Post;
use serde_json::Value;

use crate::config::PropertyNames;

/// Maps one raw page record to a [`Post`].
///
/// ```
/// use notiblog_notion::{PropertyNames, map_page};
/// use serde_json::json;
///
/// let page = json!({
///     "id": "abc",
///     "properties": {
///         "Title": { "type": "title", "title": [{ "plain_text": "Hello" }] },
///         "Tags": { "type": "multi_select", "multi_select": [{ "name": "rust" }] }
///     }
/// });
/// let post = map_page(&page, &PropertyNames::default());
/// assert_eq!(post.title, "Hello");
/// assert_eq!(post.tags, ["rust"]);
/// assert_eq!(post.slug, "abc");
/// ```
pub fn map_page(page: &Value, names: &PropertyNames) -> Post {
    let id = page
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let slug = text_property(page, &names.slug, "rich_text");
    let slug = if slug.is_empty() { id.clone() } else { slug };

    Post {
        title: text_property(page, &names.title, "title"),
        description: text_property(page, &names.description, "rich_text"),
        cover_image: cover_url(page.get("cover")),
        tags: multi_select_names(page, &names.tags),
        author: first_person_name(page, &names.author),
        date: date_start(page, &names.date),
        modified_date: date_start(page, &names.modified_date),
        slug,
        id,
    }
}

/// Looks up a property by name.
pub fn property<'a>(page: &'a Value, name: &str) -> Option<&'a Value> {
    page.get("properties")?.get(name)
}

/// Concatenates the `plain_text` of every rich-text segment.
///
/// Anything that is not an array of segments yields an empty string.
pub fn rich_text_plain(segments: Option<&Value>) -> String {
    segments
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves a cover image URL from an `external` or uploaded `file` cover.
pub fn cover_url(cover: Option<&Value>) -> Option<String> {
    let cover = cover?;
    let url = match cover.get("type").and_then(Value::as_str)? {
        "external" => cover.pointer("/external/url"),
        "file" | "file_upload" => cover.pointer("/file/url"),
        _ => None,
    };
    url.and_then(Value::as_str).map(str::to_string)
}

fn text_property(page: &Value, name: &str, kind: &str) -> String {
    rich_text_plain(property(page, name).and_then(|p| p.get(kind)))
}

fn multi_select_names(page: &Value, name: &str) -> Vec<String> {
    property(page, name)
        .and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn first_person_name(page: &Value, name: &str) -> String {
    property(page, name)
        .and_then(|p| p.pointer("/people/0/name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn date_start(page: &Value, name: &str) -> Option<String> {
    property(page, name)
        .and_then(|p| p.pointer("/date/start"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn full_page() -> Value {
        json!({
            "object": "page",
            "id": "page-1",
            "cover": { "type": "external", "external": { "url": "https://img.example/c.png" } },
            "properties": {
                "Title": {
                    "type": "title",
                    "title": [{ "plain_text": "Hello, " }, { "plain_text": "World" }]
                },
                "Description": { "type": "rich_text", "rich_text": [{ "plain_text": "Intro" }] },
                "Tags": {
                    "type": "multi_select",
                    "multi_select": [{ "name": "rust" }, { "name": "Next JS" }]
                },
                "Author": { "type": "people", "people": [{ "name": "Kim" }, { "name": "Lee" }] },
                "Date": { "type": "date", "date": { "start": "2024-03-15" } },
                "Modified Date": { "type": "date", "date": { "start": "2024-03-20" } },
                "Slug": { "type": "rich_text", "rich_text": [{ "plain_text": "hello-world" }] },
                "Status": { "type": "select", "select": { "name": "Published" } }
            }
        })
    }

    #[test]
    fn test_map_full_page() {
        let post = map_page(&full_page(), &PropertyNames::default());
        assert_eq!(post.id, "page-1");
        assert_eq!(post.title, "Hello, World");
        assert_eq!(post.description, "Intro");
        assert_eq!(post.cover_image.as_deref(), Some("https://img.example/c.png"));
        assert_eq!(post.tags, ["rust", "Next JS"]);
        assert_eq!(post.author, "Kim");
        assert_eq!(post.date.as_deref(), Some("2024-03-15"));
        assert_eq!(post.modified_date.as_deref(), Some("2024-03-20"));
        assert_eq!(post.slug, "hello-world");
    }

    #[test]
    fn test_map_bare_page_defaults() {
        let post = map_page(&json!({ "id": "bare" }), &PropertyNames::default());
        assert_eq!(post, Post::new("bare"));
    }

    #[test]
    fn test_map_nulls_and_wrong_types() {
        let page = json!({
            "id": "p",
            "cover": null,
            "properties": {
                "Title": { "type": "title", "title": [] },
                "Description": { "type": "rich_text", "rich_text": "not an array" },
                "Tags": { "type": "multi_select", "multi_select": [{ "id": "x" }] },
                "Author": { "type": "people", "people": [] },
                "Date": { "type": "date", "date": null },
                "Slug": { "type": "rich_text", "rich_text": [] }
            }
        });
        let post = map_page(&page, &PropertyNames::default());
        assert_eq!(post.title, "");
        assert_eq!(post.description, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.author, "");
        assert_eq!(post.date, None);
        assert_eq!(post.cover_image, None);
        assert_eq!(post.slug, "p");
    }

    #[test]
    fn test_map_custom_property_names() {
        let page = json!({
            "id": "p",
            "properties": {
                "Name": { "type": "title", "title": [{ "plain_text": "Custom" }] },
                "URL": { "type": "rich_text", "rich_text": [{ "plain_text": "custom" }] }
            }
        });
        let names = PropertyNames {
            title: "Name".to_string(),
            slug: "URL".to_string(),
            ..Default::default()
        };
        let post = map_page(&page, &names);
        assert_eq!(post.title, "Custom");
        assert_eq!(post.slug, "custom");
    }

    #[test]
    fn test_cover_kinds() {
        let file = json!({ "type": "file", "file": { "url": "https://s3/f.png", "expiry_time": "x" } });
        assert_eq!(cover_url(Some(&file)).as_deref(), Some("https://s3/f.png"));

        let upload = json!({ "type": "file_upload", "file": { "url": "https://s3/u.png" } });
        assert_eq!(cover_url(Some(&upload)).as_deref(), Some("https://s3/u.png"));

        let missing_url = json!({ "type": "file", "file": {} });
        assert_eq!(cover_url(Some(&missing_url)), None);

        let other = json!({ "type": "emoji", "emoji": "🦀" });
        assert_eq!(cover_url(Some(&other)), None);

        assert_eq!(cover_url(None), None);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::hash_map(
                    "type|title|rich_text|plain_text|name|people|date|start|url|file|external",
                    inner,
                    0..4
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_mapping_is_total(
            id in "[a-f0-9]{1,12}",
            title in arb_json(),
            slug in arb_json(),
            tags in arb_json(),
            cover in arb_json(),
        ) {
            let page = json!({
                "id": id,
                "cover": cover,
                "properties": { "Title": title, "Slug": slug, "Tags": tags }
            });
            let post = map_page(&page, &PropertyNames::default());

            prop_assert_eq!(&post.id, &id);
            prop_assert!(!post.slug.is_empty());
        }
    }
}
