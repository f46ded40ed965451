//! Block tree to Markdown conversion.
//!
//! A page body arrives as a tree of blocks. [`blocks_to_markdown`] walks the
//! tree and emits GitHub-flavoured Markdown: consecutive list items are
//! separated by single newlines, every other block by a blank line, and
//! nested children are indented under their list marker or prefixed inside
//! quotes. Block types without a Markdown form are skipped.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One content block.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    /// Block id
    pub id: String,

    /// Block type, also the key of its payload
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the block has nested children to fetch
    #[serde(default)]
    pub has_children: bool,

    /// Remaining fields, including the type-keyed payload
    #[serde(flatten)]
    pub data: Map<String, Value>,

    /// Fetched children
    #[serde(skip)]
    pub children: Vec<Block>,
}

impl Block {
    /// The type-specific payload object.
    pub fn payload(&self) -> Option<&Value> {
        self.data.get(&self.kind)
    }

    /// Rich-text segments of the payload under `key`.
    fn segments(&self, key: &str) -> Vec<RichText> {
        self.payload()
            .and_then(|p| p.get(key))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    fn text(&self) -> String {
        rich_text_to_markdown(&self.segments("rich_text"))
    }

    fn plain_text(&self) -> String {
        self.segments("rich_text")
            .iter()
            .map(|s| s.plain_text.as_str())
            .collect()
    }

    fn payload_str(&self, pointer: &str) -> Option<&str> {
        self.payload()?.pointer(pointer)?.as_str()
    }

    fn payload_bool(&self, key: &str) -> bool {
        self.payload()
            .and_then(|p| p.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether children should be fetched for this block. Child pages and
    /// databases are separate documents.
    pub fn wants_children(&self) -> bool {
        self.has_children && !matches!(self.kind.as_str(), "child_page" | "child_database")
    }
}

/// One rich-text segment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    /// Segment type: `text`, `mention` or `equation`
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Unformatted text (the expression, for equations)
    #[serde(default)]
    pub plain_text: String,

    /// Link target
    #[serde(default)]
    pub href: Option<String>,

    /// Inline styling
    #[serde(default)]
    pub annotations: Annotations,
}

/// Inline styling of a rich-text segment.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// Renders rich-text segments as inline Markdown.
///
/// ```
/// use notiblog_notion::blocks::{RichText, rich_text_to_markdown};
///
/// let segments: Vec<RichText> = serde_json::from_value(serde_json::json!([
///     { "type": "text", "plain_text": "plain " },
///     { "type": "text", "plain_text": "bold", "annotations": { "bold": true } }
/// ])).unwrap();
/// assert_eq!(rich_text_to_markdown(&segments), "plain **bold**");
/// ```
pub fn rich_text_to_markdown(segments: &[RichText]) -> String {
    segments.iter().map(segment_to_markdown).collect()
}

fn segment_to_markdown(segment: &RichText) -> String {
    if segment.kind == "equation" {
        return format!("${}$", segment.plain_text);
    }

    let a = segment.annotations;
    let mut text = if a.code {
        format!("`{}`", segment.plain_text)
    } else {
        segment.plain_text.clone()
    };
    if a.bold {
        text = wrap(&text, "**");
    }
    if a.italic {
        text = wrap(&text, "_");
    }
    if a.strikethrough {
        text = wrap(&text, "~~");
    }
    match &segment.href {
        Some(href) if !text.trim().is_empty() => format!("[{text}]({href})"),
        _ => text,
    }
}

/// Wraps the non-whitespace core of `text` in `marker`.
///
/// Emphasis markers next to whitespace do not parse, so surrounding
/// whitespace stays outside.
fn wrap(text: &str, marker: &str) -> String {
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let start = text.len() - text.trim_start().len();
    let end = start + core.len();
    format!("{}{marker}{core}{marker}{}", &text[..start], &text[end..])
}

/// Renders a block tree as Markdown.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut prev_was_list = false;
    let mut number = 0usize;

    for block in blocks {
        let is_list = is_list_item(block);
        number = if block.kind == "numbered_list_item" {
            number + 1
        } else {
            0
        };

        let Some(rendered) = render_block(block, number) else {
            continue;
        };
        if !out.is_empty() {
            out.push_str(if is_list && prev_was_list { "\n" } else { "\n\n" });
        }
        out.push_str(&rendered);
        prev_was_list = is_list;
    }

    out
}

fn is_list_item(block: &Block) -> bool {
    matches!(
        block.kind.as_str(),
        "bulleted_list_item" | "numbered_list_item" | "to_do"
    )
}

fn render_block(block: &Block, number: usize) -> Option<String> {
    let rendered = match block.kind.as_str() {
        "paragraph" => {
            let text = block.text();
            with_children(text, block)
        }
        "heading_1" | "heading_2" | "heading_3" => {
            let level = block.kind[block.kind.len() - 1..].parse::<usize>().unwrap_or(1);
            let heading = format!("{} {}", "#".repeat(level), block.text());
            with_children(heading, block)
        }
        "bulleted_list_item" => list_item("- ", block),
        "numbered_list_item" => list_item(&format!("{number}. "), block),
        "to_do" => {
            let marker = if block.payload_bool("checked") {
                "- [x] "
            } else {
                "- [ ] "
            };
            list_item(marker, block)
        }
        "quote" => quoted(block.text(), block),
        "callout" => {
            let text = match block.payload_str("/icon/emoji") {
                Some(emoji) => format!("{emoji} {}", block.text()),
                None => block.text(),
            };
            quoted(text, block)
        }
        "code" => {
            let language = match block.payload_str("/language") {
                Some("plain text") | None => "text",
                Some(language) => language,
            };
            format!("```{language}\n{}\n```", block.plain_text())
        }
        "equation" => format!("$$\n{}\n$$", block.payload_str("/expression").unwrap_or("")),
        "divider" => "---".to_string(),
        "image" => {
            let url = file_url(block)?;
            let caption = caption(block);
            format!("![{caption}]({url})")
        }
        "video" | "file" | "pdf" | "audio" => {
            let url = file_url(block)?;
            let caption = caption(block);
            let label = if caption.is_empty() { url.clone() } else { caption };
            format!("[{label}]({url})")
        }
        "bookmark" | "embed" | "link_preview" => {
            let url = block.payload_str("/url")?.to_string();
            let caption = caption(block);
            let label = if caption.is_empty() { url.clone() } else { caption };
            format!("[{label}]({url})")
        }
        "toggle" => {
            let body = blocks_to_markdown(&block.children);
            format!(
                "<details>\n<summary>{}</summary>\n\n{body}\n\n</details>",
                block.text()
            )
        }
        "table" => table(block),
        "column_list" | "column" | "synced_block" => blocks_to_markdown(&block.children),
        other => {
            tracing::debug!(block_id = %block.id, kind = other, "Skipping unsupported block");
            return None;
        }
    };

    (!rendered.trim().is_empty()).then_some(rendered)
}

/// Appends children after the block at the same level.
fn with_children(text: String, block: &Block) -> String {
    if block.children.is_empty() {
        return text;
    }
    let children = blocks_to_markdown(&block.children);
    if text.is_empty() {
        children
    } else {
        format!("{text}\n\n{children}")
    }
}

/// A list item with its children indented under the marker.
fn list_item(marker: &str, block: &Block) -> String {
    let mut item = format!("{marker}{}", block.text());
    if !block.children.is_empty() {
        let indent = " ".repeat(marker.len().clamp(2, 4));
        for line in blocks_to_markdown(&block.children).lines() {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(&indent);
                item.push_str(line);
            }
        }
    }
    item
}

/// A block quote with its children quoted too.
fn quoted(text: String, block: &Block) -> String {
    let body = with_children(text, block);
    body.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn file_url(block: &Block) -> Option<String> {
    block
        .payload_str("/external/url")
        .or_else(|| block.payload_str("/file/url"))
        .map(str::to_string)
}

fn caption(block: &Block) -> String {
    block
        .segments("caption")
        .iter()
        .map(|s| s.plain_text.as_str())
        .collect()
}

/// A pipe table from `table_row` children. The first row is the header.
fn table(block: &Block) -> String {
    let rows: Vec<Vec<String>> = block
        .children
        .iter()
        .filter(|row| row.kind == "table_row")
        .map(|row| {
            row.payload()
                .and_then(|p| p.get("cells"))
                .and_then(|v| serde_json::from_value::<Vec<Vec<RichText>>>(v.clone()).ok())
                .unwrap_or_default()
                .iter()
                .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
                .collect()
        })
        .collect();

    let Some(header) = rows.first() else {
        return String::new();
    };
    let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let line = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(width, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = vec![line(header), format!("|{}", " --- |".repeat(width))];
    lines.extend(rows[1..].iter().map(|row| line(row)));
    lines.join("\n")
}
