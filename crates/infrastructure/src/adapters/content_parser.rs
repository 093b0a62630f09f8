//! Extracts headline and caption from chat completion text.
//!
//! Models asked for JSON do not always return clean JSON. The whole text, or
//! failing that its outermost `{ … }` block, is read as a JSON object. Only
//! when neither is an object does a line-by-line scan for `headline`/`caption`
//! labels run. An object without a usable pair is final.

use domain::TextContent;
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

/// Parse model output into [`TextContent`]
///
/// Returns `None` when no strategy finds both a headline and a caption.
pub fn parse_text_content(raw: &str) -> Option<TextContent> {
    match json_object(raw) {
        Some(object) => content_from_object(&object),
        None => parse_labelled_lines(raw),
    }
}

fn json_object(raw: &str) -> Option<JsonObject> {
    parse_object(raw).or_else(|| embedded_json(raw).and_then(parse_object))
}

fn parse_object(text: &str) -> Option<JsonObject> {
    serde_json::from_str::<JsonObject>(text.trim()).ok()
}

fn content_from_object(object: &JsonObject) -> Option<TextContent> {
    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };
    Some(TextContent::new(field("headline")?, field("caption")?))
}

fn embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_labelled_lines(text: &str) -> Option<TextContent> {
    let headline = labelled_value(text, "headline")?;
    let caption = labelled_value(text, "caption")?;
    Some(TextContent::new(headline, caption))
}

/// Value on the first line mentioning `label` (ASCII, case-insensitive)
fn labelled_value(text: &str, label: &str) -> Option<String> {
    text.lines().find_map(|line| {
        // ASCII lowercasing keeps byte offsets aligned with `line`
        let at = line.to_ascii_lowercase().find(label)?;
        let rest = line[at + label.len()..]
            .trim_start_matches(['"', '\''])
            .trim_start()
            .trim_start_matches(':')
            .trim_start();
        let value: String = rest.chars().filter(|c| !matches!(c, '"' | ',')).collect();
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
