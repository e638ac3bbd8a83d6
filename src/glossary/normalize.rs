//! Reshapes upstream collection items into [`GlossaryItem`]s.
//!
//! Upstream items have no fixed schema: depending on the API version a field
//! may live at the top level, under an alternate name, or inside a nested
//! `fieldData` object. Each output field is resolved by walking an ordered list
//! of JSON pointers and taking the first present value.

use crate::glossary::GlossaryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Public page every glossary entry links to, suffixed with its slug.
pub const GLOSSARY_BASE_URL: &str = "https://hr-glossary.culturemonkey.io/blogs/";
/// Maximum number of entries returned to callers.
pub const ITEM_LIMIT: usize = 5;

const NAME_PATHS: &[&str] = &[
    "/name",
    "/title",
    "/name-field",
    "/fieldData/name",
    "/fieldData/title",
];
const SLUG_PATHS: &[&str] = &[
    "/slug",
    "/url-slug",
    "/fieldData/slug",
    "/fieldData/url-slug",
];
const DESCRIPTION_PATHS: &[&str] = &["/description", "/excerpt", "/fieldData/description"];

const DEFAULT_NAME: &str = "Untitled";

/// A normalized glossary entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub name: String,
    pub slug: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl GlossaryItem {
    /// Normalize a single upstream record. Non-object records get all defaults.
    pub fn from_upstream(item: &Value) -> Self {
        let slug = resolve(item, SLUG_PATHS).unwrap_or_default();
        Self {
            name: resolve(item, NAME_PATHS).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            url: format!("{GLOSSARY_BASE_URL}{slug}"),
            slug,
            description: resolve(item, DESCRIPTION_PATHS).unwrap_or_default(),
            id: resolve_id(item),
        }
    }
}

/// `_id` when present, otherwise `id` exactly as sent, even if empty.
fn resolve_id(item: &Value) -> Option<String> {
    resolve(item, &["/_id"]).or_else(|| {
        item.pointer("/id")
            .filter(|value| !value.is_null())
            .map(render)
    })
}

/// Locate the item collection inside a parsed upstream payload.
///
/// A bare array is the collection itself. Otherwise the first present value
/// of `items` then `fieldData` is used and must be an array; when neither is
/// present the collection is empty.
pub fn extract_items(data: &Value) -> Result<&[Value], GlossaryError> {
    if let Value::Array(items) = data {
        return Ok(items.as_slice());
    }
    if data.is_null() {
        return Err(GlossaryError::UnexpectedShape("null".to_string()));
    }

    let candidate = ["items", "fieldData"]
        .into_iter()
        .find_map(|key| data.get(key).filter(|value| is_present(value)).map(|value| (key, value)));

    match candidate {
        None => Ok(&[][..]),
        Some((_, Value::Array(items))) => Ok(items.as_slice()),
        Some((key, other)) => Err(GlossaryError::UnexpectedShape(format!(
            "`{key}` is {}",
            kind(other)
        ))),
    }
}

/// Extract, normalize and truncate to at most `limit` items, keeping order.
pub fn normalize_items(data: &Value, limit: usize) -> Result<Vec<GlossaryItem>, GlossaryError> {
    let items = extract_items(data)?;
    info!(stage = "normalize", items_found = items.len(), "Items found");

    if let Some(first) = items.first() {
        let fields: Vec<&str> = first
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        debug!(stage = "normalize", sample_fields = ?fields, sample = %first, "First item sample");
    }

    let normalized: Vec<GlossaryItem> = items
        .iter()
        .take(limit)
        .map(GlossaryItem::from_upstream)
        .collect();

    info!(
        stage = "normalize",
        returned = normalized.len(),
        "Returning transformed items"
    );
    if let Some(first) = normalized.first() {
        debug!(stage = "normalize", sample = ?first, "Sample transformed item");
    }
    Ok(normalized)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First present value among `paths`, rendered as a string.
fn resolve(item: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| item.pointer(path))
        .find(|value| is_present(value))
        .map(render)
}

/// Null, `false`, zero and `""` are treated as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_strings_fall_through_to_next_alias() {
        let item = json!({ "name": "", "title": "Attrition" });
        assert_eq!(resolve(&item, NAME_PATHS), Some("Attrition".to_string()));
    }

    #[test]
    fn numeric_ids_are_rendered_as_text() {
        let item = json!({ "id": 42 });
        assert_eq!(GlossaryItem::from_upstream(&item).id, Some("42".to_string()));
    }

    #[test]
    fn zero_and_false_count_as_missing() {
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(false)));
        assert!(is_present(&json!({})));
    }

    #[test]
    fn non_object_items_get_defaults() {
        let item = GlossaryItem::from_upstream(&json!("just a string"));
        assert_eq!(item.name, "Untitled");
        assert_eq!(item.slug, "");
        assert_eq!(item.url, GLOSSARY_BASE_URL);
        assert_eq!(item.id, None);
    }

    #[test]
    fn empty_id_is_kept_when_no_underscore_id() {
        let item = GlossaryItem::from_upstream(&json!({ "_id": "", "id": "" }));
        assert_eq!(item.id, Some(String::new()));

        let item = GlossaryItem::from_upstream(&json!({ "_id": "a1", "id": "b2" }));
        assert_eq!(item.id.as_deref(), Some("a1"));

        let item = GlossaryItem::from_upstream(&json!({ "id": null }));
        assert_eq!(item.id, None);
    }

    #[test]
    fn empty_id_is_serialized() {
        let item = GlossaryItem::from_upstream(&json!({ "name": "A", "id": "" }));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["_id"], "");
    }

    #[test]
    fn non_array_items_value_is_rejected() {
        let data = json!({ "items": {}, "fieldData": [{ "name": "A" }] });
        assert!(matches!(
            extract_items(&data),
            Err(GlossaryError::UnexpectedShape(msg)) if msg == "`items` is an object"
        ));
    }

    #[test]
    fn falsy_items_value_defers_to_field_data() {
        let data = json!({ "items": null, "fieldData": [{ "name": "A" }] });
        assert_eq!(extract_items(&data).unwrap().len(), 1);

        let data = json!({ "items": "", "fieldData": [] });
        assert!(extract_items(&data).unwrap().is_empty());
    }

    #[test]
    fn null_payload_is_rejected() {
        assert!(extract_items(&Value::Null).is_err());
        assert!(extract_items(&json!(7)).unwrap().is_empty());
    }
}
