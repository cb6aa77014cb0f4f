//! Diagnostic serialization.
//!
//! The output is JSON text for logs and error reports. It is not a
//! persistence format: regexes, sets and other host objects lose their
//! content. Exchange trees through [`crate::tree`] instead.

use serde_json::{Map, Value as Json};

use crate::node::Node;
use crate::tree::encode_tree;

/// `{ ...tree, "$description": description }` with infinities, NaN,
/// functions and regexes spelled as strings. A missing description is
/// written as the empty string.
pub fn serialized_schema(tree: &Node, description: Option<&str>) -> String {
    let mut fields = match encode_tree(tree).to_json(true) {
        Some(Json::Object(fields)) => fields,
        _ => Map::new(),
    };
    fields.insert(
        "$description".to_string(),
        Json::String(description.unwrap_or_default().to_string()),
    );
    Json::Object(fields).to_string()
}
