use serde_json::{Map, Value};

use std::fs;
use std::path::Path;

use crate::order::OrderError;

/// Substitutes the computed order values into a merged order.
///
/// The merged order is serialized to a single line, the placeholder tokens
/// are replaced literally, and the result is re-parsed. A parse failure
/// means a substituted value collided with the JSON structure, which is
/// fatal for the batch.
pub fn render(
    merged: &Map<String, Value>,
    order_id: &str,
    product_id: &str,
    product_type: &str,
    download_url: &str,
) -> Result<String, OrderError> {
    let serialized =
        serde_json::to_string(merged).map_err(OrderError::RenderValidation)?;

    let rendered = serialized
        .replace("ORDER_ID", order_id)
        .replace("SCENE_ID", product_id)
        .replace("PRODUCT_TYPE", product_type)
        .replace("DOWNLOAD_URL", download_url);

    // Validate again, since the replacements bypassed the serializer
    serde_json::from_str::<Value>(&rendered).map_err(OrderError::RenderValidation)?;

    Ok(rendered)
}

/// Writes a rendered order to the shared transient artifact path.
/// Each product in a batch overwrites the previous one.
pub fn write_artifact(rendered: &str, path: &Path) -> Result<(), OrderError> {
    fs::write(path, rendered)?;
    Ok(())
}
