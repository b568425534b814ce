//! Snapshot loading
//!
//! Snapshots are JSON files, or YAML when the extension is `.yaml`/`.yml`.

use serde_json::Value;
use std::path::Path;

/// Read a snapshot file into a value tree.
pub fn load_object(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let value = if matches!(extension.as_str(), "yaml" | "yml") {
        serde_yaml::from_str(&text)
            .map_err(|e| format!("invalid YAML in {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&text)
            .map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))?
    };

    Ok(value)
}
