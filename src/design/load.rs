use std::path::Path;

use anyhow::Context;

use super::types::Api;

/// Loads a design document from YAML (`.yaml`/`.yml`) or JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a design graph.
pub fn load_design(file_path: &Path) -> anyhow::Result<Api> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read design file {file_path:?}"))?;
    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let api: Api = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML design {file_path:?}"))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON design {file_path:?}"))?
    };
    Ok(api)
}
