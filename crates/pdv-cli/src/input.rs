//! Loading documents and configuration from disk.

use std::path::Path;

use anyhow::{Context, Result};
use pdv_schema::PdvConfig;
use serde_json::Value;

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Read a file as raw bytes.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

/// Read and parse a YAML or JSON document.
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes = read_bytes(path)?;
    pdv_core::parse_document(&bytes).with_context(|| format!("cannot parse {}", path.display()))
}

/// Load the configuration document, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PdvConfig> {
    match path {
        Some(path) => {
            let text = read_text(path)?;
            let config = PdvConfig::from_yaml_str(&text)
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(PdvConfig::default()),
    }
}
