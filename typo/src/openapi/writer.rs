//! JSON and YAML encoding of generated documents

use std::path::{Path, PathBuf};

use error_stack::Report;
use tracing::{debug, info};

use super::document::OpenApiDocument;
use crate::constants::{OPENAPI_JSON_FILE, OPENAPI_YAML_FILE};
use crate::error::{Error, Result};

/// Encode `document` as pretty-printed JSON
pub fn to_json(document: &OpenApiDocument) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| Report::new(Error::serialization_failed("JSON", e)))
}

/// Encode `document` as YAML
pub fn to_yaml(document: &OpenApiDocument) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| Report::new(Error::serialization_failed("YAML", e)))
}

/// Write `openapi.json` into `dir`, creating it as needed
pub fn write_json(document: &OpenApiDocument, dir: &Path) -> Result<PathBuf> {
    write_document(dir, OPENAPI_JSON_FILE, &to_json(document)?)
}

/// Write `openapi.yaml` into `dir`, creating it as needed
pub fn write_yaml(document: &OpenApiDocument, dir: &Path) -> Result<PathBuf> {
    write_document(dir, OPENAPI_YAML_FILE, &to_yaml(document)?)
}

fn write_document(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Report::new(Error::io_failed("create directory", dir, e)))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|e| Report::new(Error::io_failed("write", &path, e)))?;
    debug!(bytes = contents.len(), path = %path.display(), "Wrote OpenAPI document");
    info!("Generated OpenAPI document: {}", path.display());
    Ok(path)
}
