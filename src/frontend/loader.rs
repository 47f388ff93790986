use crate::core::ApiDescription;
use crate::errors::{GenError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads an API description produced by the external header parser.
pub fn load_api(path: &Path) -> Result<ApiDescription> {
    let content = fs::read_to_string(path).map_err(|source| GenError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let api = parse_api(&content).map_err(|source| GenError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        enums = api.enums.len(),
        structs = api.structs.len(),
        funcs = api.funcs.len(),
        "loaded API description"
    );
    Ok(api)
}

pub fn parse_api(content: &str) -> std::result::Result<ApiDescription, serde_json::Error> {
    serde_json::from_str(content)
}
