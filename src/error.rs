use std::io::Read;
use std::path::{Path, PathBuf};

use crate::extract::extract_items;
use crate::types::{ConflictUnit, ExtractedItem};

/// Problems with the input handed to a modal, reported before any UI opens.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input as JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("No numbered items found in input")]
    NoItems,
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(read_err)
}

pub fn parse_unit(text: &str) -> Result<ConflictUnit, InputError> {
    serde_json::from_str(text).map_err(InputError::Json)
}

/// A JSON array of items, or free text from which numbered items are extracted.
pub fn parse_items(text: &str) -> Result<Vec<ExtractedItem>, InputError> {
    let items = if text.trim_start().starts_with('[') {
        serde_json::from_str(text).map_err(InputError::Json)?
    } else {
        extract_items(text)
    };
    if items.is_empty() {
        return Err(InputError::NoItems);
    }
    Ok(items)
}
