use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::converter::ConversionResult;
use crate::error::ConvertError;

pub const TEXT_MIME: &str = "text/plain; charset=utf-8";

/// Write `result.text` as UTF-8 to `dir/result.output_name`.
pub fn save(result: &ConversionResult, dir: &Path) -> Result<PathBuf, ConvertError> {
    let path = dir.join(&result.output_name);
    fs::write(&path, result.text.as_bytes()).map_err(|source| ConvertError::WriteFailure {
        path: path.clone(),
        source,
    })?;
    info!(
        "Saved {} ({} bytes, {})",
        path.display(),
        result.text.len(),
        TEXT_MIME
    );
    Ok(path)
}
