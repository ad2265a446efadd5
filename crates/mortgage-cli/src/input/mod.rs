pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input from `--input <path>` or piped stdin.
///
/// Returns `Ok(None)` when neither is available so the caller can fall back
/// to individual flags.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return Ok(Some(file::read_input(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading input from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}
