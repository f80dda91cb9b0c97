use std::path::Path;

use crate::AnalysisError;

/// File extensions accepted for analysis. Anything else is rejected before
/// decoding begins.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["wav", "aiff", "flac", "ogg", "mp3"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

pub fn ensure_supported(path: &Path) -> Result<(), AnalysisError> {
    if is_supported(path) {
        Ok(())
    } else {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string();
        Err(AnalysisError::UnsupportedFormat(ext))
    }
}
