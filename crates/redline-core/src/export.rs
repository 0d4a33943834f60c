//! File names and payloads for review exports

use crate::error::Result;
use crate::review::NormalizedResult;

/// Suffix appended to the source file's stem
pub const EXPORT_SUFFIX: &str = "-review";

/// Export file name for a source document: `deal.docx` becomes
/// `deal-review.json` (or `.html`). Without a source, `review.json`.
pub fn export_file_name(source_stem: Option<&str>, extension: &str) -> String {
    match source_stem.map(sanitize_stem).filter(|s| !s.is_empty()) {
        Some(stem) => format!("{}{}.{}", stem, EXPORT_SUFFIX, extension),
        None => format!("review.{}", extension),
    }
}

/// Replace path separators and control characters so the stem is a plain
/// file name
fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Pretty JSON of the normalized document (or raw body when opaque)
pub fn json_export(result: &NormalizedResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result.export_value())?)
}
