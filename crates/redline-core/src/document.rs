//! The document picked for review and its pre-upload validation.
//!
//! A [`SelectedFile`] carries the *reported* MIME type, the same way a
//! browser file input does: sniffed from the leading bytes when the format
//! has a signature, otherwise derived from the extension. Validation accepts
//! a file when either the reported type or the extension is on the
//! allow-list, so a mislabelled `.pdf` still gets through.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::error::{Error, Result};

/// Largest accepted upload (15 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_UNKNOWN: &str = "application/octet-stream";

/// MIME types the review service accepts.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_DOCX, MIME_PDF, MIME_TEXT];

/// Extensions accepted when the reported MIME type is missing or wrong.
pub const ALLOWED_EXTENSIONS: &[&str] = &["docx", "pdf", "txt"];

/// Number of leading bytes read for type sniffing
const SNIFF_LEN: usize = 8;

/// Reasons a file is rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File is too large ({}). The limit is {}.", format_size(*.size), format_size(*.limit))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type: {name} ({mime}). Use a .docx, .pdf or .txt file.")]
    UnsupportedType { name: String, mime: String },
}

/// The single file currently chosen for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl SelectedFile {
    /// Build a selection from a path on disk.
    ///
    /// Fails when the path does not exist, is not a regular file, or cannot
    /// be opened for sniffing.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|e| Error::unreadable(path, e.to_string()))?;
        if !metadata.is_file() {
            return Err(Error::unreadable(path, "not a regular file"));
        }

        let mut header = [0u8; SNIFF_LEN];
        let read = File::open(path)
            .and_then(|mut f| f.read(&mut header))
            .map_err(|e| Error::unreadable(path, e.to_string()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = reported_mime(&name, &header[..read]).to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime,
        })
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// File name without its final extension, used to name exports
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }

    /// Human readable size ("1.2 MB")
    pub fn display_size(&self) -> String {
        format_size(self.size)
    }
}

/// Check a selection against the size limit and the type allow-list.
pub fn validate(file: &SelectedFile) -> std::result::Result<(), ValidationError> {
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: file.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let mime_ok = ALLOWED_MIME_TYPES.contains(&file.mime.as_str());
    let ext_ok = file
        .extension()
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    if !mime_ok && !ext_ok {
        return Err(ValidationError::UnsupportedType {
            name: file.name.clone(),
            mime: if file.mime.is_empty() {
                "unknown type".to_string()
            } else {
                file.mime.clone()
            },
        });
    }

    Ok(())
}

/// Determine the MIME type a file reports, from its signature first and its
/// extension second.
pub fn reported_mime(name: &str, header: &[u8]) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if header.starts_with(b"%PDF-") {
        return MIME_PDF;
    }
    if header.starts_with(b"PK\x03\x04") {
        // Office documents are zip containers; only the name tells them apart
        return match ext.as_str() {
            "docx" => MIME_DOCX,
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            _ => "application/zip",
        };
    }

    match ext.as_str() {
        "docx" => MIME_DOCX,
        "pdf" => MIME_PDF,
        "txt" | "text" => MIME_TEXT,
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "rtf" => "application/rtf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => MIME_UNKNOWN,
    }
}

/// File name without its final extension (`deal` for `deal.docx`).
///
/// A leading dot is part of the name, so `.env` is its own stem.
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Format a byte count the way the UI shows it ("512 B", "1.5 KB", "15 MB")
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < MIB {
        trim_decimal(b / KIB, "KB")
    } else {
        trim_decimal(b / MIB, "MB")
    }
}

fn trim_decimal(value: f64, unit: &str) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{:.0} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn file(name: &str, size: u64, mime: &str) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            mime: mime.to_string(),
        }
    }

    #[test]
    fn test_accepts_allowed_types_under_limit() {
        assert!(validate(&file("a.docx", 1024, MIME_DOCX)).is_ok());
        assert!(validate(&file("a.pdf", MAX_UPLOAD_BYTES, MIME_PDF)).is_ok());
        assert!(validate(&file("a.txt", 0, MIME_TEXT)).is_ok());
    }

    #[test]
    fn test_rejects_oversize_regardless_of_type() {
        let err = validate(&file("a.pdf", MAX_UPLOAD_BYTES + 1, MIME_PDF)).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));

        let err = validate(&file("a.exe", MAX_UPLOAD_BYTES + 1, MIME_UNKNOWN)).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { .. }));
    }

    #[test]
    fn test_rejects_when_both_mime_and_extension_disallowed() {
        let err = validate(&file("photo.png", 10, "image/png")).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
        assert!(err.to_string().contains("photo.png"));
    }

    #[test]
    fn test_extension_is_fallback_for_bad_mime() {
        assert!(validate(&file("contract.PDF", 10, "")).is_ok());
        assert!(validate(&file("notes.txt", 10, MIME_UNKNOWN)).is_ok());
    }

    #[test]
    fn test_mime_alone_is_enough() {
        assert!(validate(&file("contract.bin", 10, MIME_PDF)).is_ok());
        assert!(validate(&file("README", 10, MIME_TEXT)).is_ok());
    }

    #[test]
    fn test_reported_mime_sniffs_pdf_signature() {
        assert_eq!(reported_mime("scan.bin", b"%PDF-1.7"), MIME_PDF);
    }

    #[test]
    fn test_reported_mime_zip_container_uses_extension() {
        assert_eq!(reported_mime("deal.docx", b"PK\x03\x04abcd"), MIME_DOCX);
        assert_eq!(reported_mime("deal.zip", b"PK\x03\x04abcd"), "application/zip");
    }

    #[test]
    fn test_reported_mime_unknown_extension() {
        assert_eq!(reported_mime("blob.xyz", b"\x00\x01"), MIME_UNKNOWN);
        assert_eq!(reported_mime("Makefile", b"all:"), MIME_UNKNOWN);
    }

    #[test]
    fn test_from_path_reads_size_and_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("term-sheet.pdf");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"%PDF-1.4 body").unwrap();

        let selected = SelectedFile::from_path(&path).unwrap();
        assert_eq!(selected.name, "term-sheet.pdf");
        assert_eq!(selected.size, 13);
        assert_eq!(selected.mime, MIME_PDF);
        assert_eq!(selected.stem(), "term-sheet");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SelectedFile::from_path(dir.path().join("nope.pdf")).unwrap_err();
        assert!(matches!(err, Error::Unreadable { .. }));
    }

    #[test]
    fn test_from_path_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let err = SelectedFile::from_path(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_file_stem_matches_selected_stem() {
        assert_eq!(file_stem("deal.docx"), "deal");
        assert_eq!(file_stem("deal.v2.pdf"), "deal.v2");
        assert_eq!(file_stem(".env"), ".env");
        assert_eq!(file_stem("README"), "README");
        let selected = file("deal.v2.pdf", 1, MIME_PDF);
        assert_eq!(selected.stem(), file_stem(&selected.name));
    }

    #[test]
    fn test_stem_without_extension() {
        assert_eq!(file("LICENSE", 1, MIME_TEXT).stem(), "LICENSE");
        assert_eq!(file(".env", 1, MIME_TEXT).stem(), ".env");
        assert_eq!(file("a.b.txt", 1, MIME_TEXT).stem(), "a.b");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(MAX_UPLOAD_BYTES), "15 MB");
    }
}
