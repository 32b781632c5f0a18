use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;
use tracing::debug;

/// A source PDF loaded into memory.
pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        debug!(path = %path_str, pages = doc.get_pages().len(), "opened document");
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// File name for messages, falling back to the full path.
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::write_sample_pdf;

    #[test]
    fn test_open_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_pdf(dir.path(), "sample.pdf", "S", 4);

        let doc = PdfDocument::open(&path).unwrap();
        assert_eq!(doc.page_count(), 4);
        assert_eq!(doc.file_name(), "sample.pdf");

        let numbers: Vec<u32> = doc.page_ids().into_iter().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_open_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfDocument::open(&path).err().unwrap();
        assert!(err.to_string().starts_with("Failed to open PDF"));
    }
}
