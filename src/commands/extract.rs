use crate::commands::error_message;
use crate::console::{clean_path, Console};
use crate::error::FlowError;
use crate::page_range::{parse_page_selection, PageSelection};
use crate::pdf::{Assembler, PdfDocument};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct Extraction {
    pub output: PathBuf,
    pub pages: PageSelection,
}

pub fn run(console: &mut impl Console) {
    match extract(console) {
        Ok(extraction) => console.print(&format!(
            "\nSuccessfully extracted pages {:?} -> '{}'",
            extraction.pages.one_based(),
            extraction.output.display()
        )),
        Err(e) => {
            warn!("extraction aborted: {:#}", e);
            console.print(&error_message(&e));
        }
    }
}

/// Ask for one PDF and a page expression, and write the chosen pages next to
/// the input as `<name>_extracted.pdf`.
pub fn extract(console: &mut impl Console) -> Result<Extraction> {
    let raw = console.prompt_line("Enter the path to your PDF file: ")?;
    let path = PathBuf::from(clean_path(&raw));
    if !path.is_file() {
        return Err(FlowError::FileNotFound(path).into());
    }

    let doc = PdfDocument::open(&path)?;
    let total_pages = doc.page_count();
    console.print(&format!("File has {} pages.", total_pages));

    let expression = console.prompt_line(&format!(
        "Enter page numbers to extract (e.g., 1,3,5-{}): ",
        total_pages
    ))?;
    let pages = parse_page_selection(&expression, total_pages)?;
    if pages.is_empty() {
        return Err(FlowError::EmptySelection.into());
    }

    let mut assembler = Assembler::new();
    assembler.append_pages(doc, &pages)?;

    let output = extracted_path(&path);
    assembler.write(&output)?;
    info!(input = %path.display(), output = %output.display(), pages = pages.len(), "extracted");

    Ok(Extraction { output, pages })
}

/// `dir/report.pdf` becomes `dir/report_extracted.pdf`.
pub fn extracted_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    input.with_file_name(format!("{}_extracted.pdf", stem))
}
