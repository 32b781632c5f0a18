use crate::commands::error_message;
use crate::console::{clean_path, Console};
use crate::error::FlowError;
use crate::page_range::{parse_page_selection, PageRangeError, PageSelection};
use crate::pdf::{Assembler, PdfDocument};
use anyhow::Result;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_OUTPUT: &str = "merged.pdf";

pub struct MergeSummary {
    pub output: PathBuf,
    pub files_merged: usize,
    pub pages: usize,
}

pub fn run(console: &mut impl Console) {
    console.print("\n--- PDF Merge Mode ---");
    console.print("Enter paths to PDFs one by one. Press ENTER on an empty line to finish.");

    match merge(console) {
        Ok(summary) => {
            info!(
                output = %summary.output.display(),
                files_merged = summary.files_merged,
                pages = summary.pages,
                "merged"
            );
            console.print(&format!(
                "\nSuccessfully merged {} files -> '{}'",
                summary.files_merged,
                summary.output.display()
            ));
        }
        Err(e) => {
            warn!("merge aborted: {:#}", e);
            console.print(&error_message(&e));
        }
    }
}

/// Collect PDFs until an empty line, then write their chosen pages, in the
/// order given, to a single file.
///
/// A file that is missing, unreadable, or whose page expression is rejected
/// is skipped with a warning; only console failures end the run early.
pub fn merge(console: &mut impl Console) -> Result<MergeSummary> {
    let mut assembler = Assembler::new();
    let mut files_merged = 0;

    loop {
        let raw = console.prompt_line(&format!("Path to PDF #{}: ", files_merged + 1))?;
        let path = clean_path(&raw);

        if path.is_empty() {
            if files_merged == 0 {
                return Err(FlowError::NoFilesEntered.into());
            }
            break;
        }

        let path = Path::new(path);
        if !path.is_file() {
            warn!(path = %path.display(), "input not found");
            console.print(&format!(
                "Warning: File '{}' not found. Skipping.",
                path.display()
            ));
            continue;
        }

        if add_document(console, &mut assembler, path)? {
            files_merged += 1;
        }
    }

    let name = console.prompt_line("\nEnter name for the final merged file (e.g., merged.pdf): ")?;
    let output = output_name(&name);
    let pages = assembler.page_count();
    assembler.write(&output)?;

    Ok(MergeSummary {
        output,
        files_merged,
        pages,
    })
}

/// Returns whether the document made it into the output.
fn add_document(console: &mut impl Console, assembler: &mut Assembler, path: &Path) -> Result<bool> {
    let doc = match PdfDocument::open(path) {
        Ok(doc) => doc,
        Err(e) => {
            skip(console, path, &e);
            return Ok(false);
        }
    };

    let total_pages = doc.page_count();
    console.print(&format!(
        "  > File '{}' has {} pages.",
        doc.file_name(),
        total_pages
    ));

    let pages = match choose_pages(console, total_pages)? {
        Ok(pages) if !pages.is_empty() => pages,
        Ok(_) => {
            skip(console, path, &FlowError::EmptySelection);
            return Ok(false);
        }
        Err(e) => {
            skip(console, path, &e);
            return Ok(false);
        }
    };

    if let Err(e) = assembler.append_pages(doc, &pages) {
        skip(console, path, &e);
        return Ok(false);
    }

    console.print(&format!("  > Added {:?} from this file.", pages.one_based()));
    Ok(true)
}

/// Keep asking until the answer is "all" or "specific".
fn choose_pages(
    console: &mut impl Console,
    total_pages: u32,
) -> Result<Result<PageSelection, PageRangeError>> {
    loop {
        let choice =
            console.prompt_line("  > Merge (all) pages or (specific) pages? [all/specific]: ")?;

        match choice.trim().to_lowercase().as_str() {
            "all" => return Ok(Ok(PageSelection::all(total_pages))),
            "specific" => {
                let expression = console.prompt_line(&format!(
                    "  > Enter page numbers (e.g., 1,3,5-{}): ",
                    total_pages
                ))?;
                return Ok(parse_page_selection(&expression, total_pages));
            }
            _ => console.print("  > Invalid choice. Please enter 'all' or 'specific'."),
        }
    }
}

fn skip(console: &mut impl Console, path: &Path, reason: &dyn Display) {
    warn!(path = %path.display(), "skipping input: {:#}", reason);
    console.print(&format!(
        "  > Error reading file '{}': {:#} Skipping this file.",
        path.display(),
        reason
    ));
}

/// Append `.pdf` unless the name already ends with it, in any case.
pub fn output_name(name: &str) -> PathBuf {
    let name = name.trim();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_OUTPUT);
    }
    if name.to_lowercase().ends_with(".pdf") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.pdf", name))
    }
}
