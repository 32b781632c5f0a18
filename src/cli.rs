use crate::console::Console;
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "pdfpick")]
#[command(about = "Interactively extract pages from a PDF or merge pages of several PDFs")]
#[command(version)]
pub struct Cli {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Extract,
    Merge,
}

impl Mode {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Mode::Extract),
            "2" => Some(Mode::Merge),
            _ => None,
        }
    }
}

/// Ask which flow to run until the answer is "1" or "2".
pub fn prompt_mode(console: &mut impl Console) -> Result<Mode> {
    loop {
        let choice = console.prompt_line("Do you want to (1) Extract pages or (2) Merge PDFs? [1/2]: ")?;
        match Mode::from_choice(&choice) {
            Some(mode) => return Ok(mode),
            None => console.print("Invalid choice. Please enter 1 or 2."),
        }
    }
}
