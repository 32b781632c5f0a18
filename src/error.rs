use std::path::PathBuf;
use thiserror::Error;

/// Conditions that end an extract or merge run without writing output.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("The file '{}' does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("No valid pages selected.")]
    EmptySelection,

    #[error("No files entered. Exiting merge mode.")]
    NoFilesEntered,
}
