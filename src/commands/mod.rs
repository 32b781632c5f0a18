pub mod extract;
pub mod merge;

use crate::error::FlowError;

/// Text shown to the user when a flow ends early.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FlowError>() {
        Some(FlowError::FileNotFound(_)) => format!("Error: {}", err),
        Some(flow) => flow.to_string(),
        None => format!("\nAn error occurred: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_range::parse_page_selection;
    use std::path::PathBuf;

    #[test]
    fn test_error_message() {
        let err = anyhow::Error::from(FlowError::FileNotFound(PathBuf::from("x.pdf")));
        assert_eq!(error_message(&err), "Error: The file 'x.pdf' does not exist.");

        let err = anyhow::Error::from(FlowError::EmptySelection);
        assert_eq!(error_message(&err), "No valid pages selected.");

        let err = anyhow::Error::from(parse_page_selection("x", 3).unwrap_err());
        assert_eq!(
            error_message(&err),
            "\nAn error occurred: Invalid page number 'x'. Must be an integer."
        );
    }
}
