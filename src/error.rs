use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be read or does not decode as a PDF
    #[error("Failed to load PDF {path}: {reason}")]
    Load { path: String, reason: String },

    /// One or more requested page numbers fall outside `1..=page_count`
    #[error("Invalid page numbers: {}. The document has {} pages.", join_numbers(.invalid), .page_count)]
    InvalidPages { invalid: Vec<i64>, page_count: u32 },

    /// A deletion targeted an index the document no longer has
    #[error("Page index {index} out of range (document now has {page_count} pages)")]
    PageIndexOutOfRange { index: u32, page_count: u32 },

    /// Encoding the document or writing it back failed
    #[error("Failed to save PDF {path}: {reason}")]
    Persist { path: String, reason: String },
}

impl Error {
    /// Text returned to the caller in place of a success message.
    pub fn response_text(&self) -> String {
        match self {
            Error::InvalidPages { .. } => format!("Error: {}", self),
            _ => format!("Error processing PDF: {}", self),
        }
    }
}

fn join_numbers(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pages_text() {
        let err = Error::InvalidPages {
            invalid: vec![0, 7, -2],
            page_count: 5,
        };
        assert_eq!(
            err.response_text(),
            "Error: Invalid page numbers: 0, 7, -2. The document has 5 pages."
        );
    }

    #[test]
    fn test_other_errors_are_processing_errors() {
        let err = Error::Load {
            path: "/tmp/missing.pdf".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.response_text(),
            "Error processing PDF: Failed to load PDF /tmp/missing.pdf: No such file or directory"
        );
    }
}
