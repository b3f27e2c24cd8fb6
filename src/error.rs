use std::path::PathBuf;

use thiserror::Error;

pub type SalesResult<T> = Result<T, SalesError>;

#[derive(Error, Debug)]
pub enum SalesError {
    /// The input file does not exist.
    #[error("sales data file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A row is missing a required field or a field fails to parse.
    #[error("malformed record{}: field '{field}' {reason}", row_suffix(.row))]
    MalformedRecord {
        row: Option<usize>,
        field: &'static str,
        reason: String,
    },

    /// A date filter bound could not be parsed.
    #[error("invalid date range: {bound} bound '{value}' is not a YYYY-MM-DD date")]
    InvalidRange { bound: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

impl SalesError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row: None,
            field,
            reason: reason.into(),
        }
    }

    /// Attach a 1-based data row number to a `MalformedRecord`; other kinds pass through.
    pub(crate) fn at_row(self, row_number: usize) -> Self {
        match self {
            Self::MalformedRecord { field, reason, .. } => Self::MalformedRecord {
                row: Some(row_number),
                field,
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_includes_row_when_known() {
        let err = SalesError::malformed("price", "is not a number: 'abc'");
        assert_eq!(
            err.to_string(),
            "malformed record: field 'price' is not a number: 'abc'"
        );

        let err = err.at_row(7);
        assert_eq!(
            err.to_string(),
            "malformed record at row 7: field 'price' is not a number: 'abc'"
        );
    }

    #[test]
    fn at_row_leaves_other_errors_alone() {
        let err = SalesError::InvalidRange {
            bound: "start",
            value: "2024-13-01".to_string(),
        }
        .at_row(3);
        assert!(matches!(err, SalesError::InvalidRange { bound: "start", .. }));
    }
}
