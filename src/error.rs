use thiserror::Error;

#[derive(Error, Debug)]
pub enum StocklistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{file}: cannot locate a {what} column")]
    MissingColumn { file: String, what: &'static str },

    #[error("{file}: row {row}: cannot parse {field} value '{value}'")]
    BadNumber {
        file: String,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StocklistError>;
