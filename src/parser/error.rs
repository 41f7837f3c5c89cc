/// Errors reading a document before any mzTab-M rule applies
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line tokenizer error, including invalid UTF-8
    #[error("Tokenizer error: {0}")]
    Csv(#[from] csv::Error),
}
