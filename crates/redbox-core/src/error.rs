use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("PDF has no pages to draw on")]
    EmptyDocument,

    #[error("Coordinate out of range: {0}")]
    CoordinateOutOfRange(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),
}
