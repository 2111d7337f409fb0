use std::fmt;
use std::path::PathBuf;

/// Failure taxonomy for building and dispatching a test order.
///
/// Every variant except `Dispatch` is terminal: it unwinds the batch
/// immediately. `Dispatch` is recorded per product and the remaining
/// products are still attempted.
#[derive(Debug)]
pub enum OrderError {
    MalformedInput { path: PathBuf, reason: String },
    UnknownSensor { prefix: String },
    InvalidProductId { product_id: String, reason: String },
    MissingSourceData { path: PathBuf },
    RenderValidation(serde_json::Error),
    Dispatch(String),
    Io(std::io::Error),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::MalformedInput { path, reason } => {
                write!(f, "Malformed order document [{}]: {}", path.display(), reason)
            }
            OrderError::UnknownSensor { prefix } => {
                write!(f, "Satellite-Sensor code ({}) not understood", prefix)
            }
            OrderError::InvalidProductId { product_id, reason } => {
                write!(f, "Invalid product id [{}]: {}", product_id, reason)
            }
            OrderError::MissingSourceData { path } => {
                write!(f, "Missing product data [{}]", path.display())
            }
            OrderError::RenderValidation(e) => {
                write!(f, "Rendered order is no longer valid JSON: {}", e)
            }
            OrderError::Dispatch(msg) => write!(f, "Dispatch failed: {}", msg),
            OrderError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<std::io::Error> for OrderError {
    fn from(err: std::io::Error) -> OrderError {
        OrderError::Io(err)
    }
}
