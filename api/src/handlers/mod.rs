pub mod error;

pub use error::{error_body, status_for, ApiError};
