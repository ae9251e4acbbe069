//! Common type definitions shared between the server and its clients

pub mod response;

pub use response::{error_codes, ErrorResponse};
