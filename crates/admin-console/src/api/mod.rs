// crates/admin-console/src/api/mod.rs
// HTTP access layer for the remote admin API

pub mod error;
pub mod gateway;

pub use error::{ApiError, ApiErrorKind, GENERIC_ERROR_MESSAGE};
pub use gateway::{ApiGateway, ApiResponse, RequestOptions};
