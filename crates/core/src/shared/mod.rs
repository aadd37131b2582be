mod http_errors;
pub use http_errors::{estimator_status, ErrorResponse, HttpError};
