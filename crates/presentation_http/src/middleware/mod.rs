//! HTTP middleware components
//!
//! Request correlation and validated request bodies.

pub mod request_id;
pub mod validation;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id};
pub use validation::{ValidatedJson, ValidationError};
