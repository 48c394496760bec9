//! Error envelope shared by every endpoint

pub use cm_shared::errors::{error_codes, ErrorResponse};
