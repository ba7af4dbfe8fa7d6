//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - [`error::kind::ErrorKind`] - error classification mapped to HTTP status codes
//! - [`error::app_error::AppError`] - the unified error rendered to clients
//!
//! Crate-specific error enums (auth, platform) convert into `AppError` at the
//! presentation boundary. Nothing in here knows about tokens or usernames.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
