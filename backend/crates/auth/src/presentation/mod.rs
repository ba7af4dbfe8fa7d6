//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, extractor and middleware.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extractor::Authenticated;
pub use handlers::AuthAppState;
pub use middleware::{AuthMiddlewareState, require_auth};
pub use router::auth_router;
