//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod issue_token;
pub mod revoke;
pub mod sign_up;
pub mod verify_token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use issue_token::TokenIssuer;
pub use revoke::RevokeUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_token::{TokenValidator, extract_token};
