//! # staywatch-auth
//!
//! Authentication for StayWatch. Credentials are never stored locally:
//! every check is delegated to an [`IdentityProvider`].
//!
//! ## Modules
//!
//! - `provider` — the provider trait plus Firebase-style REST and in-memory backends
//! - `password` — Argon2id hashing used by the in-memory backend
//! - `flow` — the sign-in / sign-up state machine and its user-facing messages

pub mod error;
pub mod flow;
pub mod password;
pub mod provider;

pub use error::ProviderError;
pub use flow::{AuthFlow, AuthState, AuthSuccess, SIGN_IN_FAILED_MESSAGE};
pub use password::PasswordHasher;
pub use provider::{
    FirebaseIdentityProvider, IdentityProvider, MemoryIdentityProvider, build_identity_provider,
};
