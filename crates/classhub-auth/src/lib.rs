//! # classhub-auth
//!
//! Credential authentication and session management for ClassHub.
//!
//! ## Modules
//!
//! - `password` — slow, salted credential hashing with constant-time verification
//! - `token` — opaque session token generation from OS randomness
//! - `store` — identity and session store contracts with Postgres and in-memory backends
//! - `strategy` — email/password verification producing a public [`Identity`]
//! - `session` — session lifecycle (start, resolve, destroy) and expired-row cleanup
//!
//! [`Identity`]: classhub_entity::Identity

pub mod password;
pub mod session;
pub mod store;
pub mod strategy;
pub mod token;

pub use password::PasswordHasher;
pub use session::{SessionCleanup, SessionManager};
pub use store::{IdentityStore, SessionStore};
pub use strategy::{Authenticator, Registration};
