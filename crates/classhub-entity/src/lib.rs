//! # classhub-entity
//!
//! Domain entity models for ClassHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod identity;
pub mod session;
pub mod user;

pub use identity::Identity;
pub use session::SessionEntry;
pub use user::{CreateUser, User, UserRole};
