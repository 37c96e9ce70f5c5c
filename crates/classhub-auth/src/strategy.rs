//! Email/password verification producing a public identity.

use std::sync::Arc;

use tracing::{debug, info};

use classhub_core::error::AppError;
use classhub_core::result::AppResult;
use classhub_entity::identity::Identity;
use classhub_entity::user::{CreateUser, UserRole};

use crate::password::PasswordHasher;
use crate::store::IdentityStore;

/// Input for registering a new credential record.
///
/// The password is plaintext here and nowhere else; it is hashed before
/// anything is persisted.
#[derive(Clone)]
pub struct Registration {
    /// Optional display handle.
    pub username: Option<String>,
    /// Email address (unique).
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Profile image URL.
    pub profile_image: Option<String>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Verifies email/password credentials against the identity store.
///
/// Holds its collaborators explicitly; one instance is constructed at
/// startup and shared through application state. Produces an [`Identity`]
/// on success and never creates sessions itself, so password login and
/// registration share the same downstream session-creation path.
#[derive(Clone)]
pub struct Authenticator {
    identities: Arc<dyn IdentityStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish()
    }
}

impl Authenticator {
    /// Creates a new authenticator over the given identity store.
    pub fn new(identities: Arc<dyn IdentityStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { identities, hasher }
    }

    /// Verifies a login attempt, terminal on first failure.
    ///
    /// An unknown email and a wrong password yield the identical error so
    /// responses cannot be used to enumerate registered addresses.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<Identity> {
        let Some(user) = self.identities.find_by_email(email).await? else {
            debug!("Login rejected: email not registered");
            return Err(invalid_credentials());
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(invalid_credentials());
        }

        Ok(Identity::from(&user))
    }

    /// Registers a new credential record and returns its public identity.
    ///
    /// Input shape is validated by the caller. A concurrent registration
    /// for the same email loses at the store's uniqueness layer and
    /// surfaces here as a conflict.
    pub async fn register(&self, registration: Registration) -> AppResult<Identity> {
        let password_hash = self.hasher.hash(&registration.password).await?;

        let user = self
            .identities
            .insert(CreateUser {
                username: registration.username,
                email: registration.email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                role: registration.role,
                profile_image: registration.profile_image,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(Identity::from(&user))
    }
}

/// The single login failure error; wrong email and wrong password are
/// deliberately indistinguishable.
fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid email or password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryIdentityStore;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            Arc::new(MemoryIdentityStore::new()),
            Arc::new(PasswordHasher::new()),
        )
    }

    fn registration(email: &str) -> Registration {
        Registration {
            username: Some("abell".to_string()),
            email: email.to_string(),
            password: "p@ss123".to_string(),
            first_name: "A".to_string(),
            last_name: "Bell".to_string(),
            role: UserRole::Student,
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = authenticator();
        let registered = auth.register(registration("a@x.com")).await.unwrap();
        assert_eq!(registered.email, "a@x.com");
        assert_eq!(registered.role, UserRole::Student);

        let identity = auth.verify_credentials("a@x.com", "p@ss123").await.unwrap();
        assert_eq!(identity, registered);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let auth = authenticator();
        auth.register(registration("a@x.com")).await.unwrap();

        let wrong_password = auth
            .verify_credentials("a@x.com", "nope")
            .await
            .unwrap_err();
        let unknown_email = auth
            .verify_credentials("ghost@x.com", "p@ss123")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.message, unknown_email.message);
        assert_eq!(wrong_password.kind, unknown_email.kind);
        assert_eq!(wrong_password.message, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let auth = authenticator();
        auth.register(registration("a@x.com")).await.unwrap();

        let err = auth.register(registration("a@x.com")).await.unwrap_err();
        assert_eq!(err.message, "Email already registered");
    }

    #[test]
    fn test_debug_redacts_password() {
        let debugged = format!("{:?}", registration("a@x.com"));
        assert!(debugged.contains("<redacted>"));
        assert!(!debugged.contains("p@ss123"));
    }
}
