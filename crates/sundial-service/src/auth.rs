//! Single-password sign-in and the opaque session token.
//!
//! The service never stores accounts: one password (plaintext or an Argon2
//! PHC string) is configured by the operator, so this module only ever
//! verifies. A session token is the lowercase hex SHA-256 digest of the
//! token secret and the configured password material. It is stable for a
//! given configuration, so it survives restarts, and it changes whenever
//! the password or the token secret changes, which invalidates every
//! outstanding session.

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use sha2::{Digest, Sha256};

use sundial_core::config::AuthConfig;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Checks a sign-in password against the configured secret: an Argon2 PHC
/// string if `auth.password_hash` is set, a plaintext comparison against
/// `auth.password` otherwise.
///
/// ## Errors
/// [`ServiceError::InvalidConfiguration`] if no password is configured or
/// the stored hash is malformed;
/// [`ServiceError::NotAuthenticated`] if the password is wrong.
pub fn check_password(auth: &AuthConfig, password: &str) -> ServiceResult<()> {
    if let Some(phc) = auth.password_hash.as_deref() {
        let hash = PasswordHash::new(phc).map_err(|e| {
            ServiceError::InvalidConfiguration(format!("Invalid password hash: {e}"))
        })?;
        return Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .map_err(|err| {
                tracing::trace!(error = %err, "Password rejected");
                ServiceError::NotAuthenticated
            });
    }

    if let Some(expected) = auth.password.as_deref() {
        if expected == password {
            return Ok(());
        }
        return Err(ServiceError::NotAuthenticated);
    }

    Err(ServiceError::InvalidConfiguration(
        "password not configured".into(),
    ))
}

/// ## Summary
/// Issues the session token for the current configuration.
///
/// ## Errors
/// Returns an error if no password is configured.
pub fn issue_token(auth: &AuthConfig) -> ServiceResult<String> {
    derive_token(auth)
}

/// ## Summary
/// Verifies a presented session token.
///
/// ## Errors
/// [`ServiceError::NotAuthenticated`] if the token does not match;
/// [`ServiceError::InvalidConfiguration`] if no password is configured.
pub fn verify_token(auth: &AuthConfig, presented: &str) -> ServiceResult<()> {
    let expected = derive_token(auth)?;
    if expected == presented {
        Ok(())
    } else {
        Err(ServiceError::NotAuthenticated)
    }
}

fn derive_token(auth: &AuthConfig) -> ServiceResult<String> {
    let secret = auth
        .password_hash
        .as_deref()
        .or(auth.password.as_deref())
        .ok_or_else(|| ServiceError::InvalidConfiguration("password not configured".into()))?;

    let mut hasher = Sha256::new();
    hasher.update(auth.token_secret.as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{SaltString, rand_core::OsRng};
    use argon2::{Argon2, PasswordHasher};

    use sundial_core::config::AuthConfig;

    use crate::error::ServiceError;

    use super::{check_password, issue_token, verify_token};

    fn plain_auth(password: &str) -> AuthConfig {
        AuthConfig {
            password: Some(password.to_string()),
            password_hash: None,
            token_secret: "secret".to_string(),
        }
    }

    fn hashed_auth(password: &str) -> AuthConfig {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string();
        AuthConfig {
            password: None,
            password_hash: Some(phc),
            token_secret: "secret".to_string(),
        }
    }

    #[test]
    fn plaintext_password_check() {
        let auth = plain_auth("hunter2");
        assert!(check_password(&auth, "hunter2").is_ok());
        assert!(matches!(
            check_password(&auth, "wrong"),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn hashed_password_check() {
        let auth = hashed_auth("hunter2");
        assert!(check_password(&auth, "hunter2").is_ok());
        assert!(matches!(
            check_password(&auth, "wrong"),
            Err(ServiceError::NotAuthenticated)
        ));
    }

    #[test]
    fn malformed_hash_is_a_configuration_error() {
        let auth = AuthConfig {
            password: None,
            password_hash: Some("not_a_valid_hash".to_string()),
            token_secret: "secret".to_string(),
        };
        assert!(matches!(
            check_password(&auth, "anything"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unconfigured_password_is_an_error() {
        let auth = AuthConfig {
            password: None,
            password_hash: None,
            token_secret: "secret".to_string(),
        };
        assert!(matches!(
            check_password(&auth, "anything"),
            Err(ServiceError::InvalidConfiguration(_))
        ));
        assert!(issue_token(&auth).is_err());
    }

    #[test]
    fn issued_token_verifies() {
        let auth = plain_auth("hunter2");
        let token = issue_token(&auth).unwrap();
        assert!(verify_token(&auth, &token).is_ok());
        assert!(verify_token(&auth, "forged").is_err());
    }

    #[test]
    fn token_changes_with_password() {
        let a = issue_token(&plain_auth("one")).unwrap();
        let b = issue_token(&plain_auth("two")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn token_works_for_hashed_configurations() {
        let auth = hashed_auth("hunter2");
        let token = issue_token(&auth).unwrap();
        assert!(verify_token(&auth, &token).is_ok());
    }
}
