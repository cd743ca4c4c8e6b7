use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};

use crate::errors::InternalError;

/// Password hashing provider
///
/// Argon2id with the server-side pepper as the secret parameter. Both
/// operations are CPU bound and run on the blocking thread pool.
pub struct CryptoProvider {
    password_pepper: String,
}

impl CryptoProvider {
    pub fn new(password_pepper: String) -> Self {
        Self { password_pepper }
    }

    /// Hash a cleartext password into a PHC string
    pub async fn hash_password(&self, password: String) -> Result<String, InternalError> {
        let pepper = self.password_pepper.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 = Self::argon2(&pepper)?;
            let salt = SaltString::generate(&mut rand_core::OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
        })
        .await
        .map_err(|e| InternalError::crypto("password_hash", format!("Hashing task failed: {}", e)))?
    }

    /// Check a cleartext password against a stored hash
    ///
    /// A stored value that is not a valid PHC string never verifies.
    pub async fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let pepper = self.password_pepper.clone();
        let password_hash = password_hash.to_owned();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = match PasswordHash::new(&password_hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Stored password hash is malformed: {}", e);
                    return Ok(false);
                }
            };

            let argon2 = Self::argon2(&pepper)?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
        })
        .await
        .map_err(|e| InternalError::crypto("password_verify", format!("Verification task failed: {}", e)))?
    }

    fn argon2(pepper: &str) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", format!("Failed to initialize Argon2 with secret: {}", e)))
    }
}

impl std::fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_crypto_provider() -> CryptoProvider {
        CryptoProvider::new("test-pepper-for-unit-tests".to_string())
    }

    #[tokio::test]
    async fn test_hash_produces_argon2id_phc_string() {
        let crypto = create_test_crypto_provider();
        let hash = crypto.hash_password("mysecretpassword".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(PasswordHash::new(&hash).is_ok());
    }

    #[tokio::test]
    async fn test_verify_accepts_correct_and_rejects_wrong_password() {
        let crypto = create_test_crypto_provider();
        let hash = crypto.hash_password("correct-password".to_string()).await.unwrap();

        assert!(crypto.verify_password(&hash, "correct-password").await.unwrap());
        assert!(!crypto.verify_password(&hash, "wrong-password").await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let crypto = create_test_crypto_provider();
        let first = crypto.hash_password("samepassword".to_string()).await.unwrap();
        let second = crypto.hash_password("samepassword".to_string()).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_different_pepper_fails_verification() {
        let hash = create_test_crypto_provider()
            .hash_password("password123".to_string())
            .await
            .unwrap();
        let other = CryptoProvider::new("another-pepper-value-xyz".to_string());

        assert!(!other.verify_password(&hash, "password123").await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_does_not_verify() {
        let crypto = create_test_crypto_provider();
        assert!(!crypto.verify_password("not-a-hash", "password").await.unwrap());
    }

    #[test]
    fn test_debug_does_not_expose_pepper() {
        let debug = format!("{:?}", create_test_crypto_provider());
        assert!(!debug.contains("test-pepper"));
        assert!(debug.contains("<redacted>"));
    }
}
