use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt hashing with a configurable cost. Every hash embeds its own random salt.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    /// Returns `false` on mismatch and also when `hashed_password` is not a valid bcrypt hash.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// Runs [`PasswordHasher::hash`] on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
    }

    /// Runs [`PasswordHasher::verify`] on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        password: String,
        hashed_password: String,
    ) -> Result<bool, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed_password))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Verification task failed: {}", e)))
    }

    /// Spends one hash at the configured cost on `password` and always returns `false`.
    /// Used when there is no stored hash to check against, so that the caller takes as
    /// long as a real verification.
    pub async fn reject_blocking(&self, password: String) -> Result<bool, AppError> {
        self.hash_blocking(password).await.map(|_| false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hasher().hash(password).unwrap();

        assert_ne!(hashed, password);
        assert!(hasher().verify(password, &hashed));
        assert!(!hasher().verify("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hasher().hash("secret1").unwrap();
        let second = hasher().hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher().verify("secret1", &first));
        assert!(hasher().verify("secret1", &second));
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        assert!(!hasher().verify("test_password123", "invalidhashformat"));
        assert!(!hasher().verify("test_password123", ""));
    }

    #[actix_rt::test]
    async fn test_blocking_variants() {
        let hashed = hasher().hash_blocking("secret1".to_string()).await.unwrap();
        assert!(hasher()
            .verify_blocking("secret1".to_string(), hashed.clone())
            .await
            .unwrap());
        assert!(!hasher()
            .verify_blocking("secret2".to_string(), hashed)
            .await
            .unwrap());
        assert!(!hasher().reject_blocking("secret1".to_string()).await.unwrap());
    }
}
