use crate::error::{Error, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes a plaintext password with Argon2id and a fresh random salt.
/// The result is a self-describing PHC string; nothing else is persisted.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| Error::PasswordHash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC string. The salted,
/// constant-time comparison happens inside the primitive; an unparsable
/// stored hash simply fails verification.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_rejects() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn hash_is_not_the_plaintext() {
        let hash = hash_password("hunter22").unwrap();
        assert!(!hash.contains("hunter22"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn salting_makes_hashes_differ() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_stored_hash_fails_verification() {
        assert!(!verify_password("hunter22", "not-a-phc-string"));
    }
}
