//! Argon2id password hashing and verification.
//!
//! All password material in the system passes through this module:
//! signup hashes here, login verifies here, and repositories only
//! ever see the finished PHC string. The PHC format carries its own
//! salt and parameters, so tightening the constants below affects
//! newly created accounts without invalidating existing hashes.

use std::borrow::Cow;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};

use crate::error::AuthError;

// OWASP ASVS minimums for Argon2id: 19 MiB memory, 2 iterations,
// single lane.
const MEMORY_KIB: u32 = 19_456;
const ITERATIONS: u32 = 2;
const LANES: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None)
        .map_err(|e| AuthError::Crypto(format!("argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn apply_pepper<'a>(password: &'a str, pepper: Option<&str>) -> Cow<'a, str> {
    match pepper {
        Some(p) => Cow::Owned(format!("{p}{password}")),
        None => Cow::Borrowed(password),
    }
}

/// Hash a password into an Argon2id PHC string with a fresh random
/// salt. The same pepper, if any, must be supplied at verification.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let input = apply_pepper(password, pepper);
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(input.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("hashing failed: {e}")))
}

/// Check a candidate password against a stored PHC string.
///
/// Returns `Ok(false)` on a plain mismatch; `Err(AuthError::Crypto)`
/// only when the stored hash itself is unreadable.
pub fn verify_password(
    candidate: &str,
    stored: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| AuthError::Crypto(format!("stored hash unreadable: {e}")))?;

    let input = apply_pepper(candidate, pepper);
    match hasher()?.verify_password(input.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_accepts_only_the_original_password() {
        let hash = hash_password("rosemary&thyme", None).unwrap();
        assert!(verify_password("rosemary&thyme", &hash, None).unwrap());
        assert!(!verify_password("rosemary&sage", &hash, None).unwrap());
    }

    #[test]
    fn phc_string_records_algorithm_and_parameters() {
        let hash = hash_password("fiddle-leaf-fig", None).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn salts_differ_between_calls() {
        let first = hash_password("same-input", None).unwrap();
        let second = hash_password("same-input", None).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-input", &first, None).unwrap());
        assert!(verify_password("same-input", &second, None).unwrap());
    }

    #[test]
    fn pepper_must_match_between_hash_and_verify() {
        let hash = hash_password("begonia", Some("rack-secret")).unwrap();
        assert!(verify_password("begonia", &hash, Some("rack-secret")).unwrap());
        assert!(!verify_password("begonia", &hash, None).unwrap());
        assert!(!verify_password("begonia", &hash, Some("other-secret")).unwrap());
    }

    #[test]
    fn unreadable_stored_hash_is_a_crypto_error() {
        let result = verify_password("anything", "plainly-not-a-phc-string", None);
        assert!(matches!(result, Err(AuthError::Crypto(_))));
    }
}
