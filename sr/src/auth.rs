//! Access gate
//!
//! A single shared secret ("clave") checked against a pre-computed
//! salted SHA-256 hash in constant time. Stateless: no session or token
//! is issued. The gate is advisory — it guards the admin view in the
//! front-end, not the data endpoints.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::config::AuthConfig;

/// Check a supplied clave against the configured hash
///
/// An unconfigured or malformed hash fails closed: every login is
/// rejected rather than letting a config omission open the admin view.
pub fn verify_clave(clave: &str, auth: &AuthConfig) -> bool {
    let Some(expected_hex) = &auth.clave_hash else {
        return false;
    };
    let expected = match hex::decode(expected_hex) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Configured clave-hash is not valid hex");
            return false;
        }
    };

    let digest = hash_bytes(clave, &auth.salt);
    expected.ct_eq(&digest).into()
}

/// Hash a clave with a salt, hex-encoded (for generating config values)
pub fn hash_clave(clave: &str, salt: &str) -> String {
    hex::encode(hash_bytes(clave, salt))
}

fn hash_bytes(clave: &str, salt: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(clave.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(clave: &str, salt: &str) -> AuthConfig {
        AuthConfig {
            clave_hash: Some(hash_clave(clave, salt)),
            salt: salt.to_string(),
        }
    }

    #[test]
    fn test_correct_clave_verifies() {
        let auth = auth("secreto", "sal");
        assert!(verify_clave("secreto", &auth));
    }

    #[test]
    fn test_wrong_clave_rejected() {
        let auth = auth("secreto", "sal");
        assert!(!verify_clave("otro", &auth));
        assert!(!verify_clave("", &auth));
    }

    #[test]
    fn test_salt_matters() {
        let a = auth("secreto", "sal1");
        let b = auth("secreto", "sal2");
        assert_ne!(a.clave_hash, b.clave_hash);
        assert!(!verify_clave("secreto", &AuthConfig {
            clave_hash: a.clave_hash,
            salt: "sal2".to_string(),
        }));
    }

    #[test]
    fn test_unconfigured_gate_fails_closed() {
        let auth = AuthConfig {
            clave_hash: None,
            salt: String::new(),
        };
        assert!(!verify_clave("cualquiera", &auth));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        let auth = AuthConfig {
            clave_hash: Some("not-hex".to_string()),
            salt: String::new(),
        };
        assert!(!verify_clave("secreto", &auth));
    }
}
