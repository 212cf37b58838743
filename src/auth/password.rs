use tracing::error;

/// bcrypt work factor for newly created hashes.
pub const BCRYPT_COST: u32 = 14;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    hash_password_with_cost(plain, BCRYPT_COST)
}

pub fn hash_password_with_cost(plain: &str, cost: u32) -> anyhow::Result<String> {
    bcrypt::hash(plain, cost).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })
}

/// Compares `plain` against a stored bcrypt hash.
/// A mismatch is `Ok(false)`; an unreadable hash is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        anyhow::anyhow!(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(hash.starts_with("$2b$14$"));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password_with_cost(password, 4).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_rejects_non_bcrypt_hashes() {
        let argon2 = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$aGFzaGhhc2hoYXNoaGFzaA";
        assert!(verify_password("legacy-pass", argon2).is_err());
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
