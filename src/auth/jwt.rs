use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// HMAC keys and token policy derived from [`JwtConfig`].
#[derive(Clone)]
pub struct JwtKeys {
    keys: Option<(EncodingKey, DecodingKey)>,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_hours,
        } = cfg.clone();
        Self {
            keys: secret.map(|s| {
                (
                    EncodingKey::from_secret(s.as_bytes()),
                    DecodingKey::from_secret(s.as_bytes()),
                )
            }),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_hours.max(0) as u64).saturating_mul(3600)),
        }
    }

    pub fn sign(&self, username: &str) -> anyhow::Result<String> {
        self.sign_at(username, OffsetDateTime::now_utc())
    }

    fn sign_at(&self, username: &str, now: OffsetDateTime) -> anyhow::Result<String> {
        let Some((encoding, _)) = &self.keys else {
            anyhow::bail!("JWT_SECRET environment variable not set");
        };
        let exp = TimeDuration::try_from(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| anyhow::anyhow!("token lifetime of {:?} is out of range", self.ttl))?;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(ALGORITHM), &claims, encoding)?;
        debug!(username, "jwt signed");
        Ok(token)
    }

    /// Validates signature, algorithm, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let Some((_, decoding)) = &self.keys else {
            anyhow::bail!("JWT_SECRET environment variable not set");
        };
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, decoding, &validation)?;
        debug!(username = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_keys(secret: Option<&str>) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.map(str::to_string),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_hours: 72,
        })
    }

    /// A token for `username` that expired an hour ago.
    pub(crate) fn expired_token(keys: &JwtKeys, username: &str) -> String {
        let issued = OffsetDateTime::now_utc() - TimeDuration::hours(73);
        keys.sign_at(username, issued).expect("sign")
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys(Some("dev-secret"));
        let token = keys.sign("admin").expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp - claims.iat, 72 * 3600);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys(Some("dev-secret"));
        let token = expired_token(&keys, "admin");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let keys = make_keys(Some("dev-secret"));
        let token = keys.sign("admin").expect("sign");
        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let forged = format!("{head}.{flipped}{}", &sig[1..]);
        assert!(keys.verify(&forged).is_err());
    }

    #[test]
    fn verify_rejects_other_secret() {
        let token = make_keys(Some("one-secret")).sign("admin").unwrap();
        assert!(make_keys(Some("another-secret")).verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_other_algorithm() {
        let keys = make_keys(Some("dev-secret"));
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: "admin".into(),
            iat: now,
            exp: now + 3600,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys(Some("same-secret"));
        let mut bad = make_keys(Some("same-secret"));
        bad.issuer = "bad-iss".into();
        bad.audience = "bad-aud".into();
        let token = good.sign("admin").unwrap();
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn oversized_ttl_fails_instead_of_panicking() {
        let keys = JwtKeys::from_config(&JwtConfig {
            secret: Some("dev-secret".into()),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_hours: 100_000_000,
        });
        let err = keys.sign("admin").unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let keys = JwtKeys::from_config(&JwtConfig {
            secret: Some("dev-secret".into()),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_hours: i64::MAX,
        });
        assert!(keys.sign("admin").is_err());
    }

    #[test]
    fn signing_without_secret_fails() {
        let keys = make_keys(None);
        let err = keys.sign("admin").unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
        assert!(keys.verify("a.b.c").is_err());
    }
}
