//! JWT token service
//!
//! Issues and validates HS256-signed access and refresh tokens. The
//! expiration is embedded in the token itself; the server holds no
//! session state. Every validation failure collapses to a single
//! [`TokenInvalid`] so callers cannot distinguish a bad signature from
//! an expired or malformed token.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claim set embedded in every issued token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
    pub kind: TokenType,
}

/// Response shape for login and refresh
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Single undifferentiated outcome for any invalid token
#[derive(Debug, thiserror::Error)]
#[error("invalid token")]
pub struct TokenInvalid;

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtManager {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue_access(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(email, TokenType::Access, self.access_ttl)
    }

    pub fn issue_refresh(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(email, TokenType::Refresh, self.refresh_ttl)
    }

    /// Issue a fresh access + refresh pair for a subject
    pub fn issue_pair(&self, email: &str) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: self.issue_access(email)?,
            refresh_token: self.issue_refresh(email)?,
            token_type: "bearer",
        })
    }

    fn issue(
        &self,
        email: &str,
        kind: TokenType,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: email.to_owned(),
            exp: (now + ttl).unix_timestamp(),
            iat: now.unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify signature and expiration, returning the claims
    ///
    /// Zero leeway: a token is rejected from the moment its expiration
    /// timestamp passes.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenInvalid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> JwtManager {
        JwtManager::new(
            "test-jwt-secret-key-for-testing-only",
            Duration::minutes(30),
            Duration::days(7),
        )
    }

    #[test]
    fn issue_and_validate_round_trip() {
        let manager = manager();
        let token = manager.issue_access("a@x.com").expect("issue failed");

        let claims = manager.validate(&token).expect("validate failed");
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.kind, TokenType::Access);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn refresh_tokens_carry_refresh_kind_and_longer_expiry() {
        let manager = manager();
        let access = manager.issue_access("a@x.com").expect("issue failed");
        let refresh = manager.issue_refresh("a@x.com").expect("issue failed");

        let access_claims = manager.validate(&access).expect("validate failed");
        let refresh_claims = manager.validate(&refresh).expect("validate failed");
        assert_eq!(refresh_claims.kind, TokenType::Refresh);
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn pair_contains_both_kinds() {
        let manager = manager();
        let pair = manager.issue_pair("a@x.com").expect("issue failed");
        assert_eq!(pair.token_type, "bearer");

        let access = manager.validate(&pair.access_token).expect("validate failed");
        let refresh = manager
            .validate(&pair.refresh_token)
            .expect("validate failed");
        assert_eq!(access.kind, TokenType::Access);
        assert_eq!(refresh.kind, TokenType::Refresh);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issuer = manager();
        let verifier = JwtManager::new("different-secret", Duration::minutes(30), Duration::days(7));

        let token = issuer.issue_access("a@x.com").expect("issue failed");
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn garbage_is_invalid() {
        let manager = manager();
        assert!(manager.validate("not.a.token").is_err());
        assert!(manager.validate("").is_err());
    }

    #[test]
    fn expired_token_is_invalid() {
        let expired = JwtManager::new(
            "test-jwt-secret-key-for-testing-only",
            Duration::seconds(-1),
            Duration::seconds(-1),
        );
        let token = expired.issue_access("a@x.com").expect("issue failed");

        // Same secret, but the embedded expiry has already passed
        assert!(manager().validate(&token).is_err());
    }

    #[test]
    fn token_kinds_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).expect("serialize failed"),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).expect("serialize failed"),
            "\"refresh\""
        );
    }
}
