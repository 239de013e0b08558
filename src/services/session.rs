use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a session token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Claims issued by the managed backend's auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session boundary: who is calling, if anyone
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Option<String>;
}

/// Validates HS256 access tokens
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Resolve the session for an `Authorization` header value
    pub fn session(&self, authorization: Option<&str>) -> BearerSession {
        let user_id = match bearer_token(authorization) {
            Ok(token) => match self.authenticate(token) {
                Ok(claims) => Some(claims.sub),
                Err(e) => {
                    tracing::debug!("Rejected bearer token: {}", e);
                    None
                }
            },
            Err(_) => None,
        };

        BearerSession { user_id }
    }
}

/// Extract the token from `Bearer <token>`
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    authorization
        .and_then(|value| value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Session resolved from a verified bearer token
#[derive(Debug, Clone, Default)]
pub struct BearerSession {
    user_id: Option<String>,
}

#[async_trait]
impl SessionProvider for BearerSession {
    async fn current_user(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Fixed session, for tests and trusted internal callers
#[derive(Debug, Clone, Default)]
pub struct StaticSession(pub Option<String>);

impl StaticSession {
    pub fn user(user_id: &str) -> Self {
        Self(Some(user_id.to_string()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
            role: Some("authenticated".to_string()),
            email: None,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert!(bearer_token(Some("Basic abc")).is_err());
        assert!(bearer_token(Some("Bearer   ")).is_err());
        assert!(bearer_token(None).is_err());
    }

    #[test]
    fn test_valid_token_resolves_user() {
        let auth = JwtAuthenticator::new("secret", None);
        let header = format!("Bearer {}", token("secret", "user-1", 3600));

        let session = auth.session(Some(&header));
        assert_eq!(tokio_test::block_on(session.current_user()), Some("user-1".to_string()));
    }

    #[test]
    fn test_bad_signature_or_expired_is_anonymous() {
        let auth = JwtAuthenticator::new("secret", None);

        let forged = format!("Bearer {}", token("other", "user-1", 3600));
        assert_eq!(tokio_test::block_on(auth.session(Some(&forged)).current_user()), None);

        let expired = format!("Bearer {}", token("secret", "user-1", -3600));
        assert_eq!(tokio_test::block_on(auth.session(Some(&expired)).current_user()), None);
    }

    #[test]
    fn test_static_session() {
        assert_eq!(
            tokio_test::block_on(StaticSession::user("u").current_user()),
            Some("u".to_string())
        );
        assert_eq!(tokio_test::block_on(StaticSession::anonymous().current_user()), None);
    }
}
