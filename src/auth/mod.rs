//! Authentication and authorization.
//!
//! Staff log in with username/password checked against the users
//! collection; on success the service issues an HS256 JWT carrying the
//! username and role claims with a fixed expiry (2 hours by default).
//! Middleware validates the bearer token and a role layer restricts the
//! operational API to the Admin role.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::errors::ErrorResponse;
use crate::models::User;
use crate::store::{Collection, Store, StoreError};

/// Role required for all operational endpoints.
pub const ADMIN_ROLE: &str = "Admin";

/// Claim structure for session tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // user id
    pub username: String, // login name
    pub name: String,     // display name
    pub role: String,     // role claim checked by the role layer
    pub iat: i64,         // issued at
    pub exp: i64,         // expiration
    pub iss: String,      // issuer
}

/// Authenticated user data extracted from a validated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub role: String,
}

impl AuthUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub token_expiry: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access only")]
    InsufficientRole,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Authentication backend error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InsufficientRole => StatusCode::FORBIDDEN,
            Self::TokenCreation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AuthError::TokenCreation(_) | AuthError::Internal(_) => {
                tracing::error!(error = %self, "auth failure");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };
        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            timestamp: Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }
}

/// Hex-encoded SHA-256 digest used for stored passwords.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

/// Handles credential checks and token issuance/validation.
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    store: Store,
}

impl AuthService {
    pub fn new(config: AuthConfig, store: Store) -> Self {
        Self { config, store }
    }

    /// Verifies credentials against the users collection and issues a
    /// session token on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AuthError> {
        let users: Vec<User> = self.store.list(Collection::Users).await?;
        let user = users
            .into_iter()
            .find(|u| u.username == username)
            .ok_or(AuthError::InvalidCredentials)?;

        if hash_password(password) != user.password_hash {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(&user)?;
        Ok((token, user))
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiry = now
            + ChronoDuration::from_std(self.config.token_expiry)
                .map_err(|_| AuthError::TokenCreation("invalid token duration".into()))?;

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }

    /// Inserts a default admin account when the users collection is empty.
    /// Returns whether a user was created.
    pub async fn seed_admin(
        &self,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        let users: Vec<User> = self.store.list(Collection::Users).await?;
        if !users.is_empty() {
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            username: username.to_string(),
            password_hash: hash_password(password),
            role: ADMIN_ROLE.to_string(),
        };
        self.store.insert(Collection::Users, &user).await?;
        info!(username = %username, "seeded default admin user");
        Ok(true)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidToken)
}

/// Validates the bearer token and stores the resulting [`AuthUser`] in the
/// request extensions for downstream extractors.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    let claims = match bearer_token(request.headers())
        .and_then(|token| auth_service.validate_token(token))
    {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        username: claims.username,
        name: claims.name,
        role: claims.role,
    });

    next.run(request).await
}

/// Rejects authenticated requests whose role claim does not match.
pub async fn role_middleware(
    State(required_role): State<String>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AuthError::MissingToken)?;

    if !user.has_role(&required_role) {
        return Err(AuthError::InsufficientRole);
    }

    Ok(next.run(request).await)
}

/// Extension methods for gating routers behind auth and a role claim.
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
    fn with_role(self, role: &str) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }

    fn with_role(self, role: &str) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            role.to_string(),
            role_middleware,
        ))
        .with_auth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_service() -> AuthService {
        let store = Store::new(Arc::new(MemoryStore::new()));
        AuthService::new(
            AuthConfig {
                jwt_secret: "test-secret-key-which-is-long-enough".into(),
                issuer: "swiftmove-api".into(),
                token_expiry: Duration::from_secs(7200),
            },
            store,
        )
    }

    fn admin_user() -> User {
        User {
            id: "u-1".into(),
            name: "Site Admin".into(),
            username: "admin".into(),
            password_hash: hash_password("admin123"),
            role: ADMIN_ROLE.into(),
        }
    }

    #[test]
    fn password_hash_is_deterministic_sha256_hex() {
        assert_eq!(hash_password("admin123"), hash_password("admin123"));
        assert_ne!(hash_password("admin123"), hash_password("admin124"));
        assert_eq!(hash_password("x").len(), 64);
    }

    #[test]
    fn token_round_trip_carries_role_claim() {
        let service = test_service();
        let token = service.generate_token(&admin_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.sub, "u-1");
        assert!(claims.exp - claims.iat == 7200);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = test_service();
        let mut token = service.generate_token(&admin_user()).unwrap();
        token.push('x');
        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = test_service();
        let now = Utc::now();
        // Two minutes past expiry, beyond the default validation leeway
        let claims = Claims {
            sub: "u-1".into(),
            username: "admin".into(),
            name: "Site Admin".into(),
            role: ADMIN_ROLE.into(),
            iat: now.timestamp() - 7320,
            exp: now.timestamp() - 120,
            iss: "swiftmove-api".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-which-is-long-enough".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let service = test_service();
        service.store.insert(Collection::Users, &admin_user()).await.unwrap();

        assert!(matches!(
            service.login("admin", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody", "admin123").await,
            Err(AuthError::InvalidCredentials)
        ));

        let (token, user) = service.login("admin", "admin123").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(user.role, ADMIN_ROLE);
    }

    #[tokio::test]
    async fn seed_admin_only_when_empty() {
        let service = test_service();
        assert!(service.seed_admin("Site Admin", "admin", "admin123").await.unwrap());
        assert!(!service.seed_admin("Site Admin", "admin", "admin123").await.unwrap());

        let users: Vec<User> = service.store.list(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password_hash, hash_password("admin123"));
    }
}
