//! Signup, signin, and JWT issue/verify.
//!
//! Tokens are HS256 with a 24 hour lifetime; the `sub` claim carries the
//! user's id in hex. One secret signs and verifies.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::Database;
use serde::{Deserialize, Serialize};

use crate::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CredentialsDto, SessionDto},
};

#[cfg(test)]
mod test;

/// Token lifetime in hours.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id as a hex string.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a new access token for `user_id`.
pub fn issue_token(user_id: &str, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AppError::InternalError(format!("Failed to sign token: {err}")))
}

/// Verifies an access token's signature and expiry and returns its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    if data.claims.sub.is_empty() {
        return Err(AuthError::MissingSubject);
    }

    Ok(data.claims)
}

pub struct AuthService<'a> {
    db: &'a Database,
    jwt_secret: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Database, jwt_secret: &'a str) -> Self {
        Self { db, jwt_secret }
    }

    /// Registers a new user and signs them in.
    ///
    /// # Returns
    /// - `Ok(SessionDto)`: The created user and a fresh token
    /// - `Err(AppError)`: BadRequest for missing fields, Conflict for a
    ///   duplicate email, or a database/hashing error
    pub async fn sign_up(&self, credentials: CredentialsDto) -> Result<SessionDto, AppError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&credentials.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = bcrypt::hash(&credentials.password, bcrypt::DEFAULT_COST)?;
        let user = repo.create(credentials.email, password_hash).await?;

        let token = issue_token(&user.id.to_hex(), self.jwt_secret)?;

        tracing::info!("Registered user {}", user.id.to_hex());

        Ok(SessionDto {
            user: user.into(),
            token,
        })
    }

    /// Authenticates an existing user.
    ///
    /// An unknown email and a wrong password produce the same error, so the
    /// response does not reveal whether the account exists.
    pub async fn sign_in(&self, credentials: CredentialsDto) -> Result<SessionDto, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_email(&credentials.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !bcrypt::verify(&credentials.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = issue_token(&user.id.to_hex(), self.jwt_secret)?;

        Ok(SessionDto {
            user: user.into(),
            token,
        })
    }
}
