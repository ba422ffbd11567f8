//! User registration and credential checks over an in-memory user table.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{info, warn};

use noteflow_auth::jwt::JwtEncoder;
use noteflow_auth::password::{PasswordHasher, PasswordValidator};
use noteflow_core::error::AppError;
use noteflow_core::types::UserId;
use noteflow_entity::user::{User, UserSummary};

use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed bearer token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The user the token was issued to.
    pub user: UserSummary,
}

/// Handles user registration and login.
#[derive(Debug, Clone)]
pub struct UserService {
    /// Users keyed by username.
    users: Arc<DashMap<String, User>>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
}

impl UserService {
    /// Creates a new user service with an empty user table.
    pub fn new(
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a new user.
    pub fn register(&self, username: &str, password: &str) -> Result<UserSummary, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }
        self.validator.validate(password)?;

        if self.users.contains_key(username) {
            return Err(AppError::validation("Username already exists"));
        }
        let password_hash = self.hasher.hash_password(password)?;

        // Re-checked under the shard lock; two registrations can race past
        // the check above while hashing.
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AppError::validation("Username already exists")),
            Entry::Vacant(slot) => {
                let user = User {
                    id: UserId::new(),
                    username: username.to_string(),
                    password_hash,
                    created_at: Utc::now(),
                };
                let summary = user.summary();
                slot.insert(user);
                info!(user_id = %summary.id, username = %summary.username, "User registered");
                Ok(summary)
            }
        }
    }

    /// Verifies credentials and issues a bearer token.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .users
            .get(username)
            .map(|u| u.value().clone())
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(username = %username, "Failed login attempt");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let (token, expires_at) = self.encoder.issue(user.id, &user.username)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            token,
            expires_at,
            user: user.summary(),
        })
    }

    /// Returns the profile of the user behind the request.
    pub fn current(&self, ctx: &RequestContext) -> Result<UserSummary, AppError> {
        self.users
            .iter()
            .find(|entry| entry.id == ctx.user_id)
            .map(|entry| entry.summary())
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates the configured default user unless it already exists.
    pub fn seed(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.users.contains_key(username) {
            return Ok(());
        }
        let password_hash = self.hasher.hash_password(password)?;
        self.users.entry(username.to_string()).or_insert_with(|| User {
            id: UserId::new(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        });
        info!(username = %username, "Seeded default user");
        Ok(())
    }
}
