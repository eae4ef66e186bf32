//! Email/password identities and bearer sessions.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rand::Rng;
use sha2::{Digest, Sha256};
use supplylink_common::identity::UserId;
use tokio::sync::broadcast;
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

const REVOCATION_FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters.")]
    WeakPassword,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Missing session token.")]
    MissingToken,
    #[error("Session expired. Please log in again.")]
    InvalidToken,
}

/// Issues identities and resolves session tokens to them.
pub trait IdentityProvider: Send + Sync {
    /// Create an identity with a caller-chosen id.
    fn register(&self, id: UserId, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Check credentials and return the identity they belong to.
    fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    fn issue_token(&self, user: &UserId) -> String;

    fn resolve(&self, token: &str) -> Result<UserId, AuthError>;

    fn revoke(&self, token: &str);

    /// Tokens revoked from now on. Long-lived connections watch this to
    /// end when their session does.
    fn revocations(&self) -> broadcast::Receiver<String>;

    fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        self.register(UserId::new(Uuid::new_v4().to_string()), email, password)
    }
}

struct Credential {
    user: UserId,
    salt: String,
    digest: String,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail),
    }
}

/// Identity provider keeping credentials and sessions in memory.
pub struct MemoryIdentityProvider {
    credentials: DashMap<String, Credential>,
    sessions: DashMap<String, UserId>,
    revoked: broadcast::Sender<String>,
}

impl Default for MemoryIdentityProvider {
    fn default() -> Self {
        let (revoked, _) = broadcast::channel(REVOCATION_FEED_CAPACITY);
        Self {
            credentials: DashMap::new(),
            sessions: DashMap::new(),
            revoked,
        }
    }
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn register(&self, id: UserId, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        match self.credentials.entry(email) {
            Entry::Occupied(_) => Err(AuthError::EmailTaken),
            Entry::Vacant(slot) => {
                let salt = random_hex(16);
                let digest = digest(&salt, password);
                slot.insert(Credential {
                    user: id.clone(),
                    salt,
                    digest,
                });
                tracing::debug!(user = %id, "identity registered");
                Ok(id)
            }
        }
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let credential = self
            .credentials
            .get(&email)
            .ok_or(AuthError::InvalidCredentials)?;
        if digest(&credential.salt, password) != credential.digest {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(credential.user.clone())
    }

    fn issue_token(&self, user: &UserId) -> String {
        let token = random_hex(32);
        self.sessions.insert(token.clone(), user.clone());
        token
    }

    fn resolve(&self, token: &str) -> Result<UserId, AuthError> {
        self.sessions
            .get(token)
            .map(|user| user.clone())
            .ok_or(AuthError::InvalidToken)
    }

    fn revoke(&self, token: &str) {
        if let Some((token, user)) = self.sessions.remove(token) {
            tracing::debug!(user = %user, "session revoked");
            // No receivers just means no open streams.
            let _ = self.revoked.send(token);
        }
    }

    fn revocations(&self) -> broadcast::Receiver<String> {
        self.revoked.subscribe()
    }
}
