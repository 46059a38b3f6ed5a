//! # Authentication
//!
//! Credential flows over the [`UserStore`](crate::store::UserStore), plus
//! the two primitives they rest on: Argon2id password hashing
//! ([`password`]) and the in-process session table ([`session`]).
//!
//! The state machine per client is Anonymous → (login/signup) →
//! Authenticated → (logout or invalid token) → Anonymous. Signup implies
//! login. Login failure deliberately does not distinguish an unknown
//! username from a wrong password, to avoid username enumeration.
//!
//! Functions here take stores and plain values and return `Result`; session
//! establishment is the caller's move, since only the transport layer knows
//! where tokens go.

pub mod password;
pub mod session;

pub use session::SessionStore;

use crate::error::{Error, Result};
use crate::model::User;
use crate::store::UserStore;
use tracing::warn;

const MIN_PASSWORD_LEN: usize = 6;

/// Registers a new account. Validation first, then hash, then the
/// uniqueness-checked save; a collision surfaces the specific field.
pub fn signup(users: &UserStore, username: &str, email: &str, password: &str) -> Result<User> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::validation(
            "Username, email, and password are required",
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(
            "Password must be at least 6 characters",
        ));
    }

    let password_hash = password::hash_password(password)?;
    users.save_user(User::new(
        username.to_string(),
        email.to_string(),
        password_hash,
    ))
}

/// Authenticates by username and password. Unknown user and wrong password
/// produce the same error.
pub fn login(users: &UserStore, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(Error::validation("Username and password are required"));
    }

    let Some(user) = users.get_by_username(username) else {
        warn!(username, "login attempt for unknown username");
        return Err(Error::InvalidCredentials);
    };
    if !password::verify_password(password, &user.password_hash) {
        warn!(username, "login attempt with wrong password");
        return Err(Error::InvalidCredentials);
    }
    Ok(user)
}

/// Replaces a user's password after re-verifying the current one.
pub fn change_password(
    users: &UserStore,
    user: &User,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    if current_password.is_empty() || new_password.is_empty() {
        return Err(Error::validation(
            "Current password and new password are required",
        ));
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(
            "New password must be at least 6 characters",
        ));
    }
    if !password::verify_password(current_password, &user.password_hash) {
        return Err(Error::WrongPassword);
    }

    let new_hash = password::hash_password(new_password)?;
    users.update_password(&user.id, &new_hash)
}
