use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Problem not found")]
    ProblemNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // argon2's error type predates std::error::Error, so we carry the message
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
