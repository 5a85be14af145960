use actix_web::http::StatusCode;
use thiserror::Error;

use crate::shared::repository::user_repository::UserRepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  Conflict,
  NotFound,
  Internal,
}

/// Every way an email update can be refused. The `Display` text is the
/// message handed back to the caller.
#[derive(Debug, Error)]
pub enum UpdateEmailError {
  #[error("Email is required")]
  EmailRequired,

  #[error("Invalid email address format")]
  InvalidEmailFormat,

  #[error("Email already in use")]
  EmailInUse,

  #[error("User not found")]
  UserNotFound,

  #[error("Internal server error")]
  Repository(#[source] UserRepositoryError),
}

impl UpdateEmailError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::EmailRequired | Self::InvalidEmailFormat => ErrorKind::Validation,
      Self::EmailInUse => ErrorKind::Conflict,
      Self::UserNotFound => ErrorKind::NotFound,
      Self::Repository(_) => ErrorKind::Internal,
    }
  }

  // Conflicts answer 400 rather than 409, clients already rely on it.
  pub fn status_code(&self) -> StatusCode {
    match self.kind() {
      ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<UserRepositoryError> for UpdateEmailError {
  fn from(error: UserRepositoryError) -> Self {
    match error {
      UserRepositoryError::DuplicateEmail => Self::EmailInUse,
      other => Self::Repository(other),
    }
  }
}
