use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::users::error::UpdateEmailError;

#[derive(ToSchema)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmailDto {
  pub email: Option<String>,
}

impl UpdateEmailDto {
  /// Presence first, then syntax. An empty string counts as absent.
  pub fn validated_email(&self) -> Result<&str, UpdateEmailError> {
    let email = match self.email.as_deref() {
      Some(email) if !email.is_empty() => email,
      _ => return Err(UpdateEmailError::EmailRequired),
    };
    if !is_valid_email(email) {
      return Err(UpdateEmailError::InvalidEmailFormat);
    }
    Ok(email)
  }
}

// `validator` accepts dotless hosts such as `user@localhost` and IP
// literals, addresses here need a dotted host name ending in a real
// alphabetic top-level domain.
fn is_valid_email(email: &str) -> bool {
  if !email.validate_email() {
    return false;
  }
  let Some((_, domain)) = email.rsplit_once('@') else {
    return false;
  };
  if domain.starts_with('[') {
    return false;
  }
  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
    return false;
  }
  labels.last().is_some_and(|tld| {
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
  })
}
