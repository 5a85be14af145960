use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
  pub uuid: String,
  pub username: String,
  pub password_hash: String,
  pub email: String,
  pub role: Role,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Replaces the address and bumps `updated_at`. Uniqueness is the
  /// caller's (and the storage index's) concern.
  pub fn change_email(&mut self, email: &str) {
    self.email = email.to_string();
    self.updated_at = Utc::now();
  }
}
