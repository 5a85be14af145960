use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::{model::user::User, role::Role};

/// Public view of a user. The password hash never leaves the service.
#[derive(ToSchema)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRto {
  pub uuid: String,
  pub username: String,
  pub email: String,
  pub role: Role,
  #[serde(rename = "updatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserRto {
  fn from(user: User) -> Self {
    Self {
      uuid: user.uuid,
      username: user.username,
      email: user.email,
      role: user.role,
      updated_at: user.updated_at,
    }
  }
}
