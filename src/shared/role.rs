use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
  #[serde(rename = "ADMIN")]
  Admin,
  #[serde(rename = "MANAGER")]
  Manager,
  #[serde(rename = "CUSTOMER")]
  Customer,
}
