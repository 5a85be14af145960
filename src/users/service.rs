use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::{
  shared::{model::user::User, repository::user_repository::UserRepository},
  users::{
    dto::update_email_dto::UpdateEmailDto,
    error::UpdateEmailError,
    rto::user_rto::UserRto,
  },
};

const EMAIL_UPDATED: &str = "Email updated successfully";

#[derive(ToSchema)]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseData {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user: Option<UserRto>,
}

/// Outcome of an update as handed to callers: a body and the status code
/// that goes with it. Failures are values here, never panics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceResponse {
  pub data: ResponseData,
  #[serde(rename = "statusCode")]
  pub status_code: u16,
}

impl From<Result<User, UpdateEmailError>> for ServiceResponse {
  fn from(result: Result<User, UpdateEmailError>) -> Self {
    match result {
      Ok(user) => Self {
        data: ResponseData {
          message: Some(EMAIL_UPDATED.to_string()),
          user: Some(UserRto::from(user)),
        },
        status_code: 200,
      },
      Err(error) => Self {
        data: ResponseData {
          message: Some(error.to_string()),
          user: None,
        },
        status_code: error.status_code().as_u16(),
      },
    }
  }
}

/// Moves the user currently registered under `current_email` to the address
/// in `dto`.
///
/// Checks run in a fixed order and stop at the first failure: presence,
/// syntax, uniqueness, then existence of the target user. Only a request
/// that passes all of them reaches storage with a write. An address already
/// held by anyone, the caller included, is a conflict.
#[tracing::instrument(skip_all)]
pub async fn update_email<UR: UserRepository>(
  user_repository: &UR,
  current_email: &str,
  dto: &UpdateEmailDto,
) -> Result<User, UpdateEmailError> {
  let result = apply_update(user_repository, current_email, dto).await;
  match &result {
    Ok(user) => info!(uuid = %user.uuid, "email updated"),
    Err(UpdateEmailError::Repository(source)) => {
      error!(error = %source, "email update failed in storage")
    }
    Err(rejection) => {
      warn!(
        kind = ?rejection.kind(),
        reason = %rejection,
        "email update rejected"
      )
    }
  }
  result
}

async fn apply_update<UR: UserRepository>(
  user_repository: &UR,
  current_email: &str,
  dto: &UpdateEmailDto,
) -> Result<User, UpdateEmailError> {
  let new_email = dto.validated_email()?;

  if user_repository.exists_by_email(new_email).await? {
    return Err(UpdateEmailError::EmailInUse);
  }

  let Some(mut user) = user_repository.find_by_email(current_email).await?
  else {
    return Err(UpdateEmailError::UserNotFound);
  };

  user.change_email(new_email);
  Ok(user_repository.save(user).await?)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use fake::{
    faker::internet::en::{Password, SafeEmail, Username},
    Fake,
  };
  use nanoid::nanoid;

  use super::*;
  use crate::{
    shared::{
      repository::user_repository::tests::{
        FailingUserRepository, InMemoryUserRepository, RacingUserRepository,
      },
      role::Role,
    },
    users::error::ErrorKind,
  };

  const USER_EMAIL: &str = "harsh.shah@yopmail.com";

  fn customer(email: &str) -> User {
    let now = Utc::now();
    User {
      uuid: nanoid!(),
      username: Username().fake(),
      password_hash: Password(12..13).fake(),
      email: email.to_string(),
      role: Role::Customer,
      created_at: now,
      updated_at: now,
    }
  }

  fn body(email: Option<&str>) -> UpdateEmailDto {
    UpdateEmailDto {
      email: email.map(String::from),
    }
  }

  fn message(response: &ServiceResponse) -> &str {
    response.data.message.as_deref().unwrap_or_default()
  }

  #[actix_web::test]
  async fn test_update_email_requires_email() {
    let repository = InMemoryUserRepository::new(vec![customer(USER_EMAIL)]);

    for dto in [body(None), body(Some(""))] {
      let response = ServiceResponse::from(
        update_email(&repository, USER_EMAIL, &dto).await,
      );
      assert_eq!(
        response,
        ServiceResponse {
          data: ResponseData {
            message: Some(String::from("Email is required")),
            user: None,
          },
          status_code: 400,
        }
      );
    }
    assert_eq!(repository.write_count(), 0);
  }

  #[actix_web::test]
  async fn test_update_email_rejects_invalid_format() {
    let repository = InMemoryUserRepository::new(vec![customer(USER_EMAIL)]);

    let result =
      update_email(&repository, USER_EMAIL, &body(Some("invalid-email"))).await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Validation);
    let response = ServiceResponse::from(Err(error));
    assert_eq!(message(&response), "Invalid email address format");
    assert_eq!(response.status_code, 400);
    assert_eq!(repository.write_count(), 0);
  }

  #[actix_web::test]
  async fn test_update_email_rejects_email_in_use() {
    let other_email: String = SafeEmail().fake();
    let repository = InMemoryUserRepository::new(vec![
      customer(USER_EMAIL),
      customer(&other_email),
    ]);

    for taken in [USER_EMAIL, other_email.as_str()] {
      let result =
        update_email(&repository, USER_EMAIL, &body(Some(taken))).await;
      let error = result.unwrap_err();
      assert_eq!(error.kind(), ErrorKind::Conflict);

      let response = ServiceResponse::from(Err(error));
      assert_eq!(message(&response), "Email already in use");
      assert_eq!(response.status_code, 400);
    }
    assert_eq!(repository.write_count(), 0);
  }

  #[actix_web::test]
  async fn test_update_email_user_not_found() {
    let repository = InMemoryUserRepository::new(vec![customer(USER_EMAIL)]);
    let missing = "harsh2.shah@yopmail.com";

    let response = ServiceResponse::from(
      update_email(&repository, missing, &body(Some(missing))).await,
    );

    assert_eq!(message(&response), "User not found");
    assert_eq!(response.status_code, 404);
    assert_eq!(repository.write_count(), 0);
  }

  #[actix_web::test]
  async fn test_format_is_checked_before_uniqueness() {
    // Storage is unreachable, so any lookup would turn into a 500.
    let response = ServiceResponse::from(
      update_email(&FailingUserRepository, USER_EMAIL, &body(Some("nope")))
        .await,
    );
    assert_eq!(message(&response), "Invalid email address format");
  }

  #[actix_web::test]
  async fn test_uniqueness_is_checked_before_user_lookup() {
    let taken = "taken@example.com";
    let repository = InMemoryUserRepository::new(vec![customer(taken)]);

    // Neither the current user exists nor is the address free: conflict wins.
    let response = ServiceResponse::from(
      update_email(&repository, "ghost@example.com", &body(Some(taken))).await,
    );
    assert_eq!(message(&response), "Email already in use");
  }

  #[actix_web::test]
  async fn test_update_email_successful() {
    let user = customer(USER_EMAIL);
    let repository = InMemoryUserRepository::new(vec![user.clone()]);
    let new_email = "new-email@example.com";

    let response = ServiceResponse::from(
      update_email(&repository, USER_EMAIL, &body(Some(new_email))).await,
    );

    assert_eq!(response.status_code, 200);
    let rto = response.data.user.unwrap();
    assert_eq!(rto.email, new_email);
    assert_eq!(rto.uuid, user.uuid);
    assert!(rto.updated_at >= user.updated_at);

    let users = repository.users.read().unwrap().clone();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, new_email);
    assert_eq!(users[0].username, user.username);
    assert_eq!(users[0].password_hash, user.password_hash);
    assert_eq!(repository.write_count(), 1);
  }

  #[actix_web::test]
  async fn test_repeating_update_conflicts() {
    let repository = InMemoryUserRepository::new(vec![customer(USER_EMAIL)]);
    let new_email = "new-email@example.com";

    let first =
      update_email(&repository, USER_EMAIL, &body(Some(new_email))).await;
    assert!(first.is_ok());

    let second =
      update_email(&repository, USER_EMAIL, &body(Some(new_email))).await;
    assert!(matches!(second, Err(UpdateEmailError::EmailInUse)));
    assert_eq!(repository.write_count(), 1);
  }

  #[actix_web::test]
  async fn test_concurrent_claim_on_save_is_conflict() {
    let repository = RacingUserRepository {
      inner: InMemoryUserRepository::new(vec![customer(USER_EMAIL)]),
    };

    let response = ServiceResponse::from(
      update_email(&repository, USER_EMAIL, &body(Some("fresh@example.com")))
        .await,
    );

    assert_eq!(message(&response), "Email already in use");
    assert_eq!(response.status_code, 400);
  }

  #[actix_web::test]
  async fn test_storage_failure_is_internal_error() {
    let result = update_email(
      &FailingUserRepository,
      USER_EMAIL,
      &body(Some("fresh@example.com")),
    )
    .await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Internal);
    let response = ServiceResponse::from(Err(error));
    assert_eq!(message(&response), "Internal server error");
    assert_eq!(response.status_code, 500);
  }

  #[test]
  fn test_response_serializes_status_code_in_camel_case() {
    let response = ServiceResponse::from(Err(UpdateEmailError::UserNotFound));
    assert_eq!(
      serde_json::to_value(&response).unwrap(),
      serde_json::json!({
        "data": { "message": "User not found" },
        "statusCode": 404,
      })
    );
  }
}
