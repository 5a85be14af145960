use mongodb::{
  bson::{doc, Document},
  error::{ErrorKind, WriteFailure},
  options::IndexOptions,
  Collection, IndexModel,
};
use thiserror::Error;

use crate::shared::{database::MongoDatabase, model::user::User};

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("MongoDB error: {0}")]
  Mongo(#[from] mongodb::error::Error),

  #[error("Email already stored on another user")]
  DuplicateEmail,
}

pub trait UserRepository {
  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<User>, UserRepositoryError>;
  async fn exists_by_email(
    &self,
    email: &str,
  ) -> Result<bool, UserRepositoryError>;
  async fn save(&self, user: User) -> Result<User, UserRepositoryError>;
}

// ### MongoDB implementation ###

pub struct MongoUserRepositoryImpl {
  users: Collection<User>,
}

impl MongoUserRepositoryImpl {
  pub fn new(database: &MongoDatabase) -> Self {
    Self {
      users: database.database().collection(USERS_COLLECTION),
    }
  }

  /// Creates the unique indexes the email invariant relies on. A concurrent
  /// update that slips between `exists_by_email` and `save` is rejected by
  /// the server and surfaces as [`UserRepositoryError::DuplicateEmail`].
  pub async fn ensure_indexes(&self) -> Result<(), UserRepositoryError> {
    for key in ["email", "username"] {
      let mut keys = Document::new();
      keys.insert(key, 1);
      let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build();
      self.users.create_index(index).await?;
    }
    Ok(())
  }
}

impl UserRepository for MongoUserRepositoryImpl {
  async fn find_by_email(
    &self,
    email: &str,
  ) -> Result<Option<User>, UserRepositoryError> {
    Ok(self.users.find_one(doc! { "email": email }).await?)
  }

  async fn exists_by_email(
    &self,
    email: &str,
  ) -> Result<bool, UserRepositoryError> {
    let count = self.users.count_documents(doc! { "email": email }).await?;
    Ok(count > 0)
  }

  async fn save(&self, user: User) -> Result<User, UserRepositoryError> {
    self
      .users
      .replace_one(doc! { "uuid": user.uuid.as_str() }, &user)
      .upsert(true)
      .await
      .map_err(|error| {
        if is_duplicate_key(&error) {
          UserRepositoryError::DuplicateEmail
        } else {
          UserRepositoryError::from(error)
        }
      })?;
    Ok(user)
  }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
  matches!(
    &*error.kind,
    ErrorKind::Write(WriteFailure::WriteError(write_error))
      if write_error.code == DUPLICATE_KEY_CODE
  )
}
