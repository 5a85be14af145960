use mongodb::{Client, Database};

use super::config::Config;

pub struct MongoDatabase {
  pub mongo_client: Client,
  database_name: String,
}

impl MongoDatabase {
  // The driver connects lazily, this only fails on a malformed URI.
  pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
    let mongo_client = Client::with_uri_str(&config.mongodb_uri).await?;
    Ok(Self {
      mongo_client,
      database_name: config.mongodb_database.clone(),
    })
  }

  pub fn database(&self) -> Database {
    self.mongo_client.database(&self.database_name)
  }
}
