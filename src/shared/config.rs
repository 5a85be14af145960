use std::env;

#[derive(Clone, Debug)]
pub struct Config {
  pub host: String,
  pub mongodb_uri: String,
  pub mongodb_database: String,
}

impl Default for Config {
  fn default() -> Self {
    let host =
      env::var("HOST").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let mongodb_uri = env::var("MONGODB_URI")
      .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongodb_database =
      env::var("MONGODB_DATABASE").unwrap_or_else(|_| "taille".to_string());
    Self {
      host,
      mongodb_uri,
      mongodb_database,
    }
  }
}
