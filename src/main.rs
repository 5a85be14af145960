mod shared;
mod users;

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use shared::{
  check_health,
  config::Config,
  database::MongoDatabase,
  repository::user_repository::{MongoUserRepositoryImpl, UserRepository},
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use users::update_user_email;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// This struct represents state
pub struct AppState<UR: UserRepository> {
  pub user_repository: UR,
}

#[derive(OpenApi)]
#[openapi(paths(shared::check_health, users::update_user_email))]
struct ApiDoc;

#[actix_web::main]
async fn main() -> io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  let config = Config::default();
  let database = MongoDatabase::connect(&config)
    .await
    .map_err(io::Error::other)?;
  let user_repository = MongoUserRepositoryImpl::new(&database);
  user_repository
    .ensure_indexes()
    .await
    .map_err(io::Error::other)?;

  let app_state = web::Data::new(AppState { user_repository });
  let openapi = ApiDoc::openapi();

  info!(address = %config.host, "listening");
  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .app_data(app_state.clone())
      .configure(routes::<MongoUserRepositoryImpl>)
      .service(
        SwaggerUi::new("/swagger-ui/{_:.*}")
          .url("/api-docs/openapi.json", openapi.clone()),
      )
  })
  .bind(&config.host)?
  .run()
  .await
}

// Registers the HTTP surface; `AppState<UR>` must already be in app data.
fn routes<UR: UserRepository + 'static>(config: &mut web::ServiceConfig) {
  config
    .route("/health", web::get().to(check_health))
    .service(
      web::scope("/v1/users")
        .app_data(users::json_config())
        .route("/{email}/email", web::patch().to(update_user_email::<UR>)),
    );
}
