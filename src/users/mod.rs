pub mod dto;
pub mod error;
pub mod rto;
pub mod service;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use dto::update_email_dto::UpdateEmailDto;
use service::{ResponseData, ServiceResponse};

use crate::shared::http_error::HttpError;
use crate::shared::repository::user_repository::UserRepository;
use crate::AppState;

#[utoipa::path(
  patch,
  path = "/v1/users/{email}/email",
  params(
    ("email" = String, Path, description = "Current email of the user")
  ),
  request_body = UpdateEmailDto,
  responses(
    (status = 200, description = "Email updated", body = ResponseData),
    (status = 400, description = "Missing, malformed or taken email", body = ResponseData),
    (status = 404, description = "No user owns the current email", body = ResponseData)
  )
)]
pub async fn update_user_email<UR: UserRepository>(
  data: web::Data<AppState<UR>>,
  current_email: web::Path<String>,
  dto: web::Json<UpdateEmailDto>,
) -> impl Responder {
  let result =
    service::update_email(&data.user_repository, &current_email, &dto).await;
  let response = ServiceResponse::from(result);

  let status = StatusCode::from_u16(response.status_code)
    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
  HttpResponse::build(status)
    .content_type("application/json")
    .json(response.data)
}

/// Undecodable bodies get the same `{ "message": ... }` shape as the rest.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|error, _request| {
    let response = HttpResponse::BadRequest()
      .content_type("application/json")
      .json(HttpError::from("Invalid request body"));
    InternalError::from_response(error, response).into()
  })
}
