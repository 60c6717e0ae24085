use actix_web::{post, web, HttpResponse, Responder, ResponseError};
use tracing::instrument;

use crate::entities::admin::LoginUser;
use crate::AppState;

#[post("/login")]
#[instrument(skip(state, user))]
pub async fn login(
    state: web::Data<AppState>,
    user: web::Json<LoginUser>
) -> impl Responder {
    match state.auth_handler.login(user.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}
