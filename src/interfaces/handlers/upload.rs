use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::image::ImageUploadForm, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(_claims, state, form))]
pub async fn upload_image(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ImageUploadForm>,
) -> Result<impl Responder, AppError> {
    let response = state.upload_handler
        .upload_image(form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
