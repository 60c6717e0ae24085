use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact_me::ContactMeForm, errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[instrument(skip(state, form))]
pub async fn create_contact_me(
    state: web::Data<AppState>,
    form: web::Json<ContactMeForm>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler
        .create_contact_message(form.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(message))
}

#[instrument(skip(_claims, state))]
pub async fn list_contact_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.contact_handler.list_contact_messages().await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[instrument(skip(_claims, state))]
pub async fn get_contact_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler
        .get_contact_message_by_id(&message_id)
        .await?;

    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(_claims, state))]
pub async fn mark_contact_message_read(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler
        .mark_contact_message_read(&message_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

#[instrument(skip(_claims, state))]
pub async fn delete_contact_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_contact_message(&message_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
