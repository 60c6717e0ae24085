use crate::{
    entities::contact_me::{ContactMeChanges, ContactMeForm, ContactMeMessage},
    errors::AppError,
    use_cases::crud::CrudHandler,
};
use validator::Validate;

pub struct ContactMeHandler {
    pub crud: CrudHandler<ContactMeMessage>,
}

impl ContactMeHandler {
    pub fn new(crud: CrudHandler<ContactMeMessage>) -> Self {
        ContactMeHandler { crud }
    }

    /// Handles the creation of a new contact message
    pub async fn create_contact_message(
        &self,
        request: ContactMeForm
    ) -> Result<ContactMeMessage, AppError> {
        request.validate()?;

        let message = self.crud.create(request.into_draft()).await?;
        tracing::info!(id = %message.id, "Contact message received");

        Ok(message)
    }

    /// Retrieves a contact message by its ID
    pub async fn get_contact_message_by_id(&self, id: &str) -> Result<ContactMeMessage, AppError> {
        self.crud.get(id).await
    }

    /// Lists all contact messages, newest first
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMeMessage>, AppError> {
        self.crud.list().await
    }

    /// Marks a message as read; repeating it is harmless
    pub async fn mark_contact_message_read(&self, id: &str) -> Result<ContactMeMessage, AppError> {
        self.crud.update(id, ContactMeChanges::MarkRead).await
    }

    /// Deletes a contact message by its ID
    pub async fn delete_contact_message(&self, id: &str) -> Result<(), AppError> {
        self.crud.delete(id).await
    }
}
