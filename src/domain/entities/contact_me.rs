use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{entities::entity::Entity, utils::validation::not_blank};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactMeForm {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name must be between 1 and 100 characters")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Message must be between 1 and 5000 characters"))]
    pub message: String,
}

impl ContactMeForm {
    pub fn into_draft(self) -> ContactMeDraft {
        ContactMeDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMeDraft {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMeMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// The only mutation a stored message accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactMeChanges {
    MarkRead,
}

impl Entity for ContactMeMessage {
    const COLLECTION: &'static str = "contact_messages";
    const LABEL: &'static str = "Contact message";

    type Draft = ContactMeDraft;
    type Changes = ContactMeChanges;

    fn materialize(id: Uuid, created_at: DateTime<Utc>, draft: ContactMeDraft) -> Self {
        ContactMeMessage {
            id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            read: false,
            created_at,
        }
    }

    fn apply(&mut self, changes: ContactMeChanges) {
        match changes {
            ContactMeChanges::MarkRead => self.read = true,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
