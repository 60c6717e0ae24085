use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::DEFAULT_PROJECT_IMAGE,
    entities::{categories::Categories, entity::Entity},
    utils::validation::not_blank,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    #[serde(default)]
    pub project_link: String,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub category: Categories,
    pub created_at: DateTime<Utc>,
}

fn default_image_url() -> String {
    DEFAULT_PROJECT_IMAGE.to_string()
}

/// Normalized project fields, used both for inserts and full-replacement updates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_link: String,
    pub github_link: String,
    pub category: Categories,
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "Project";

    type Draft = ProjectDraft;
    type Changes = ProjectDraft;

    fn materialize(id: Uuid, created_at: DateTime<Utc>, draft: ProjectDraft) -> Self {
        Project {
            id,
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            project_link: draft.project_link,
            github_link: draft.github_link,
            category: draft.category,
            created_at,
        }
    }

    fn apply(&mut self, changes: ProjectDraft) {
        self.title = changes.title;
        self.description = changes.description;
        self.image_url = changes.image_url;
        self.project_link = changes.project_link;
        self.github_link = changes.github_link;
        self.category = changes.category;
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Request body for creating or replacing a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 200, message = "Title must be between 1 and 200 characters")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_link", message = "Image URL must be an absolute URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_link", message = "Project link must be an absolute URL"))]
    pub project_link: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_link", message = "GitHub link must be an absolute URL"))]
    pub github_link: Option<String>,

    #[serde(default)]
    pub category: Categories,
}

impl ProjectForm {
    pub fn into_draft(self) -> ProjectDraft {
        let image_url = non_blank(self.image_url).unwrap_or_else(default_image_url);

        ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url,
            project_link: non_blank(self.project_link).unwrap_or_default(),
            github_link: non_blank(self.github_link).unwrap_or_default(),
            category: self.category,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts an empty string or an absolute URL. Relative paths such as
/// `/uploads/x.png` are allowed for images served by this API.
fn validate_link(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.starts_with('/') || url::Url::parse(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_url"))
    }
}
