use validator::Validate;

use crate::{
    entities::project::{Project, ProjectForm},
    errors::AppError,
    use_cases::crud::CrudHandler,
};

pub struct ProjectHandler {
    pub crud: CrudHandler<Project>,
}

impl ProjectHandler {
    pub fn new(crud: CrudHandler<Project>) -> Self {
        ProjectHandler { crud }
    }

    /// Lists projects newest first, optionally only those tagged `category`.
    ///
    /// `all` is the site's "show everything" filter and is never matched as a
    /// tag, so a project tagged `all` is only reachable through the full list.
    pub async fn list_projects(&self, category: Option<&str>) -> Result<Vec<Project>, AppError> {
        let projects = self.crud.list().await?;

        Ok(match category.map(str::trim).filter(|c| !c.is_empty() && *c != "all") {
            Some(tag) => projects
                .into_iter()
                .filter(|p| p.category.contains(tag))
                .collect(),
            None => projects,
        })
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        self.crud.get(id).await
    }

    /// Validates and normalizes the form, then stores a new project
    pub async fn create_project(&self, form: ProjectForm) -> Result<Project, AppError> {
        form.validate()?;
        self.crud.create(form.into_draft()).await
    }

    /// Replaces every editable field; omitted fields fall back to their defaults
    pub async fn update_project(&self, id: &str, form: ProjectForm) -> Result<Project, AppError> {
        form.validate()?;
        self.crud.update(id, form.into_draft()).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        self.crud.delete(id).await
    }
}
