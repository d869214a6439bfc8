use crate::api::{
    ApiClient, ApiError, ImageUpload, Project, ProjectPayload, PROJECT_IMAGES_BUCKET,
};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error("Error uploading new image: {0}")]
    Upload(ApiError),
    #[error("Error creating project: {0}")]
    Create(ApiError),
    #[error("Error updating project: {0}")]
    Update(ApiError),
}

/// One submit of the create or edit form. `id` is `None` for a new project.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub id: Option<String>,
    pub payload: ProjectPayload,
    pub image: Option<ImageUpload>,
}

impl SaveRequest {
    pub fn success_message(&self) -> &'static str {
        if self.id.is_some() {
            "Project updated successfully!"
        } else {
            "Project created successfully!"
        }
    }
}

/// Object key for a freshly uploaded image: `public/<file name>_<unix millis>`.
pub fn image_object_path(file_name: &str, millis: i64) -> String {
    format!("public/{}_{}", file_name, millis)
}

#[derive(Clone)]
pub struct ProjectsRepository {
    client: Rc<ApiClient>,
}

impl ProjectsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.client.list_projects().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Project>, ApiError> {
        self.client.get_project(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_project(id).await
    }

    /// Uploads the chosen image (if any) and then writes the row. A failed
    /// upload stops before the row is touched.
    pub async fn save(&self, request: SaveRequest, now_millis: i64) -> Result<Project, SaveError> {
        let SaveRequest {
            id,
            mut payload,
            image,
        } = request;

        if let Some(image) = image {
            payload.image_url = Some(self.upload_image(image, now_millis).await?);
        }

        match id {
            Some(id) => self
                .client
                .update_project(&id, &payload)
                .await
                .map_err(SaveError::Update),
            None => self
                .client
                .create_project(&payload)
                .await
                .map_err(SaveError::Create),
        }
    }

    async fn upload_image(&self, image: ImageUpload, now_millis: i64) -> Result<String, SaveError> {
        let path = image_object_path(&image.file_name, now_millis);
        let stored = self
            .client
            .upload_object(
                PROJECT_IMAGES_BUCKET,
                &path,
                image.bytes,
                &image.content_type,
                true,
            )
            .await
            .map_err(SaveError::Upload)?;
        Ok(self.client.public_url(PROJECT_IMAGES_BUCKET, &stored.path))
    }
}
