use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, Project, ProjectPayload},
};

pub const PROJECTS_TABLE: &str = "projects";

const RETURN_REPRESENTATION: &str = "return=representation";

impl ApiClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let builder = self
            .request(Method::GET, &self.rest_url(PROJECTS_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = Self::send(builder).await?;
        Self::decode(response).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError> {
        self.select_single(PROJECTS_TABLE, "*", "id", id).await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        payload.validate()?;
        let builder = self
            .request(Method::POST, &self.rest_url(PROJECTS_TABLE))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(payload);
        let response = Self::send(builder).await?;
        let mut rows: Vec<Project> = Self::decode(response).await?;
        if rows.is_empty() {
            return Err(ApiError::unknown("Insert returned no rows"));
        }
        Ok(rows.swap_remove(0))
    }

    pub async fn update_project(
        &self,
        id: &str,
        payload: &ProjectPayload,
    ) -> Result<Project, ApiError> {
        payload.validate()?;
        let filter = format!("eq.{}", id);
        let builder = self
            .request(Method::PATCH, &self.rest_url(PROJECTS_TABLE))
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", filter.as_str())])
            .json(payload);
        let response = Self::send(builder).await?;
        let mut rows: Vec<Project> = Self::decode(response).await?;
        if rows.is_empty() {
            return Err(ApiError::not_found(format!("Project {} not found", id)));
        }
        Ok(rows.swap_remove(0))
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        let filter = format!("eq.{}", id);
        let builder = self
            .request(Method::DELETE, &self.rest_url(PROJECTS_TABLE))
            .query(&[("id", filter.as_str())]);
        Self::send(builder).await.map(|_| ())
    }
}
