use crate::api::{Project, ProjectPayload};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFormState {
    pub title: String,
    pub description: String,
    pub project_link: String,
    pub github_link: String,
    /// URL of the image already attached to the project, kept when no new
    /// file is chosen.
    pub image_url: Option<String>,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ProjectFormState {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone().unwrap_or_default(),
            project_link: project.project_link.clone().unwrap_or_default(),
            github_link: project.github_link.clone().unwrap_or_default(),
            image_url: project.image_url.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn to_payload(&self) -> ProjectPayload {
        ProjectPayload {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            image_url: self.image_url.clone(),
            project_link: optional(&self.project_link),
            github_link: optional(&self.github_link),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }
}
