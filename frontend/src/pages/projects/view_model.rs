use super::{
    repository::{ProjectsRepository, SaveError, SaveRequest},
    utils::{MessageState, ProjectFormState},
};
use crate::{
    api::{ApiError, Project, ProjectPayload},
    state::auth::use_api_client,
    utils::{file::read_image_upload, time::now_millis},
};
use leptos::*;
use std::rc::Rc;

pub fn use_projects_repository() -> ProjectsRepository {
    ProjectsRepository::new_with_client(Rc::new(use_api_client()))
}

#[derive(Clone, Copy)]
pub struct ProjectListViewModel {
    pub messages: RwSignal<MessageState>,
    pub reload: RwSignal<u32>,
    pub pending_delete: RwSignal<Option<Project>>,
    pub projects_resource: Resource<u32, Result<Vec<Project>, ApiError>>,
    pub delete_action: Action<Project, Result<Project, ApiError>>,
}

pub fn use_project_list_view_model() -> ProjectListViewModel {
    let repository = use_projects_repository();
    let messages = create_rw_signal(MessageState::default());
    let reload = create_rw_signal(0u32);
    let pending_delete = create_rw_signal(None::<Project>);

    let repo_for_resource = repository.clone();
    let projects_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_resource.clone();
            async move { repo.list().await }
        },
    );

    let repo_for_delete = repository.clone();
    let delete_action = create_action(move |project: &Project| {
        let repo = repo_for_delete.clone();
        let project = project.clone();
        async move { repo.delete(&project.id).await.map(|_| project) }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            pending_delete.set(None);
            match result {
                Ok(project) => {
                    messages.update(|state| {
                        state.set_success(format!("Project '{}' deleted.", project.title))
                    });
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => {
                    log::error!("Error deleting project: {}", err);
                    messages.update(|state| state.set_error(format!("Error deleting project: {}", err)));
                }
            }
        }
    });

    ProjectListViewModel {
        messages,
        reload,
        pending_delete,
        projects_resource,
        delete_action,
    }
}

/// Input of the save action. The picked file is read into memory inside the
/// action so a read failure reports like an upload failure.
#[derive(Debug, Clone)]
pub struct ProjectSubmission {
    pub id: Option<String>,
    pub payload: ProjectPayload,
    pub file: Option<web_sys::File>,
}

#[derive(Clone, Copy)]
pub struct ProjectFormViewModel {
    pub form: RwSignal<ProjectFormState>,
    pub messages: RwSignal<MessageState>,
    pub selected_file: RwSignal<Option<web_sys::File>>,
    pub save_action: Action<ProjectSubmission, Result<&'static str, SaveError>>,
}

impl ProjectFormViewModel {
    pub fn submit(&self, id: Option<String>) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        self.messages.update(MessageState::clear);
        let current = self.form.get_untracked();
        if !current.is_valid() {
            self.messages.update(|state| state.set_error("Title is required"));
            return;
        }
        self.save_action.dispatch(ProjectSubmission {
            id,
            payload: current.to_payload(),
            file: self.selected_file.get_untracked(),
        });
    }
}

pub async fn save_submission(
    repo: &ProjectsRepository,
    submission: ProjectSubmission,
) -> Result<&'static str, SaveError> {
    let image = match submission.file {
        Some(file) => Some(read_image_upload(&file).await.map_err(SaveError::Upload)?),
        None => None,
    };
    let request = SaveRequest {
        id: submission.id,
        payload: submission.payload,
        image,
    };
    let message = request.success_message();
    repo.save(request, now_millis()).await.map(|_| message)
}

/// `on_saved` runs after the success message is set.
pub fn use_project_form_view_model(on_saved: Callback<()>) -> ProjectFormViewModel {
    let repository = use_projects_repository();
    let form = create_rw_signal(ProjectFormState::default());
    let messages = create_rw_signal(MessageState::default());
    let selected_file = create_rw_signal(None::<web_sys::File>);

    let save_action = create_action(move |submission: &ProjectSubmission| {
        let repo = repository.clone();
        let submission = submission.clone();
        async move { save_submission(&repo, submission).await }
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(message) => {
                    messages.update(|state| state.set_success(message));
                    selected_file.set(None);
                    on_saved.call(());
                }
                Err(err) => {
                    log::error!("{}", err);
                    messages.update(|state| state.set_error(err.to_string()));
                }
            }
        }
    });

    ProjectFormViewModel {
        form,
        messages,
        selected_file,
        save_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::test_support::ssr::with_runtime;
    use httpmock::{prelude::*, Method::PATCH};
    use serde_json::json;

    #[test]
    fn blank_title_is_reported_without_dispatching() {
        with_runtime(|| {
            provide_context(ApiClient::new_with_base_url("http://localhost:9"));
            let vm = use_project_form_view_model(Callback::new(|_| {}));
            vm.submit(None);
            assert_eq!(vm.messages.get().error.as_deref(), Some("Title is required"));
            assert!(vm.save_action.input().get().is_none());
        });
    }

    #[tokio::test]
    async fn submission_without_file_updates_and_reports_success() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/projects")
                    .query_param("id", "eq.4");
                then.status(200)
                    .json_body(json!([{ "id": 4, "title": "Renamed" }]));
            })
            .await;
        let repo = ProjectsRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.base_url(),
        )));

        let message = save_submission(
            &repo,
            ProjectSubmission {
                id: Some("4".into()),
                payload: ProjectPayload {
                    title: "Renamed".into(),
                    ..ProjectPayload::default()
                },
                file: None,
            },
        )
        .await
        .unwrap();

        update.assert_async().await;
        assert_eq!(message, "Project updated successfully!");
    }
}
