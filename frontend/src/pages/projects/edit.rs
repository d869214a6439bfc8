use super::{
    components::{form::ProjectForm, not_found::ProjectNotFound},
    utils::ProjectFormState,
    view_model::{use_project_form_view_model, use_projects_repository},
};
use crate::{components::layout::ErrorMessage, router::PROJECTS_PATH};
use leptos::{ev::SubmitEvent, *};
use leptos_router::{use_navigate, use_params_map, NavigateOptions};

#[component]
pub fn EditProjectPage() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));
    let navigate = use_navigate();
    let to_list = Callback::new(move |_| navigate(PROJECTS_PATH, NavigateOptions::default()));
    let vm = use_project_form_view_model(to_list);

    let repository = use_projects_repository();
    let project_resource = create_resource(
        move || id.get(),
        move |id| {
            let repo = repository.clone();
            async move { repo.get(&id).await }
        },
    );

    create_effect(move |_| {
        if let Some(Ok(Some(project))) = project_resource.get() {
            vm.form.set(ProjectFormState::from_project(&project));
        }
    });

    let form_view = move || {
        view! {
            <h1 class="text-4xl font-bold mb-8 text-gray-900">{"Edit Project"}</h1>
            <ProjectForm
                form=vm.form
                messages=vm.messages
                pending=vm.save_action.pending().into()
                on_file=Callback::new(move |file| vm.selected_file.set(file))
                on_submit=Callback::new(move |ev: SubmitEvent| {
                    ev.prevent_default();
                    vm.submit(Some(id.get_untracked()));
                })
                submit_label="Update Project"
            />
        }
    };

    view! {
        <div class="container mx-auto p-4">
            <Suspense fallback=|| view! {
                <div class="text-center py-12">
                    <p class="text-lg text-gray-700">{"Loading project data..."}</p>
                </div>
            }>
                {move || project_resource.get().map(|result| match result {
                    Ok(Some(_)) => form_view().into_view(),
                    Ok(None) => view! { <ProjectNotFound on_back=to_list /> }.into_view(),
                    Err(err) => {
                        log::error!("Error fetching project: {}", err);
                        view! {
                            <ErrorMessage message=format!("Error fetching project: {}", err) />
                            <ProjectNotFound on_back=to_list />
                        }
                        .into_view()
                    }
                })}
            </Suspense>
        </div>
    }
}
