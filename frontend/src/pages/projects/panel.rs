use super::{
    components::{delete_dialog::DeleteProjectDialog, list::ProjectTable},
    view_model::use_project_list_view_model,
};
use crate::{
    components::layout::{ErrorMessage, LoadingSpinner, SuccessMessage},
    router::NEW_PROJECT_PATH,
};
use leptos::*;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let vm = use_project_list_view_model();
    let projects_resource = vm.projects_resource;
    let messages = vm.messages;
    let pending_delete = vm.pending_delete;

    let projects = Signal::derive(move || {
        projects_resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });
    let fetch_error = Signal::derive(move || {
        projects_resource
            .get()
            .and_then(|result| result.err())
            .map(|err| format!("Error fetching projects: {}", err))
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">{"Manage Projects"}</h1>
                <a
                    href=NEW_PROJECT_PATH
                    class="bg-blue-600 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded"
                >
                    {"Add New Project"}
                </a>
            </div>

            <Show when=move || messages.get().error.is_some()>
                <ErrorMessage message={messages.get().error.unwrap_or_default()} />
            </Show>
            <Show when=move || messages.get().success.is_some()>
                <SuccessMessage message={messages.get().success.unwrap_or_default()} />
            </Show>
            <Show when=move || fetch_error.get().is_some()>
                <ErrorMessage message={fetch_error.get().unwrap_or_default()} />
            </Show>

            <div class="bg-white shadow rounded-lg p-6">
                <Transition fallback=|| view! { <LoadingSpinner /> }>
                    <ProjectTable
                        projects=projects
                        on_delete=Callback::new(move |project| pending_delete.set(Some(project)))
                    />
                </Transition>
            </div>

            <DeleteProjectDialog pending_delete=pending_delete delete_action=vm.delete_action />
        </div>
    }
}
