use super::{components::form::ProjectForm, view_model::use_project_form_view_model};
use crate::router::PROJECTS_PATH;
use leptos::{ev::SubmitEvent, *};
use leptos_router::{use_navigate, NavigateOptions};

#[component]
pub fn NewProjectPage() -> impl IntoView {
    let navigate = use_navigate();
    let vm = use_project_form_view_model(Callback::new(move |_| {
        navigate(PROJECTS_PATH, NavigateOptions::default())
    }));

    view! {
        <div class="container mx-auto p-4">
            <h1 class="text-4xl font-bold mb-8 text-gray-900">{"Add New Project"}</h1>
            <ProjectForm
                form=vm.form
                messages=vm.messages
                pending=vm.save_action.pending().into()
                on_file=Callback::new(move |file| vm.selected_file.set(file))
                on_submit=Callback::new(move |ev: SubmitEvent| {
                    ev.prevent_default();
                    vm.submit(None);
                })
                submit_label="Create Project"
            />
        </div>
    }
}
