use crate::api::{ApiError, Project};
use leptos::ev::KeyboardEvent;
use leptos::*;

fn delete_prompt(project: &Project) -> String {
    format!(
        "Delete \"{}\"? The project and its links are removed permanently.",
        project.title
    )
}

/// Asks before deleting the project held in `pending_delete`. Cancelling
/// clears it; confirming dispatches `delete_action`, whose result handler
/// clears it once the request settles.
#[component]
pub fn DeleteProjectDialog(
    pending_delete: RwSignal<Option<Project>>,
    delete_action: Action<Project, Result<Project, ApiError>>,
) -> impl IntoView {
    let deleting = delete_action.pending();
    let cancel = move || {
        if !deleting.get_untracked() {
            pending_delete.set(None);
        }
    };
    let confirm = move || {
        if deleting.get_untracked() {
            return;
        }
        if let Some(project) = pending_delete.get_untracked() {
            delete_action.dispatch(project);
        }
    };

    move || {
        pending_delete.get().map(|project| {
            view! {
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4">
                    <div
                        class="w-full max-w-md rounded-lg bg-white p-6 shadow-xl"
                        role="alertdialog"
                        aria-modal="true"
                        aria-labelledby="delete-project-title"
                        tabindex="-1"
                        on:keydown=move |ev: KeyboardEvent| {
                            if ev.key() == "Escape" {
                                ev.prevent_default();
                                cancel();
                            }
                        }
                    >
                        <h2 id="delete-project-title" class="text-lg font-semibold text-gray-900">
                            {"Delete project"}
                        </h2>
                        <p class="mt-2 text-sm text-gray-600">{delete_prompt(&project)}</p>
                        <div class="mt-6 flex justify-end gap-3">
                            <button
                                type="button"
                                class="rounded px-4 py-2 text-sm font-semibold bg-gray-200 text-gray-800 hover:bg-gray-300 disabled:opacity-50"
                                disabled=move || deleting.get()
                                on:click=move |_| cancel()
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="button"
                                class="rounded px-4 py-2 text-sm font-semibold bg-red-600 text-white hover:bg-red-700 disabled:opacity-50"
                                disabled=move || deleting.get()
                                on:click=move |_| confirm()
                            >
                                {move || if deleting.get() { "Deleting..." } else { "Delete" }}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_project() {
        let project = Project {
            id: "9".into(),
            title: "Weather Station".into(),
            description: None,
            image_url: None,
            project_link: None,
            github_link: None,
            created_at: None,
        };
        assert!(delete_prompt(&project).starts_with("Delete \"Weather Station\"?"));
    }
}
