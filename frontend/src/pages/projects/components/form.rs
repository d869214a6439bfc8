use crate::{
    components::layout::{ErrorMessage, SuccessMessage},
    pages::projects::utils::{MessageState, ProjectFormState},
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str =
    "mt-1 w-full shadow appearance-none border rounded py-2 px-3 text-gray-700 focus:outline-none focus:ring-2 focus:ring-blue-500";

#[component]
pub fn ProjectForm(
    form: RwSignal<ProjectFormState>,
    messages: RwSignal<MessageState>,
    pending: Signal<bool>,
    on_file: Callback<Option<web_sys::File>>,
    on_submit: Callback<SubmitEvent>,
    submit_label: &'static str,
) -> impl IntoView {
    let current_image = move || form.get().image_url;

    view! {
        <form
            class="bg-white p-8 rounded-lg shadow-md max-w-2xl mx-auto space-y-4"
            on:submit=move |ev| on_submit.call(ev)
        >
            <Show when=move || messages.get().error.is_some()>
                <ErrorMessage message={messages.get().error.unwrap_or_default()} />
            </Show>
            <Show when=move || messages.get().success.is_some()>
                <SuccessMessage message={messages.get().success.unwrap_or_default()} />
            </Show>

            <div>
                <label for="title" class="block text-sm font-bold text-gray-700">{"Title"}</label>
                <input
                    id="title"
                    type="text"
                    required
                    class=INPUT_CLASS
                    prop:value=move || form.get().title
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|state| state.title = value);
                    }
                />
            </div>
            <div>
                <label for="description" class="block text-sm font-bold text-gray-700">{"Description"}</label>
                <textarea
                    id="description"
                    rows="5"
                    class=INPUT_CLASS
                    prop:value=move || form.get().description
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|state| state.description = value);
                    }
                ></textarea>
            </div>
            <div>
                <label for="image" class="block text-sm font-bold text-gray-700">{"Project Image"}</label>
                {move || current_image().map(|src| view! {
                    <img src=src alt="Current project image" class="my-2 h-32 rounded object-cover" />
                })}
                <input
                    id="image"
                    type="file"
                    accept="image/*"
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        let input = event_target::<HtmlInputElement>(&ev);
                        on_file.call(input.files().and_then(|files| files.get(0)));
                    }
                />
            </div>
            <div>
                <label for="project_link" class="block text-sm font-bold text-gray-700">{"Project Link"}</label>
                <input
                    id="project_link"
                    type="url"
                    class=INPUT_CLASS
                    prop:value=move || form.get().project_link
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|state| state.project_link = value);
                    }
                />
            </div>
            <div>
                <label for="github_link" class="block text-sm font-bold text-gray-700">{"GitHub Link"}</label>
                <input
                    id="github_link"
                    type="url"
                    class=INPUT_CLASS
                    prop:value=move || form.get().github_link
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|state| state.github_link = value);
                    }
                />
            </div>
            <button
                type="submit"
                disabled=move || pending.get()
                class="w-full bg-blue-600 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded disabled:opacity-50"
            >
                {move || if pending.get() { "Saving..." } else { submit_label }}
            </button>
        </form>
    }
}
