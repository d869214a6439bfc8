use leptos::*;

#[component]
pub fn ProjectNotFound(on_back: Callback<()>) -> impl IntoView {
    view! {
        <div class="text-center py-12">
            <p class="text-lg text-red-500">{"Project not found or an error occurred."}</p>
            <button
                type="button"
                class="mt-4 bg-gray-500 hover:bg-gray-600 text-white font-bold py-2 px-4 rounded"
                on:click=move |_| on_back.call(())
            >
                {"Back to Projects"}
            </button>
        </div>
    }
}
