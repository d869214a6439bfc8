use crate::api::ApiError;
use leptos::*;

/// PostgREST puts a remediation hint next to its message.
fn hint_of(error: &ApiError) -> Option<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("hint"))
        .and_then(|hint| hint.as_str())
        .filter(|hint| !hint.is_empty())
        .map(str::to_string)
}

fn shows_code(code: &str) -> bool {
    !code.is_empty() && code != "UNKNOWN" && code != "VALIDATION_ERROR"
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().and_then(|e| hint_of(&e)).map(|hint| {
                    view! { <div class="text-sm">{format!("Hint: {}", hint)}</div> }
                })}
                {move || error.get().filter(|e| shows_code(&e.code)).map(|e| {
                    view! { <div class="text-xs opacity-75">{format!("Code: {}", e.code)}</div> }
                })}
            </div>
        </Show>
    }
}
