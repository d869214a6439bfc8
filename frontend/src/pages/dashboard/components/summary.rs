use crate::{
    api::ApiError,
    components::layout::{ErrorMessage, LoadingSpinner},
    pages::dashboard::utils::OverviewStats,
    router::PROJECTS_PATH,
};
use leptos::*;

#[component]
pub fn SummarySection(summary: Signal<Option<Result<OverviewStats, ApiError>>>) -> impl IntoView {
    view! {
        <div class="bg-white shadow rounded-lg p-6 space-y-4">
            <div>
                <h3 class="text-base font-semibold text-gray-900">{"Portfolio"}</h3>
                <p class="text-sm text-gray-600">{"Snapshot of the projects currently published."}</p>
            </div>
            {move || match summary.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! {
                    <ErrorMessage message=format!("Error fetching projects: {}", err) />
                }.into_view(),
                Some(Ok(stats)) => view! {
                    <div class="grid grid-cols-1 gap-4 lg:grid-cols-3">
                        <Metric label="Projects" value=stats.project_count.to_string() />
                        <Metric label="With image" value=stats.with_image.to_string() />
                        <Metric
                            label="Latest"
                            value=stats.latest_title.clone().unwrap_or_else(|| "-".to_string())
                        />
                    </div>
                    <p class="text-xs text-gray-500">{format!("Last added: {}", stats.latest_created)}</p>
                }.into_view(),
            }}
            <a href=PROJECTS_PATH class="inline-block text-sm font-medium text-blue-600 hover:underline">
                {"Manage Projects"}
            </a>
        </div>
    }
}

#[component]
fn Metric(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="p-6 rounded-lg bg-gray-50 border border-gray-100">
            <p class="text-xs font-bold text-blue-600 uppercase tracking-widest">{label}</p>
            <p class="mt-3 text-3xl font-extrabold text-gray-900">{value}</p>
        </div>
    }
}
