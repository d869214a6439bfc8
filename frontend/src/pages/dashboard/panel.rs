use crate::pages::dashboard::{components::SummarySection, view_model::use_dashboard_view_model};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let stats_resource = vm.stats_resource;

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-gray-900">{"Dashboard Overview"}</h1>
                <p class="mt-2 text-gray-600">
                    {"Welcome to the admin panel. Use the sidebar to manage portfolio content."}
                </p>
            </div>
            <SummarySection summary=Signal::derive(move || stats_resource.get()) />
        </div>
    }
}
