use super::utils::OverviewStats;
use crate::{api::ApiError, pages::projects::view_model::use_projects_repository};
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub stats_resource: Resource<(), Result<OverviewStats, ApiError>>,
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let repository = use_projects_repository();
    let stats_resource = create_resource(
        || (),
        move |_| {
            let repo = repository.clone();
            async move {
                repo.list()
                    .await
                    .map(|projects| OverviewStats::from_projects(&projects))
            }
        },
    );
    DashboardViewModel { stats_resource }
}
