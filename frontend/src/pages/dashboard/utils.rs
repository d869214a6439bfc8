use crate::{api::Project, utils::time::format_date};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub project_count: usize,
    pub with_image: usize,
    pub latest_title: Option<String>,
    pub latest_created: String,
}

impl OverviewStats {
    /// Expects the list newest first, as `list_projects` returns it.
    pub fn from_projects(projects: &[Project]) -> Self {
        let latest = projects.first();
        Self {
            project_count: projects.len(),
            with_image: projects.iter().filter(|p| p.image_url.is_some()).count(),
            latest_title: latest.map(|p| p.title.clone()),
            latest_created: format_date(latest.and_then(|p| p.created_at.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn project(title: &str, image: bool) -> Project {
        Project {
            id: title.into(),
            title: title.into(),
            description: None,
            image_url: image.then(|| format!("https://cdn.example.com/{}.png", title)),
            project_link: None,
            github_link: None,
            created_at: Some(Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn stats_count_projects_and_pick_newest() {
        let stats = OverviewStats::from_projects(&[project("Newest", true), project("Older", false)]);
        assert_eq!(stats.project_count, 2);
        assert_eq!(stats.with_image, 1);
        assert_eq!(stats.latest_title.as_deref(), Some("Newest"));
        assert_eq!(stats.latest_created, "2025-03-04");
    }

    #[test]
    fn empty_list_has_no_latest() {
        let stats = OverviewStats::from_projects(&[]);
        assert_eq!(stats.project_count, 0);
        assert_eq!(stats.latest_title, None);
        assert_eq!(stats.latest_created, "-");
    }
}
