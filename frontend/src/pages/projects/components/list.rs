use crate::{api::Project, router::edit_project_path, utils::time::format_date};
use leptos::*;

#[component]
fn ExternalLink(href: Option<String>, label: &'static str) -> impl IntoView {
    match href {
        Some(href) => view! {
            <a href=href target="_blank" rel="noopener noreferrer" class="text-blue-600 hover:underline">
                {label}
            </a>
        }
        .into_view(),
        None => view! { <span class="text-gray-400">{"-"}</span> }.into_view(),
    }
}

#[component]
pub fn ProjectTable(projects: Signal<Vec<Project>>, on_delete: Callback<Project>) -> impl IntoView {
    view! {
        <Show
            when=move || !projects.get().is_empty()
            fallback=|| view! {
                <p class="text-sm text-gray-500">{"No projects yet. Add your first project."}</p>
            }
        >
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Image"}</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Title"}</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Links"}</th>
                            <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">{"Created"}</th>
                            <th class="px-6 py-3 text-right text-xs font-medium text-gray-500 uppercase tracking-wider">{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || projects.get()
                            key=|project| project.id.clone()
                            children=move |project: Project| {
                                let to_delete = project.clone();
                                view! {
                                    <tr>
                                        <td class="px-6 py-4">
                                            {project.image_url.clone().map(|src| view! {
                                                <img src=src alt=project.title.clone() class="h-12 w-20 object-cover rounded" />
                                            })}
                                        </td>
                                        <td class="px-6 py-4 text-sm font-medium text-gray-900">
                                            {project.title.clone()}
                                        </td>
                                        <td class="px-6 py-4 text-sm space-x-3">
                                            <ExternalLink href=project.project_link.clone() label="Live" />
                                            <ExternalLink href=project.github_link.clone() label="GitHub" />
                                        </td>
                                        <td class="px-6 py-4 text-sm text-gray-500">
                                            {format_date(project.created_at.as_ref())}
                                        </td>
                                        <td class="px-6 py-4 text-right text-sm space-x-2">
                                            <a
                                                href=edit_project_path(&project.id)
                                                class="inline-flex px-3 py-1 rounded bg-yellow-500 hover:bg-yellow-600 text-white"
                                            >
                                                {"Edit"}
                                            </a>
                                            <button
                                                type="button"
                                                class="inline-flex px-3 py-1 rounded bg-red-600 hover:bg-red-700 text-white"
                                                on:click=move |_| on_delete.call(to_delete.clone())
                                            >
                                                {"Delete"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn project(id: &str, title: &str) -> Project {
        Project {
            id: id.into(),
            title: title.into(),
            description: None,
            image_url: Some(format!("https://cdn.example.com/{}.png", id)),
            project_link: Some("https://folio.example.com".into()),
            github_link: None,
            created_at: None,
        }
    }

    #[test]
    fn table_lists_projects_with_edit_links() {
        let html = render_to_string(move || {
            let projects = Signal::derive(|| vec![project("1", "Folio"), project("2", "Tracker")]);
            view! { <ProjectTable projects=projects on_delete=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("Folio"));
        assert!(html.contains("Tracker"));
        assert!(html.contains("/admin/projects/edit/2"));
        assert!(html.contains("https://cdn.example.com/1.png"));
        assert!(html.contains("Delete"));
    }

    #[test]
    fn empty_table_shows_hint() {
        let html = render_to_string(move || {
            view! { <ProjectTable projects=Signal::derive(Vec::new) on_delete=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("No projects yet"));
    }
}
