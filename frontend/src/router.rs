use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::layout::AdminLayout,
    pages::{
        dashboard::DashboardPage,
        login::LoginPage,
        projects::{EditProjectPage, NewProjectPage, ProjectsPage},
    },
    state::auth::AuthProvider,
};

pub const ADMIN_ROOT_PATH: &str = "/admin";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const PROJECTS_PATH: &str = "/admin/projects";
pub const NEW_PROJECT_PATH: &str = "/admin/projects/new";

pub fn edit_project_path(id: &str) -> String {
    format!("{}/edit/{}", PROJECTS_PATH, id)
}

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    ADMIN_LOGIN_PATH,
    ADMIN_ROOT_PATH,
    PROJECTS_PATH,
    NEW_PROJECT_PATH,
    "/admin/projects/edit/:id",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    ADMIN_ROOT_PATH,
    PROJECTS_PATH,
    NEW_PROJECT_PATH,
    "/admin/projects/edit/:id",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", ADMIN_LOGIN_PATH];

/// The login page is the only admin path the guard does not watch.
pub fn is_login_path(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    trimmed == ADMIN_LOGIN_PATH
}

pub fn mount_app(client: ApiClient) {
    mount_to_body(move || app_root(client));
}

pub fn app_root(client: ApiClient) -> impl IntoView {
    provide_context(client);
    provide_meta_context();
    view! {
        <Title text="Admin Panel" />
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}

/// Expects an [`ApiClient`] and the auth context to be provided.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes>
                <Route path="/" view=|| view! { <Redirect path=ADMIN_ROOT_PATH /> } />
                <Route path=ADMIN_ROOT_PATH view=AdminLayout>
                    <Route path="login" view=LoginPage />
                    <Route path="projects" view=ProjectsPage />
                    <Route path="projects/new" view=NewProjectPage />
                    <Route path="projects/edit/:id" view=EditProjectPage />
                    <Route path="" view=DashboardPage />
                </Route>
            </Routes>
        </Router>
    }
}
