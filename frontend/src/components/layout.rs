use crate::{
    components::guard::RequireAdmin,
    router::{is_login_path, ADMIN_LOGIN_PATH, ADMIN_ROOT_PATH, PROJECTS_PATH},
    state::auth::{self, use_auth},
};
use leptos::*;
use leptos_router::{use_location, use_navigate, NavigateOptions, Outlet};

const NAV_ACTIVE: &str = "block py-2 px-4 rounded bg-blue-600";
const NAV_IDLE: &str = "block py-2 px-4 rounded hover:bg-gray-700";

fn nav_class(active: bool) -> &'static str {
    if active {
        NAV_ACTIVE
    } else {
        NAV_IDLE
    }
}

fn is_overview_active(path: &str) -> bool {
    path.trim_end_matches('/') == ADMIN_ROOT_PATH
}

fn is_projects_active(path: &str) -> bool {
    path.starts_with(PROJECTS_PATH)
}

/// Parent view of every `/admin` route. The login page renders bare; every
/// other child sits behind the guard inside the admin chrome.
#[component]
pub fn AdminLayout() -> impl IntoView {
    let location = use_location();
    let on_login_page = create_memo(move |_| is_login_path(&location.pathname.get()));

    view! {
        <Show
            when=move || on_login_page.get()
            fallback=|| view! {
                <RequireAdmin>
                    <AdminChrome />
                </RequireAdmin>
            }
        >
            <Outlet />
        </Show>
    }
}

#[component]
fn AdminChrome() -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();
    let (auth, _) = use_auth();
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();

    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            navigate(ADMIN_LOGIN_PATH, NavigateOptions::default());
        }
    });

    let on_logout = Callback::new(move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    });

    view! {
        <AdminShell
            active_path=location.pathname.into()
            email=Signal::derive(move || auth.get().email().unwrap_or_default())
            logout_pending=logout_pending.into()
            on_logout=on_logout
        >
            <Outlet />
        </AdminShell>
    }
}

#[component]
pub fn AdminShell(
    active_path: Signal<String>,
    email: Signal<String>,
    logout_pending: Signal<bool>,
    on_logout: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-gray-100">
            <aside class="w-64 bg-gray-800 text-white flex flex-col p-6">
                <h2 class="text-2xl font-bold mb-8">{"Admin Panel"}</h2>
                <nav class="flex-1">
                    <ul class="space-y-4">
                        <li>
                            <a
                                href=ADMIN_ROOT_PATH
                                class=move || nav_class(is_overview_active(&active_path.get()))
                            >
                                {"Dashboard Overview"}
                            </a>
                        </li>
                        <li>
                            <a
                                href=PROJECTS_PATH
                                class=move || nav_class(is_projects_active(&active_path.get()))
                            >
                                {"Manage Projects"}
                            </a>
                        </li>
                    </ul>
                </nav>
                <div class="mt-auto">
                    <p class="text-sm text-gray-400 mb-4">
                        {move || format!("Logged in as: {}", email.get())}
                    </p>
                    <button
                        type="button"
                        class="w-full bg-red-600 hover:bg-red-700 text-white py-2 px-4 rounded-lg transition-colors disabled:opacity-50"
                        disabled=move || logout_pending.get()
                        on:click=move |_| on_logout.call(())
                    >
                        {"Logout"}
                    </button>
                </div>
            </aside>
            <main class="flex-1 p-8">{children()}</main>
        </div>
    }
}

#[component]
pub fn DashboardLoading() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100">
            <p class="text-xl text-gray-700">{"Loading dashboard..."}</p>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-green-50 border border-green-200 text-green-700 px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Shown instead of the app when the backend settings cannot be resolved.
#[component]
pub fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-100 p-6">
            <div class="max-w-lg w-full bg-white shadow rounded-lg p-6 space-y-2">
                <h1 class="text-xl font-semibold text-gray-900">{"Configuration error"}</h1>
                <ErrorMessage message=message />
                <p class="text-sm text-gray-600">
                    {"Set SUPABASE_URL and SUPABASE_ANON_KEY in env.js or config.json and reload."}
                </p>
            </div>
        </div>
    }
}
