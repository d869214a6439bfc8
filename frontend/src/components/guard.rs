use crate::{
    components::layout::DashboardLoading,
    state::auth::{use_auth, use_session_guard, AuthState},
};
use leptos::*;

/// Wraps admin-only content. Starts the session guard for as long as this
/// view is mounted; rendering follows the guard's decision.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    use_session_guard();
    view! { <AdminGate>{children()}</AdminGate> }
}

/// Renders from the auth context only: a loading screen while the check
/// runs, the children once admitted, and nothing otherwise.
#[component]
pub fn AdminGate(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let admitted = create_memo(move |_| should_render_children(&auth.get()));
    let loading = create_memo(move |_| auth.get().loading);

    view! {
        <Show
            when=move || admitted.get()
            fallback=move || {
                if loading.get() {
                    view! { <DashboardLoading /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(state: &AuthState) -> bool {
    state.is_authenticated && state.user.is_some() && !state.loading
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::AdminGate;
    use crate::state::auth::AuthState;
    use crate::test_support::helpers::{admin_identity, provide_auth};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn gate_renders_children_for_admitted_admin() {
        let html = render_to_string(move || {
            provide_auth(AuthState {
                user: Some(admin_identity()),
                is_authenticated: true,
                loading: false,
            });
            view! {
                <AdminGate>
                    {|| view! { <div>"admin-protected"</div> }}
                </AdminGate>
            }
        });
        assert!(html.contains("admin-protected"));
        assert!(!html.contains("Loading dashboard..."));
    }

    #[test]
    fn gate_shows_loading_while_checking() {
        let html = render_to_string(move || {
            provide_auth(AuthState {
                user: None,
                is_authenticated: false,
                loading: true,
            });
            view! {
                <AdminGate>
                    {|| view! { <div>"admin-protected"</div> }}
                </AdminGate>
            }
        });
        assert!(html.contains("Loading dashboard..."));
        assert!(!html.contains("admin-protected"));
    }

    #[test]
    fn gate_renders_nothing_while_redirecting() {
        let html = render_to_string(move || {
            provide_auth(AuthState::default());
            view! {
                <AdminGate>
                    {|| view! { <div>"admin-protected"</div> }}
                </AdminGate>
            }
        });
        assert!(!html.contains("admin-protected"));
        assert!(!html.contains("Loading dashboard..."));
    }
}
