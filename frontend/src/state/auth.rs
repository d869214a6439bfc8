use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    pages::login::repository::LoginRepository,
    state::session_guard::{AuthorizedIdentity, GuardHooks, GuardState, SessionGuard},
};
use futures::future::LocalBoxFuture;
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};
use std::rc::Rc;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthorizedIdentity>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn from_guard(state: &GuardState) -> Self {
        match state {
            GuardState::Initializing => Self {
                user: None,
                is_authenticated: false,
                loading: true,
            },
            GuardState::Authorized(identity) => Self {
                user: Some(identity.clone()),
                is_authenticated: true,
                loading: false,
            },
            GuardState::Redirecting => Self::default(),
        }
    }

    pub fn email(&self) -> Option<String> {
        self.user.as_ref().and_then(|user| user.email.clone())
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_signal(AuthState::default());
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub fn use_api_client() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Starts a [`SessionGuard`] bound to the current reactive scope. The guard
/// writes its decisions into the auth context and is disposed with the scope.
pub fn use_session_guard() {
    let (_auth, set_auth) = use_auth();
    let client = Rc::new(use_api_client());
    let navigate = use_navigate();

    let hooks = GuardHooks {
        on_state: Rc::new(move |state: &GuardState| set_auth.set(AuthState::from_guard(state))),
        navigate: Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
        spawn: Rc::new(|fut: LocalBoxFuture<'static, ()>| spawn_local(fut)),
    };
    let guard = SessionGuard::new(client, hooks);
    set_auth.set(AuthState::from_guard(&guard.state()));

    let starting = guard.clone();
    spawn_local(async move { starting.activate().await });
    on_cleanup(move || guard.dispose());
}

pub async fn login_request(request: LoginRequest, repo: &LoginRepository) -> Result<(), ApiError> {
    repo.login(&request).await.map(|_| ())
}

/// Signs out and reports, but never propagates, a failure: the caller leaves
/// the admin area either way.
pub async fn logout(repo: &LoginRepository, set_auth_state: WriteSignal<AuthState>) {
    if let Err(err) = repo.logout().await {
        log::error!("Logout error: {}", err);
    }
    set_auth_state.set(AuthState::default());
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let repo = LoginRepository::new_with_client(Rc::new(use_api_client()));

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_auth, set_auth) = use_auth();
    let repo = LoginRepository::new_with_client(Rc::new(use_api_client()));

    create_action(move |_: &()| {
        let repo = repo.clone();
        async move { logout(&repo, set_auth).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn login_then_logout_clears_auth_state() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/token");
                then.status(200).json_body(serde_json::json!({
                    "access_token": "token-1",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "refresh_token": "refresh-1",
                    "user": { "id": "u1", "email": "a@x.com" }
                }));
            })
            .await;
        let logout_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/logout");
                then.status(204);
            })
            .await;

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState {
            user: Some(AuthorizedIdentity {
                user_id: "u1".into(),
                email: Some("a@x.com".into()),
            }),
            is_authenticated: true,
            loading: false,
        });
        let api = ApiClient::new_with_base_url(server.base_url());
        let repo = LoginRepository::new_with_client(Rc::new(api.clone()));

        login_request(
            LoginRequest {
                email: "a@x.com".into(),
                password: "secret".into(),
            },
            &repo,
        )
        .await
        .unwrap();
        assert!(api.get_session().await.unwrap().is_some());

        logout(&repo, set_state).await;

        logout_mock.assert_async().await;
        assert_eq!(state.get(), AuthState::default());
        assert!(api.get_session().await.unwrap().is_none());
        runtime.dispose();
    }
}
