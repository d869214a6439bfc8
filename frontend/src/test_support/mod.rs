#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::state::auth::AuthState;
    use crate::state::session_guard::AuthorizedIdentity;
    use leptos::*;

    pub fn admin_identity() -> AuthorizedIdentity {
        AuthorizedIdentity {
            user_id: "u-admin".into(),
            email: Some("admin@example.com".into()),
        }
    }

    pub fn provide_auth(state: AuthState) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(state);
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
