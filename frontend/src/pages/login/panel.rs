use crate::{
    pages::login::{components::form::LoginForm, view_model::use_login_view_model},
    router::ADMIN_ROOT_PATH,
};
use leptos::{ev::SubmitEvent, *};
use leptos_router::{use_navigate, NavigateOptions};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let navigate = use_navigate();
    let vm = use_login_view_model(Callback::new(move |_| {
        navigate(ADMIN_ROOT_PATH, NavigateOptions::default())
    }));
    let pending = vm.login_action.pending();

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    });

    view! {
        <LoginForm
            email=vm.form.email
            password=vm.form.password
            error=vm.error.into()
            pending=pending.into()
            on_submit=handle_submit
        />
    }
}
