//! Admin access guard.
//!
//! A [`SessionGuard`] admits protected views only while there is a session
//! whose profile has the `admin` role. It checks once on activation and again
//! on every session-change notification; any failed check leaves the admin
//! area. Each check takes a ticket and only the most recent ticket may commit,
//! so a slow check can never overwrite the outcome of a newer one.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError, Profile, Session, SessionListener, Subscription},
    router::ADMIN_LOGIN_PATH,
};

pub const ADMIN_ROLE: &str = "admin";

/// What the guard needs from the backend.
#[async_trait(?Send)]
pub trait AuthGateway {
    async fn get_session(&self) -> Result<Option<Session>, ApiError>;
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError>;
    async fn sign_out(&self) -> Result<(), ApiError>;
    fn on_session_change(&self, listener: SessionListener) -> Subscription;
}

#[async_trait(?Send)]
impl AuthGateway for ApiClient {
    async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        ApiClient::get_session(self).await
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        ApiClient::fetch_profile(self, user_id).await
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        ApiClient::sign_out(self).await
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        ApiClient::on_session_change(self, listener)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedIdentity {
    pub user_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Initializing,
    Authorized(AuthorizedIdentity),
    /// Terminal: the guard has sent the user to the login view.
    Redirecting,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardError {
    #[error("no active session")]
    NoSession,
    #[error("failed to load session: {0}")]
    SessionFetch(ApiError),
    #[error("failed to load profile: {0}")]
    ProfileFetch(ApiError),
    #[error("no profile for user {0}")]
    ProfileMissing(String),
    #[error("role `{0}` may not access the admin area")]
    RoleMismatch(String),
    #[error("sign-out failed: {0}")]
    SignOut(ApiError),
}

impl GuardError {
    /// Denials tied to a live session end that session before redirecting.
    pub fn requires_sign_out(&self) -> bool {
        matches!(
            self,
            GuardError::ProfileFetch(_) | GuardError::ProfileMissing(_) | GuardError::RoleMismatch(_)
        )
    }
}

/// Decides whether `session` may enter the admin area given the outcome of
/// its profile lookup. A failed lookup counts as a denial.
pub fn authorize(
    session: &Session,
    profile: Result<Option<Profile>, ApiError>,
) -> Result<AuthorizedIdentity, GuardError> {
    let profile = profile
        .map_err(GuardError::ProfileFetch)?
        .ok_or_else(|| GuardError::ProfileMissing(session.user.id.clone()))?;
    if profile.role != ADMIN_ROLE {
        return Err(GuardError::RoleMismatch(profile.role));
    }
    Ok(AuthorizedIdentity {
        user_id: session.user.id.clone(),
        email: session.user.email.clone(),
    })
}

pub type StateSink = Rc<dyn Fn(&GuardState)>;
pub type Navigator = Rc<dyn Fn(&str)>;
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Side effects the guard performs on its host.
#[derive(Clone)]
pub struct GuardHooks {
    pub on_state: StateSink,
    pub navigate: Navigator,
    pub spawn: Spawner,
}

struct GuardInner<G: AuthGateway + 'static> {
    gateway: Rc<G>,
    hooks: GuardHooks,
    state: RefCell<GuardState>,
    latest_ticket: Cell<u64>,
    active: Cell<bool>,
    subscription: RefCell<Option<Subscription>>,
}

pub struct SessionGuard<G: AuthGateway + 'static> {
    inner: Rc<GuardInner<G>>,
}

impl<G: AuthGateway + 'static> Clone for SessionGuard<G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<G: AuthGateway + 'static> SessionGuard<G> {
    pub fn new(gateway: Rc<G>, hooks: GuardHooks) -> Self {
        Self {
            inner: Rc::new(GuardInner {
                gateway,
                hooks,
                state: RefCell::new(GuardState::Initializing),
                latest_ticket: Cell::new(0),
                active: Cell::new(true),
                subscription: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> GuardState {
        self.inner.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// Subscribes to session changes, then runs the initial check.
    pub async fn activate(&self) {
        if !self.is_active() {
            return;
        }
        self.subscribe();
        self.inner.run_initial_check().await;
    }

    pub async fn handle_session_change(&self, session: Option<Session>) {
        self.inner.handle_session_change(session).await;
    }

    /// Releases the subscription. Nothing the guard started before this call
    /// will touch state, sign out, or navigate afterwards.
    pub fn dispose(&self) {
        self.inner.active.set(false);
        let subscription = self.inner.subscription.borrow_mut().take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    fn subscribe(&self) {
        let weak = Rc::downgrade(&self.inner);
        let listener: SessionListener = Rc::new(move |event, session| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.active.get() {
                return;
            }
            log::debug!("guard received {:?}", event);
            let spawn = inner.hooks.spawn.clone();
            spawn(Box::pin(async move {
                inner.handle_session_change(session).await;
            }));
        });
        let subscription = self.inner.gateway.on_session_change(listener);
        *self.inner.subscription.borrow_mut() = Some(subscription);
    }
}

impl<G: AuthGateway + 'static> GuardInner<G> {
    async fn run_initial_check(&self) {
        let ticket = self.next_ticket();
        match self.gateway.get_session().await {
            Ok(Some(session)) => self.verify(ticket, session).await,
            Ok(None) => self.deny(ticket, GuardError::NoSession).await,
            Err(err) => self.deny(ticket, GuardError::SessionFetch(err)).await,
        }
    }

    async fn handle_session_change(&self, session: Option<Session>) {
        if !self.accepts_updates() {
            return;
        }
        match session {
            Some(session) => {
                let ticket = self.next_ticket();
                self.verify(ticket, session).await;
            }
            None => {
                // Invalidate whatever check is still in flight.
                self.next_ticket();
                log::info!("session ended elsewhere; leaving admin area");
                self.redirect();
            }
        }
    }

    async fn verify(&self, ticket: u64, session: Session) {
        let profile = self.gateway.fetch_profile(&session.user.id).await;
        match authorize(&session, profile) {
            Ok(identity) => {
                if !self.is_current(ticket) {
                    log::debug!("discarding stale admission for {}", identity.user_id);
                    return;
                }
                log::info!("admin access granted to {}", identity.user_id);
                self.set_state(GuardState::Authorized(identity));
            }
            Err(err) => self.deny(ticket, err).await,
        }
    }

    async fn deny(&self, ticket: u64, err: GuardError) {
        if !self.is_current(ticket) {
            log::debug!("discarding stale denial: {}", err);
            return;
        }
        log::warn!("admin access denied: {}", err);
        // Enter Redirecting first so our own SignedOut notification is ignored.
        self.set_state(GuardState::Redirecting);
        if err.requires_sign_out() {
            if let Err(sign_out_err) = self.gateway.sign_out().await {
                log::error!("{}", GuardError::SignOut(sign_out_err));
            }
        }
        if self.active.get() {
            (self.hooks.navigate)(ADMIN_LOGIN_PATH);
        }
    }

    fn redirect(&self) {
        self.set_state(GuardState::Redirecting);
        (self.hooks.navigate)(ADMIN_LOGIN_PATH);
    }

    fn next_ticket(&self) -> u64 {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);
        ticket
    }

    fn accepts_updates(&self) -> bool {
        self.active.get() && *self.state.borrow() != GuardState::Redirecting
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.accepts_updates() && self.latest_ticket.get() == ticket
    }

    fn set_state(&self, next: GuardState) {
        *self.state.borrow_mut() = next.clone();
        (self.hooks.on_state)(&next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthChangeEvent, SessionUser};
    use crate::api::events::AuthEvents;
    use std::collections::HashMap;

    fn session(id: &str, email: &str) -> Session {
        Session {
            access_token: format!("token-{}", id),
            refresh_token: format!("refresh-{}", id),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at: None,
            user: SessionUser {
                id: id.into(),
                email: Some(email.into()),
            },
        }
    }

    fn profile(id: &str, role: &str) -> Profile {
        Profile {
            id: id.into(),
            role: role.into(),
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        session: RefCell<Option<Result<Option<Session>, ApiError>>>,
        profiles: RefCell<HashMap<String, Result<Option<Profile>, ApiError>>>,
        sign_out_error: RefCell<Option<ApiError>>,
        sign_outs: Cell<usize>,
        events: AuthEvents,
    }

    impl FakeGateway {
        fn with_session(self, session: Result<Option<Session>, ApiError>) -> Self {
            *self.session.borrow_mut() = Some(session);
            self
        }

        fn with_profile(self, user_id: &str, profile: Result<Option<Profile>, ApiError>) -> Self {
            self.profiles.borrow_mut().insert(user_id.into(), profile);
            self
        }
    }

    #[async_trait(?Send)]
    impl AuthGateway for FakeGateway {
        async fn get_session(&self) -> Result<Option<Session>, ApiError> {
            self.session.borrow().clone().unwrap_or(Ok(None))
        }

        async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
            self.profiles
                .borrow()
                .get(user_id)
                .cloned()
                .unwrap_or(Ok(None))
        }

        async fn sign_out(&self) -> Result<(), ApiError> {
            self.sign_outs.set(self.sign_outs.get() + 1);
            self.events.emit(AuthChangeEvent::SignedOut, None);
            match self.sign_out_error.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn on_session_change(&self, listener: SessionListener) -> Subscription {
            self.events.subscribe(listener)
        }
    }

    /// Records everything the guard does to its host.
    #[derive(Clone, Default)]
    struct Spy {
        states: Rc<RefCell<Vec<GuardState>>>,
        navigations: Rc<RefCell<Vec<String>>>,
        spawned: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
    }

    impl Spy {
        fn hooks(&self) -> GuardHooks {
            let states = self.states.clone();
            let navigations = self.navigations.clone();
            let spawned = self.spawned.clone();
            GuardHooks {
                on_state: Rc::new(move |state: &GuardState| states.borrow_mut().push(state.clone())),
                navigate: Rc::new(move |path: &str| navigations.borrow_mut().push(path.to_string())),
                spawn: Rc::new(move |fut: LocalBoxFuture<'static, ()>| spawned.borrow_mut().push(fut)),
            }
        }

        async fn run_spawned(&self) {
            loop {
                let next = {
                    let mut queue = self.spawned.borrow_mut();
                    if queue.is_empty() {
                        None
                    } else {
                        Some(queue.remove(0))
                    }
                };
                match next {
                    Some(fut) => fut.await,
                    None => break,
                }
            }
        }

        fn navigations(&self) -> Vec<String> {
            self.navigations.borrow().clone()
        }

        fn state_count(&self) -> usize {
            self.states.borrow().len()
        }
    }

    fn guard(gateway: FakeGateway, spy: &Spy) -> (SessionGuard<FakeGateway>, Rc<FakeGateway>) {
        let gateway = Rc::new(gateway);
        (SessionGuard::new(gateway.clone(), spy.hooks()), gateway)
    }

    fn authorized(id: &str, email: &str) -> GuardState {
        GuardState::Authorized(AuthorizedIdentity {
            user_id: id.into(),
            email: Some(email.into()),
        })
    }

    #[test]
    fn authorize_requires_exact_admin_role() {
        let s = session("u1", "a@x.com");
        assert!(authorize(&s, Ok(Some(profile("u1", "admin")))).is_ok());
        assert_eq!(
            authorize(&s, Ok(Some(profile("u1", "Admin")))),
            Err(GuardError::RoleMismatch("Admin".into()))
        );
        assert_eq!(
            authorize(&s, Ok(None)),
            Err(GuardError::ProfileMissing("u1".into()))
        );
        assert!(matches!(
            authorize(&s, Err(ApiError::request_failed("offline"))),
            Err(GuardError::ProfileFetch(_))
        ));
    }

    #[test]
    fn only_session_bound_denials_sign_out() {
        assert!(!GuardError::NoSession.requires_sign_out());
        assert!(!GuardError::SessionFetch(ApiError::unknown("x")).requires_sign_out());
        assert!(GuardError::ProfileFetch(ApiError::unknown("x")).requires_sign_out());
        assert!(GuardError::ProfileMissing("u".into()).requires_sign_out());
        assert!(GuardError::RoleMismatch("editor".into()).requires_sign_out());
    }

    #[tokio::test]
    async fn admits_admin_and_exposes_email() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u1", "a@x.com"))))
                .with_profile("u1", Ok(Some(profile("u1", "admin")))),
            &spy,
        );

        guard.activate().await;

        assert_eq!(guard.state(), authorized("u1", "a@x.com"));
        assert!(spy.navigations().is_empty());
        assert_eq!(gateway.sign_outs.get(), 0);
        assert_eq!(gateway.events.listener_count(), 1);
    }

    #[tokio::test]
    async fn missing_session_redirects_without_sign_out() {
        let spy = Spy::default();
        let (guard, gateway) = guard(FakeGateway::default().with_session(Ok(None)), &spy);

        guard.activate().await;

        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
        assert_eq!(gateway.sign_outs.get(), 0);
    }

    #[tokio::test]
    async fn session_fetch_error_redirects_without_sign_out() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default().with_session(Err(ApiError::request_failed("offline"))),
            &spy,
        );

        guard.activate().await;

        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
        assert_eq!(gateway.sign_outs.get(), 0);
    }

    #[tokio::test]
    async fn profile_error_signs_out_then_redirects() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u2", "b@x.com"))))
                .with_profile("u2", Err(ApiError::request_failed("timeout"))),
            &spy,
        );

        guard.activate().await;
        spy.run_spawned().await;

        assert_eq!(gateway.sign_outs.get(), 1);
        assert_eq!(guard.state(), GuardState::Redirecting);
        // Our own SignedOut notification must not trigger a second redirect.
        assert_eq!(spy.navigations(), vec!["/admin/login".to_string()]);
    }

    #[tokio::test]
    async fn non_admin_and_missing_profile_are_denied() {
        for profile_result in [Ok(Some(profile("u3", "editor"))), Ok(None)] {
            let spy = Spy::default();
            let (guard, gateway) = guard(
                FakeGateway::default()
                    .with_session(Ok(Some(session("u3", "c@x.com"))))
                    .with_profile("u3", profile_result),
                &spy,
            );

            guard.activate().await;

            assert_eq!(gateway.sign_outs.get(), 1);
            assert_eq!(guard.state(), GuardState::Redirecting);
            assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
        }
    }

    #[tokio::test]
    async fn sign_out_failure_does_not_block_redirect() {
        let spy = Spy::default();
        let gateway = FakeGateway::default()
            .with_session(Ok(Some(session("u3", "c@x.com"))))
            .with_profile("u3", Ok(Some(profile("u3", "viewer"))));
        *gateway.sign_out_error.borrow_mut() = Some(ApiError::request_failed("offline"));
        let (guard, gateway) = guard(gateway, &spy);

        guard.activate().await;

        assert_eq!(gateway.sign_outs.get(), 1);
        assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn change_to_non_admin_session_signs_out() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u1", "a@x.com"))))
                .with_profile("u1", Ok(Some(profile("u1", "admin"))))
                .with_profile("u4", Ok(Some(profile("u4", "member")))),
            &spy,
        );
        guard.activate().await;
        assert_eq!(guard.state(), authorized("u1", "a@x.com"));

        gateway
            .events
            .emit(AuthChangeEvent::SignedIn, Some(&session("u4", "d@x.com")));
        spy.run_spawned().await;

        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(gateway.sign_outs.get(), 1);
        assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn change_to_another_admin_updates_identity() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u1", "a@x.com"))))
                .with_profile("u1", Ok(Some(profile("u1", "admin"))))
                .with_profile("u5", Ok(Some(profile("u5", "admin")))),
            &spy,
        );
        guard.activate().await;

        gateway
            .events
            .emit(AuthChangeEvent::TokenRefreshed, Some(&session("u5", "e@x.com")));
        spy.run_spawned().await;

        assert_eq!(guard.state(), authorized("u5", "e@x.com"));
        assert!(spy.navigations().is_empty());
    }

    #[tokio::test]
    async fn external_logout_redirects_without_sign_out() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u1", "a@x.com"))))
                .with_profile("u1", Ok(Some(profile("u1", "admin")))),
            &spy,
        );
        guard.activate().await;

        gateway.events.emit(AuthChangeEvent::SignedOut, None);
        spy.run_spawned().await;

        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(gateway.sign_outs.get(), 0);
        assert_eq!(spy.navigations(), vec![ADMIN_LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn redirecting_is_terminal() {
        let spy = Spy::default();
        let (guard, _gateway) = guard(
            FakeGateway::default().with_profile("u1", Ok(Some(profile("u1", "admin")))),
            &spy,
        );
        guard.activate().await;
        assert_eq!(guard.state(), GuardState::Redirecting);

        guard
            .handle_session_change(Some(session("u1", "a@x.com")))
            .await;

        assert_eq!(guard.state(), GuardState::Redirecting);
        assert_eq!(spy.navigations().len(), 1);
    }

    #[tokio::test]
    async fn newer_check_wins_over_stale_one() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_profile("u1", Ok(Some(profile("u1", "admin"))))
                .with_profile("u6", Ok(Some(profile("u6", "guest")))),
            &spy,
        );

        // Start a check for u6, then let a newer u1 check take the ticket
        // before u6's profile result arrives.
        let stale_ticket = guard.inner.next_ticket();
        guard
            .handle_session_change(Some(session("u1", "a@x.com")))
            .await;
        guard
            .inner
            .verify(stale_ticket, session("u6", "f@x.com"))
            .await;

        assert_eq!(guard.state(), authorized("u1", "a@x.com"));
        assert_eq!(gateway.sign_outs.get(), 0);
        assert!(spy.navigations().is_empty());
    }

    #[tokio::test]
    async fn disposed_guard_ignores_notifications() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default()
                .with_session(Ok(Some(session("u1", "a@x.com"))))
                .with_profile("u1", Ok(Some(profile("u1", "admin")))),
            &spy,
        );
        guard.activate().await;
        let before = spy.state_count();

        guard.dispose();
        gateway.events.emit(AuthChangeEvent::SignedOut, None);
        spy.run_spawned().await;
        guard.handle_session_change(None).await;

        assert!(!guard.is_active());
        assert_eq!(gateway.events.listener_count(), 0);
        assert_eq!(spy.state_count(), before);
        assert!(spy.navigations().is_empty());
    }

    #[tokio::test]
    async fn check_finishing_after_dispose_is_dropped() {
        let spy = Spy::default();
        let (guard, gateway) = guard(
            FakeGateway::default().with_profile("u7", Ok(Some(profile("u7", "member")))),
            &spy,
        );
        let ticket = guard.inner.next_ticket();

        guard.dispose();
        guard.inner.verify(ticket, session("u7", "g@x.com")).await;

        assert_eq!(guard.state(), GuardState::Initializing);
        assert_eq!(gateway.sign_outs.get(), 0);
        assert!(spy.navigations().is_empty());
    }
}
