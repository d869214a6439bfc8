use reqwest::{Method, StatusCode};
use serde_json::json;

use super::{
    client::{now_secs, ApiClient},
    events::{AuthChangeEvent, SessionListener, Subscription},
    types::{ApiError, LoginRequest, Session},
};

impl ApiClient {
    pub async fn sign_in_with_password(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        let builder = self
            .request(Method::POST, &self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .json(request);
        let response = Self::send(builder).await?;
        let session = Self::decode::<Session>(response).await?.normalized(now_secs());

        self.store_session(Some(session.clone()));
        log::info!(
            "signed in as {}",
            session.user.email.as_deref().unwrap_or(&session.user.id)
        );
        self.events().emit(AuthChangeEvent::SignedIn, Some(&session));
        Ok(session)
    }

    /// Current session, refreshed first when it is about to expire.
    pub async fn get_session(&self) -> Result<Option<Session>, ApiError> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        if !session.is_expired(now_secs()) {
            return Ok(Some(session));
        }

        log::debug!("access token for {} expiring; refreshing", session.user.id);
        match self.refresh_session().await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(err) => {
                log::warn!("session refresh failed: {}", err);
                self.store_session(None);
                self.events().emit(AuthChangeEvent::SignedOut, None);
                Err(err)
            }
        }
    }

    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let refresh_token = self
            .current_session()
            .map(|session| session.refresh_token)
            .ok_or_else(|| ApiError::unknown("No refresh token"))?;

        let builder = self
            .request(Method::POST, &self.endpoint("/auth/v1/token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        let response = Self::send(builder).await?;
        let session = Self::decode::<Session>(response).await?.normalized(now_secs());

        self.store_session(Some(session.clone()));
        self.events()
            .emit(AuthChangeEvent::TokenRefreshed, Some(&session));
        Ok(session)
    }

    /// Revokes the session server-side and always clears it locally. A
    /// session the server no longer knows about counts as signed out.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let result = if self.current_session().is_some() {
            match self
                .request(Method::POST, &self.endpoint("/auth/v1/logout"))
                .send()
                .await
            {
                Ok(response)
                    if response.status().is_success() || session_gone(response.status()) =>
                {
                    Ok(())
                }
                Ok(response) => Err(Self::error_from_response(response).await),
                Err(e) => Err(ApiError::request_failed(format!("Request failed: {}", e))),
            }
        } else {
            Ok(())
        };

        self.store_session(None);
        self.events().emit(AuthChangeEvent::SignedOut, None);
        result
    }

    pub fn on_session_change(&self, listener: SessionListener) -> Subscription {
        self.events().subscribe(listener)
    }
}

fn session_gone(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    )
}
