use crate::api::{ApiClient, ApiError, LoginRequest, Session};
use std::rc::Rc;

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl LoginRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        self.client.sign_in_with_password(request).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.sign_out().await
    }
}
