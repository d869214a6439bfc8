use super::{
    client::ApiClient,
    types::{ApiError, Profile},
};

pub const PROFILES_TABLE: &str = "profiles";

impl ApiClient {
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        self.select_single(PROFILES_TABLE, "id,role", "id", user_id)
            .await
    }
}
