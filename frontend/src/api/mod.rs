mod auth;
pub mod client;
pub mod events;
mod profiles;
mod projects;
mod storage;
pub mod types;

pub use client::*;
pub use events::{AuthChangeEvent, SessionListener, Subscription};
pub use profiles::PROFILES_TABLE;
pub use projects::PROJECTS_TABLE;
pub use storage::PROJECT_IMAGES_BUCKET;
pub use types::*;
