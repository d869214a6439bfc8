pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod create;
mod edit;
mod panel;

pub use create::NewProjectPage;
pub use edit::EditProjectPage;
pub use panel::ProjectsPage;
