pub mod delete_dialog;
pub mod form;
pub mod list;
pub mod not_found;
