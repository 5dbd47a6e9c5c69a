pub mod entry;
pub mod reflection;
pub mod user;
