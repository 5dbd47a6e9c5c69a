// Journal entries: user-authored records, plain CRUD scoped by user.

pub mod handlers;
pub mod service;
