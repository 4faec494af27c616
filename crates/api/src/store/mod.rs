//! Relational stores for users and notes

pub mod notes;
pub mod users;
