//! student_records - HTTP CRUD service for student documents in MongoDB

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod students;
