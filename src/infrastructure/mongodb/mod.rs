pub mod admin_repo;
pub mod connection;
pub mod data_repo;
