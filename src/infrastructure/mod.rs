pub mod databases;
pub mod mailers;
pub mod models;
pub mod repositories;
