pub mod group;
pub mod repository;
pub mod user;
