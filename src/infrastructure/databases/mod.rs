pub mod surrealdb;
