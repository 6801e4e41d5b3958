//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries with bound parameters.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User account storage, lookup and paging

pub mod pg_user_repository;

pub use pg_user_repository::PgUserRepository;
