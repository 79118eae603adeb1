//! Catalog store implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::{InMemoryContentRepository, InMemoryCourseRepository, InMemoryProductRepository};
pub use postgres_repository::{
    PostgresContentRepository, PostgresCourseRepository, PostgresProductRepository,
};
