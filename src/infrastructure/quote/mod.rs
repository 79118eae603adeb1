//! Quote store implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryQuoteRepository;
pub use postgres_repository::PostgresQuoteRepository;
