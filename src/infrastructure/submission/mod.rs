//! Form submission store implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::{
    InMemoryApplicationRepository, InMemoryNewsletterRepository, InMemorySubmissionThrottle,
};
pub use postgres_repository::{
    PostgresApplicationRepository, PostgresNewsletterRepository, PostgresSubmissionThrottle,
};
