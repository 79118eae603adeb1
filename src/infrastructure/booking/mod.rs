//! Booking store implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryBookingRepository;
pub use postgres_repository::PostgresBookingRepository;
